// src/ingest/database.rs
//! Database retrieval: metadata, one unfiltered query, then every row as a page.

use super::PageFetcher;
use crate::api::adapter::{canonical_page_url, extract_database_title, row_page_id};
use crate::api::NotionApi;
use crate::error::{AppError, EntityKind};
use crate::model::{Database, Page};
use crate::types::DatabaseId;
use futures::stream::{self, StreamExt};
use serde_json::Value;

/// Fetches a database and the pages behind its rows.
#[derive(Clone)]
pub struct DatabaseFetcher {
    api: NotionApi,
    pages: PageFetcher,
    concurrency: usize,
}

impl DatabaseFetcher {
    pub fn new(api: NotionApi, pages: PageFetcher, concurrency: usize) -> Self {
        Self {
            api,
            pages,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetches database `id` with its rows in API order.
    ///
    /// Metadata and query failures fail the whole database. A row that
    /// fails, or has no usable id, is logged and left out.
    pub async fn fetch_database(&self, id: &DatabaseId) -> Result<Database, AppError> {
        let tag = |e| AppError::fetch_failed(EntityKind::Database, id, e);

        let metadata = self.api.retrieve_database(id).await.map_err(tag)?;
        let title = extract_database_title(&metadata);
        let rows = self.api.query_rows(id).await.map_err(tag)?;

        log::debug!(
            "Database '{}' ({}) returned {} rows; fetching {} at a time",
            title,
            id,
            rows.len(),
            self.concurrency
        );

        let row_count = rows.len();
        let pages: Vec<Page> = stream::iter(rows.iter().enumerate())
            .map(|(position, row)| self.fetch_row(id, position, row))
            .buffered(self.concurrency)
            .filter_map(|page| async move { page })
            .collect()
            .await;

        if pages.len() < row_count {
            log::warn!(
                "Database '{}' ({}): {} of {} rows could not be fetched",
                title,
                id,
                row_count - pages.len(),
                row_count
            );
        }

        Ok(Database {
            id: id.clone(),
            title,
            pages,
        })
    }

    async fn fetch_row(&self, database: &DatabaseId, position: usize, row: &Value) -> Option<Page> {
        let Some(page_id) = row_page_id(row) else {
            log::warn!(
                "Skipping row {} of database {}: missing or malformed id",
                position,
                database
            );
            return None;
        };

        let url = canonical_page_url(&page_id);
        match self.pages.fetch_page(&page_id, &url).await {
            Ok(page) => {
                log::debug!("Fetched row '{}' ({})", page.title, page_id);
                Some(page)
            }
            Err(e) => {
                log::warn!("Skipping row {} of database {}: {}", page_id, database, e);
                None
            }
        }
    }
}
