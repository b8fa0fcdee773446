// src/ingest/book.rs
//! Book ingestion: a root page, the databases embedded in it, and their rows.
//!
//! The run reads as a sequence of named stages:
//!   1. Resolve the URL to a page id
//!   2. Fetch the root page
//!   3. Discover the `child_database` blocks on it
//!   4. Expand each one into a full database
//!   5. Classify the first expanded database as the chapters
//!   6. Aggregate the counts
//!
//! Stages 1 and 2 are fatal. Discovery and expansion are best-effort per item.

use super::{DatabaseFetcher, FetchSettings, PageFetcher};
use crate::api::NotionApi;
use crate::error::{classify_database_fetch_failure, AppError};
use crate::model::{BookIngestionResult, Database, DiscoveredDatabase, Page};
use crate::types::{extract_id_from_url, PageId};

/// Ingests a book-shaped page and every database embedded in it.
#[derive(Clone)]
pub struct BookIngestor {
    pages: PageFetcher,
    databases: DatabaseFetcher,
}

impl BookIngestor {
    pub fn new(api: NotionApi, settings: FetchSettings) -> Self {
        let pages = PageFetcher::new(api.clone(), settings.render);
        let databases = DatabaseFetcher::new(api, pages.clone(), settings.concurrency);
        Self { pages, databases }
    }

    /// Runs a full ingestion for the book page at `url`.
    pub async fn ingest_book(&self, url: &str) -> Result<BookIngestionResult, AppError> {
        log::info!("Starting book ingestion for {}", url);

        let book_id = resolve(url)?;
        let book = self.pages.fetch_page(&book_id, url).await?;
        log::info!("Book: {} ({})", book.title, book.id);

        let discovered = discover(&book);
        let expanded = self.expand(&discovered).await;
        let result = BookIngestionResult::assemble(book, expanded);

        if let Some(chapters) = &result.chapters {
            log::info!("Using '{}' ({}) as the chapters database", chapters.title, chapters.id);
        }
        log::info!(
            "Ingested '{}': {} chapters, {} total pages, {} databases found",
            result.book.title,
            result.total_chapters,
            result.total_pages,
            result.databases_found()
        );

        Ok(result)
    }

    /// Expands discovered databases one by one, dropping the ones that fail.
    async fn expand(&self, discovered: &[DiscoveredDatabase]) -> Vec<Database> {
        let mut databases = Vec::with_capacity(discovered.len());

        for found in discovered {
            match self.databases.fetch_database(&found.id).await {
                Ok(database) => {
                    log::info!(
                        "Expanded database '{}' ({}) with {} pages",
                        database.title,
                        database.id,
                        database.page_count()
                    );
                    databases.push(database);
                }
                Err(e) => log::warn!(
                    "Dropping database '{}' ({}): {}",
                    found.title,
                    found.id,
                    classify_database_fetch_failure(&e)
                ),
            }
        }

        databases
    }
}

fn resolve(url: &str) -> Result<PageId, AppError> {
    extract_id_from_url(url)
        .map(|id| id.cast())
        .ok_or_else(|| AppError::InvalidReference {
            url: url.to_string(),
        })
}

/// The `child_database` blocks among the page's top-level blocks, in order.
fn discover(page: &Page) -> Vec<DiscoveredDatabase> {
    page.blocks
        .child_databases()
        .filter_map(|block| match &block.common.id {
            Some(id) => {
                log::info!("Found database '{}' ({})", block.title, id);
                Some(DiscoveredDatabase {
                    id: id.cast(),
                    title: block.title.clone(),
                })
            }
            None => {
                log::warn!(
                    "Skipping child database '{}' with no usable id",
                    block.title
                );
                None
            }
        })
        .collect()
}
