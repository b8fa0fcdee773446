// src/ingest/reader.rs
//! Reading a single page by URL.

use super::PageFetcher;
use crate::api::NotionApi;
use crate::error::AppError;
use crate::formatting::RenderOptions;
use crate::model::Page;
use crate::types::{extract_id_from_url, PageId};

/// Resolves a page URL and fetches that one page.
#[derive(Clone)]
pub struct PageReader {
    pages: PageFetcher,
}

impl PageReader {
    pub fn new(api: NotionApi, render: RenderOptions) -> Self {
        Self {
            pages: PageFetcher::new(api, render),
        }
    }

    /// Fetches the page behind `url`, keeping `url` as the page's URL.
    pub async fn read_page(&self, url: &str) -> Result<Page, AppError> {
        let id: PageId = extract_id_from_url(url)
            .ok_or_else(|| AppError::InvalidReference {
                url: url.to_string(),
            })?
            .cast();

        log::info!("Reading page {} from {}", id, url);
        self.pages.fetch_page(&id, url).await
    }
}
