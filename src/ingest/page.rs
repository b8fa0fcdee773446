// src/ingest/page.rs
//! Single page retrieval: metadata and top-level blocks, rendered.

use crate::api::adapter::{convert_page_properties, extract_page_title};
use crate::api::NotionApi;
use crate::error::{AppError, EntityKind};
use crate::formatting::{render_tree, RenderOptions};
use crate::model::Page;
use crate::types::PageId;

/// Fetches one page and renders its content.
#[derive(Clone)]
pub struct PageFetcher {
    api: NotionApi,
    render: RenderOptions,
}

impl PageFetcher {
    pub fn new(api: NotionApi, render: RenderOptions) -> Self {
        Self { api, render }
    }

    /// Fetches the page object and its children concurrently and builds a
    /// [`Page`] whose `url` is the one given.
    ///
    /// Any failure is reported as [`AppError::FetchFailed`] for this page.
    pub async fn fetch_page(&self, id: &PageId, url: &str) -> Result<Page, AppError> {
        log::debug!("Fetching page {}", id);

        let (metadata, blocks) =
            tokio::try_join!(self.api.retrieve_page(id), self.api.retrieve_children(id))
                .map_err(|e| AppError::fetch_failed(EntityKind::Page, id, e))?;

        let title = extract_page_title(&metadata);
        let properties = convert_page_properties(&metadata);
        let content = render_tree(&blocks, &self.render);

        log::debug!(
            "Page '{}' ({}): {} blocks, {} properties",
            title,
            id,
            blocks.len(),
            properties.len()
        );
        let unexpanded = blocks.unexpanded_roots();
        if unexpanded > 0 {
            log::debug!(
                "Page {} has {} blocks with nested children that were not fetched",
                id,
                unexpanded
            );
        }

        Ok(Page {
            id: id.clone(),
            title,
            url: url.to_string(),
            properties,
            blocks,
            content,
        })
    }
}
