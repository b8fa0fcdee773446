// src/ingest/mod.rs
//! Fetching pages, databases and whole books from a workspace.
//!
//! Each fetcher builds fresh, read-only entities per call. Nothing is cached
//! and nothing is shared between calls except the transport.

mod book;
mod database;
mod page;
mod reader;

pub use book::BookIngestor;
pub use database::DatabaseFetcher;
pub use page::PageFetcher;
pub use reader::PageReader;

use crate::constants::{MAX_CONCURRENCY, MAX_DEFAULT_CONCURRENCY, MIN_DEFAULT_CONCURRENCY};
use crate::formatting::RenderOptions;

/// Knobs shared by every fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub render: RenderOptions,
    /// How many database rows are fetched at once.
    pub concurrency: usize,
}

impl FetchSettings {
    pub fn new(render: RenderOptions, concurrency: Option<usize>) -> Self {
        Self {
            render,
            concurrency: resolve_concurrency(concurrency),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::new(RenderOptions::default(), None)
    }
}

/// Row fetch concurrency: the requested value, or the CPU count clamped to
/// a sensible range, and never more than the hard cap.
pub fn resolve_concurrency(requested: Option<usize>) -> usize {
    requested
        .unwrap_or_else(|| num_cpus::get().clamp(MIN_DEFAULT_CONCURRENCY, MAX_DEFAULT_CONCURRENCY))
        .clamp(1, MAX_CONCURRENCY)
}
