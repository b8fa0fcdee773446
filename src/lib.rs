// src/lib.rs
//! notion-book-ingest library: reads Notion pages and the databases embedded
//! in them and turns them into plain, serializable value trees.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `IngestConfig`, `CommandLineInput`
//! - **Domain model**: `Page`, `Database`, `Block`, `BlockTree`, `PropertyValue`
//! - **Domain types**: `NotionId`, `PageId`, `DatabaseId`, `ApiKey`
//! - **API access**: `NotionTransport`, `NotionHttpClient`, `NotionApi`
//! - **Ingestion**: `BookIngestor`, `PageReader`, `DatabaseFetcher`
//! - **Output**: response trees and delivery

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod ingest;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{classify_database_fetch_failure, AppError, DatabaseFetchFailure};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, IngestConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockTree, BlockVisitor, BookIngestionResult, Database, DecodedValue, Page,
    PropertyMap, PropertyValue,
};

// --- Domain Types ---
pub use crate::types::{
    extract_id_from_url, ApiKey, BlockId, DatabaseId, NotionId, PageId, PropertyName,
    RichTextItem,
};

// --- API Access ---
pub use crate::api::{ApiResponse, ClientSettings, NotionApi, NotionHttpClient, NotionTransport};

// --- Ingestion ---
pub use crate::ingest::{BookIngestor, DatabaseFetcher, FetchSettings, PageFetcher, PageReader};

// --- Formatting ---
pub use crate::formatting::{render_blocks, render_line, RenderMode, RenderOptions, TodoStyle};

// --- Output ---
pub use crate::output::{
    ExtractIdResponse, IngestionResponse, PageResponse, RawApiResponse,
};
