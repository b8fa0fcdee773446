// src/output/responses.rs
//! Serializable response trees handed to the outer layer.
//!
//! These are plain value trees: ids as hyphenated strings, properties as a
//! name-to-value map in API order, content as markdown.

use crate::api::{ApiResponse, ResponseBody};
use crate::constants::CONTENT_PREVIEW_LENGTH;
use crate::model::{BookIngestionResult, Database, Page, PropertyMap};
use crate::types::{DatabaseId, NotionId, PageId};
use serde::Serialize;
use serde_json::Value;

/// A single page read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResponse {
    pub page_id: PageId,
    pub title: String,
    pub content: String,
    pub url: String,
    pub properties: PropertyMap,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            page_id: page.id,
            title: page.title,
            content: page.content,
            url: page.url,
            properties: page.properties,
        }
    }
}

/// The outcome of a book ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub book: BookSummary,
    pub summary: IngestionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<ChaptersSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_databases: Vec<DatabaseSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: PageId,
    pub title: String,
    pub url: String,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub total_chapters: usize,
    pub total_pages: usize,
    pub databases_found: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChaptersSection {
    pub database_id: DatabaseId,
    pub database_title: String,
    pub chapters: Vec<ChapterSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSummary {
    pub id: PageId,
    pub title: String,
    pub url: String,
    pub properties: PropertyMap,
    pub content_preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseSummary {
    pub id: DatabaseId,
    pub title: String,
    pub page_count: usize,
}

impl From<BookIngestionResult> for IngestionResponse {
    fn from(result: BookIngestionResult) -> Self {
        let summary = IngestionSummary {
            total_chapters: result.total_chapters,
            total_pages: result.total_pages,
            databases_found: result.databases_found(),
        };

        Self {
            status: "success",
            message: "Book ingestion completed successfully",
            book: BookSummary {
                id: result.book.id,
                title: result.book.title,
                url: result.book.url,
                properties: result.book.properties,
            },
            summary,
            chapters: result.chapters.map(chapters_section),
            other_databases: result
                .other_databases
                .iter()
                .map(|database| DatabaseSummary {
                    id: database.id.clone(),
                    title: database.title.clone(),
                    page_count: database.page_count(),
                })
                .collect(),
        }
    }
}

fn chapters_section(database: Database) -> ChaptersSection {
    ChaptersSection {
        database_id: database.id,
        database_title: database.title,
        chapters: database
            .pages
            .into_iter()
            .map(|page| ChapterSummary {
                content_preview: content_preview(&page.content),
                id: page.id,
                title: page.title,
                url: page.url,
                properties: page.properties,
            })
            .collect(),
    }
}

/// The first characters of `content`, with `...` appended when cut.
pub fn content_preview(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// The ID found in a URL, without fetching anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractIdResponse {
    pub page_id: NotionId,
    pub url: String,
}

/// An unchecked API exchange, for debugging access problems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawApiResponse {
    pub page_id: PageId,
    pub status_code: u16,
    pub success: bool,
    pub response: Value,
}

impl RawApiResponse {
    pub fn new(page_id: PageId, response: ApiResponse) -> Self {
        Self {
            page_id,
            status_code: response.status.as_u16(),
            success: response.status.is_success(),
            response: match response.body {
                ResponseBody::Json(value) => value,
                ResponseBody::Text(text) => Value::String(text),
            },
        }
    }
}
