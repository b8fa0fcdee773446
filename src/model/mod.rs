mod block;
pub mod blocks;
pub mod common;
mod property_value;
mod tree;

pub use block::{Block, BlockVisitor};
pub use blocks::*;
pub use common::*;
pub use property_value::{DecodedValue, PropertyValue};
pub use tree::{BlockTree, NodeIndex};

use crate::types::{DatabaseId, PageId, PropertyName};
use indexmap::IndexMap;
use serde::Serialize;

/// Decoded page properties in API order.
pub type PropertyMap = IndexMap<PropertyName, DecodedValue>;

/// A Notion page with its rendered content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub url: String,
    pub properties: PropertyMap,
    pub blocks: BlockTree,
    /// Markdown rendering of `blocks`.
    pub content: String,
}

/// A Notion database and the pages of the rows that fetched successfully
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Database {
    pub id: DatabaseId,
    pub title: String,
    pub pages: Vec<Page>,
}

impl Database {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// A `child_database` block found on the root page during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredDatabase {
    pub id: DatabaseId,
    pub title: String,
}

/// Everything gathered from one book ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookIngestionResult {
    pub book: Page,
    /// The first database that expanded successfully, in discovery order.
    pub chapters: Option<Database>,
    pub other_databases: Vec<Database>,
    pub total_chapters: usize,
    pub total_pages: usize,
}

impl BookIngestionResult {
    /// Classifies expanded databases by position and computes the totals.
    pub fn assemble(book: Page, databases: Vec<Database>) -> Self {
        let total_pages = databases.iter().map(Database::page_count).sum();
        let mut databases = databases.into_iter();
        let chapters = databases.next();
        let total_chapters = chapters.as_ref().map_or(0, Database::page_count);

        Self {
            book,
            chapters,
            other_databases: databases.collect(),
            total_chapters,
            total_pages,
        }
    }

    pub fn databases_found(&self) -> usize {
        usize::from(self.chapters.is_some()) + self.other_databases.len()
    }
}
