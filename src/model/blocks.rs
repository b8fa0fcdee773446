use super::common::BlockCommon;
use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// Text content block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }
}

/// A block whose only payload is its text: paragraphs, headings, list
/// items and quotes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Code block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub language: String,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub icon: Option<Icon>,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Icon {
    Emoji(String),
    /// External or uploaded image icons; rendered as the default emoji.
    Other,
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji(emoji) => Some(emoji),
            Icon::Other => None,
        }
    }
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Child database block. Its id is the id of the database it hosts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildDatabaseBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Any block type without a dedicated rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
