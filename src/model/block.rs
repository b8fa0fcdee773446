use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{concat_plain_text, BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents every Notion block type this crate distinguishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    Quote(TextBlock),
    ToDo(ToDoBlock),
    Code(CodeBlock),
    Callout(CalloutBlock),
    Divider(DividerBlock),
    ChildDatabase(ChildDatabaseBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID, if the API supplied a valid one
    pub fn id(&self) -> Option<&BlockId> {
        self.common().id.as_ref()
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::Quote(_) => "quote",
            Block::ToDo(_) => "to_do",
            Block::Code(_) => "code",
            Block::Callout(_) => "callout",
            Block::Divider(_) => "divider",
            Block::ChildDatabase(_) => "child_database",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// The block's inline text runs. Empty for blocks that carry none.
    pub fn rich_text(&self) -> &[RichTextItem] {
        match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Quote(b) => &b.content.rich_text,
            Block::ToDo(b) => &b.content.rich_text,
            Block::Code(b) => &b.content.rich_text,
            Block::Callout(b) => &b.content.rich_text,
            Block::Divider(_) | Block::ChildDatabase(_) | Block::Unsupported(_) => &[],
        }
    }

    /// Concatenated plain text of all runs.
    pub fn plain_text(&self) -> String {
        concat_plain_text(self.rich_text())
    }

    /// Accept a visitor
    pub fn accept<V: BlockVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Block::Paragraph(b) => visitor.visit_paragraph(&b.content),
            Block::Heading1(b) => visitor.visit_heading(1, &b.content),
            Block::Heading2(b) => visitor.visit_heading(2, &b.content),
            Block::Heading3(b) => visitor.visit_heading(3, &b.content),
            Block::BulletedListItem(b) => visitor.visit_bulleted_list_item(&b.content),
            Block::NumberedListItem(b) => visitor.visit_numbered_list_item(&b.content),
            Block::Quote(b) => visitor.visit_quote(&b.content),
            Block::ToDo(b) => visitor.visit_todo(b),
            Block::Code(b) => visitor.visit_code(b),
            Block::Callout(b) => visitor.visit_callout(b),
            Block::Divider(_) => visitor.visit_divider(),
            Block::ChildDatabase(b) => visitor.visit_child_database(b),
            Block::Unsupported(b) => visitor.visit_unsupported(&b.block_type),
        }
    }
}

/// Visitor trait for traversing block structures.
///
/// All methods have default implementations that return `Default::default()`,
/// so implementors only need to override the methods they care about.
pub trait BlockVisitor {
    type Output: Default;

    fn visit_paragraph(&mut self, _content: &TextBlockContent) -> Self::Output {
        Default::default()
    }
    fn visit_heading(&mut self, _level: u8, _content: &TextBlockContent) -> Self::Output {
        Default::default()
    }
    fn visit_bulleted_list_item(&mut self, _content: &TextBlockContent) -> Self::Output {
        Default::default()
    }
    fn visit_numbered_list_item(&mut self, _content: &TextBlockContent) -> Self::Output {
        Default::default()
    }
    fn visit_quote(&mut self, _content: &TextBlockContent) -> Self::Output {
        Default::default()
    }
    fn visit_todo(&mut self, _todo: &ToDoBlock) -> Self::Output {
        Default::default()
    }
    fn visit_code(&mut self, _code: &CodeBlock) -> Self::Output {
        Default::default()
    }
    fn visit_callout(&mut self, _callout: &CalloutBlock) -> Self::Output {
        Default::default()
    }
    fn visit_divider(&mut self) -> Self::Output {
        Default::default()
    }
    fn visit_child_database(&mut self, _database: &ChildDatabaseBlock) -> Self::Output {
        Default::default()
    }
    fn visit_unsupported(&mut self, _block_type: &str) -> Self::Output {
        Default::default()
    }
}
