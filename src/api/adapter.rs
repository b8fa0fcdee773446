// src/api/adapter.rs
//! Adapter layer for converting raw Notion JSON into the domain model.
//!
//! Every function here is total. A missing or mistyped field takes its
//! documented default so one odd object never sinks a whole fetch.

use crate::constants::{NOTION_PAGE_HOST, UNTITLED_CHILD_DATABASE, UNTITLED_DATABASE, UNTITLED_PAGE};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, BlockTree, DecodedValue, PropertyMap, PropertyValue};
use crate::types::{rich_text_from_wire, BlockId, PageId, PropertyName};
use serde_json::Value;

/// Convert a wire block object into a domain block.
pub fn convert_block(value: &Value) -> Block {
    let common = convert_block_common(value);
    let block_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let payload = value.get(block_type);
    let content = convert_text_block_content(payload);

    let text_block =
        |common: BlockCommon, content: TextBlockContent| TextBlock { common, content };

    match block_type {
        "paragraph" => Block::Paragraph(text_block(common, content)),
        "heading_1" => Block::Heading1(text_block(common, content)),
        "heading_2" => Block::Heading2(text_block(common, content)),
        "heading_3" => Block::Heading3(text_block(common, content)),
        "bulleted_list_item" => Block::BulletedListItem(text_block(common, content)),
        "numbered_list_item" => Block::NumberedListItem(text_block(common, content)),
        "quote" => Block::Quote(text_block(common, content)),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content,
            checked: payload
                .and_then(|p| p.get("checked"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }),
        "code" => Block::Code(CodeBlock {
            common,
            content,
            language: payload
                .and_then(|p| p.get("language"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            content,
            icon: payload.and_then(|p| p.get("icon")).and_then(convert_icon),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "child_database" => Block::ChildDatabase(ChildDatabaseBlock {
            common,
            title: payload
                .and_then(|p| p.get("title"))
                .and_then(Value::as_str)
                .filter(|title| !title.is_empty())
                .unwrap_or(UNTITLED_CHILD_DATABASE)
                .to_string(),
        }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    }
}

/// Convert a list of wire blocks into a flat tree, preserving order.
pub fn convert_blocks(values: &[Value]) -> BlockTree {
    BlockTree::from_roots(values.iter().map(convert_block).collect())
}

/// Convert block common fields
fn convert_block_common(value: &Value) -> BlockCommon {
    let id = value.get("id").and_then(Value::as_str).and_then(|raw| {
        BlockId::parse(raw)
            .map_err(|e| log::debug!("Block with unusable id {:?}: {}", raw, e))
            .ok()
    });

    BlockCommon {
        id,
        has_children: value
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// Convert the `rich_text` array of a block payload
fn convert_text_block_content(payload: Option<&Value>) -> TextBlockContent {
    TextBlockContent::new(rich_text_from_wire(payload.and_then(|p| p.get("rich_text"))))
}

/// Convert icon; only emoji icons carry something renderable
fn convert_icon(icon: &Value) -> Option<Icon> {
    if icon.is_null() {
        return None;
    }
    let emoji = icon.get("emoji").and_then(Value::as_str);
    Some(emoji.map_or(Icon::Other, |emoji| Icon::Emoji(emoji.to_string())))
}

/// Extract page title from properties.
///
/// Takes the first property tagged `title`, whatever its name.
pub fn extract_page_title(page: &Value) -> String {
    page.get("properties")
        .and_then(Value::as_object)
        .and_then(|properties| {
            properties
                .values()
                .find(|property| property.get("type").and_then(Value::as_str) == Some("title"))
        })
        .map(|property| PropertyValue::from_wire(property).decode())
        .and_then(|decoded| match decoded {
            DecodedValue::Text(title) if !title.is_empty() => Some(title),
            _ => None,
        })
        .unwrap_or_else(|| UNTITLED_PAGE.to_string())
}

/// Convert page properties, keyed by name in API order.
pub fn convert_page_properties(page: &Value) -> PropertyMap {
    page.get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| {
                    (
                        PropertyName::new(name.as_str()),
                        PropertyValue::from_wire(property).decode(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Extract database title: the first title run's plain text.
pub fn extract_database_title(database: &Value) -> String {
    rich_text_from_wire(database.get("title"))
        .into_iter()
        .next()
        .map(|run| run.plain_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED_DATABASE.to_string())
}

/// The page id of a database query row, if it has a usable one.
pub fn row_page_id(row: &Value) -> Option<PageId> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|raw| PageId::parse(raw).ok())
}

/// The public URL of a page: the host followed by the compact id.
pub fn canonical_page_url(id: &PageId) -> String {
    format!("{}/{}", NOTION_PAGE_HOST, id.to_compact())
}
