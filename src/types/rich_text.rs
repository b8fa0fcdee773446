use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One styled run of inline text inside a block or property.
///
/// Only the plain text survives decoding; styling annotations are not
/// rendered anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item with no link.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Decodes one wire run. Prefers `plain_text`, then `text.content`.
    pub fn from_wire(value: &Value) -> Self {
        let plain_text = value
            .get("plain_text")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("text")
                    .and_then(|t| t.get("content"))
                    .and_then(Value::as_str)
            })
            .unwrap_or_default()
            .to_string();

        let href = value.get("href").and_then(Value::as_str).map(str::to_string);

        Self { plain_text, href }
    }

    /// Encodes this run as a `text` rich-text object.
    pub fn to_wire(&self) -> Value {
        serde_json::json!({
            "type": "text",
            "text": { "content": self.plain_text, "link": null },
            "plain_text": self.plain_text,
            "href": self.href,
        })
    }
}

/// Decodes a wire rich-text array; anything that is not an array is empty.
pub fn rich_text_from_wire(value: Option<&Value>) -> Vec<RichTextItem> {
    value
        .and_then(Value::as_array)
        .map(|runs| runs.iter().map(RichTextItem::from_wire).collect())
        .unwrap_or_default()
}

/// Concatenates the plain text of every run, in order, with no separator.
pub fn concat_plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
