//! Page property values: the typed wire form and its plain decoded form.
//!
//! Decoding is total. Any sub-field that is missing or has the wrong shape
//! degrades to the documented default for its tag instead of failing.

use crate::types::{concat_plain_text, rich_text_from_wire, RichTextItem};
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

/// A property value as tagged on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Date(Option<String>),
    Number(Option<Number>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    /// Any tag this crate does not model; keeps the raw property object.
    Unsupported { type_name: String, raw: Value },
}

/// The plain value a property decodes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Text(String),
    List(Vec<String>),
    Number(Option<Number>),
    Boolean(bool),
}

impl DecodedValue {
    /// Returns the text form if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl PropertyValue {
    /// Parses a wire property object such as `{"type": "select", "select": {...}}`.
    pub fn from_wire(value: &Value) -> Self {
        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let payload = value.get(type_name);

        match type_name {
            "title" => Self::Title(rich_text_from_wire(payload)),
            "rich_text" => Self::RichText(rich_text_from_wire(payload)),
            "select" => Self::Select(payload.and_then(option_name)),
            "multi_select" => Self::MultiSelect(
                payload
                    .and_then(Value::as_array)
                    .map(|options| {
                        options
                            .iter()
                            .map(|option| option_name(option).unwrap_or_default())
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            "date" => Self::Date(
                payload
                    .and_then(|date| date.get("start"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            ),
            "number" => Self::Number(payload.and_then(Value::as_number).cloned()),
            "checkbox" => Self::Checkbox(payload.and_then(Value::as_bool).unwrap_or(false)),
            "url" => Self::Url(owned_str(payload)),
            "email" => Self::Email(owned_str(payload)),
            "phone_number" => Self::PhoneNumber(owned_str(payload)),
            other => Self::Unsupported {
                type_name: other.to_string(),
                raw: value.clone(),
            },
        }
    }

    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Title(_) => "title",
            Self::RichText(_) => "rich_text",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Date(_) => "date",
            Self::Number(_) => "number",
            Self::Checkbox(_) => "checkbox",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::Unsupported { type_name, .. } => type_name,
        }
    }

    /// Decodes to the plain value handed to callers.
    pub fn decode(&self) -> DecodedValue {
        match self {
            Self::Title(runs) => DecodedValue::Text(
                runs.first()
                    .map(|run| run.plain_text.clone())
                    .unwrap_or_default(),
            ),
            Self::RichText(runs) => DecodedValue::Text(concat_plain_text(runs)),
            Self::Select(name) | Self::Date(name) => {
                DecodedValue::Text(name.clone().unwrap_or_default())
            }
            Self::Url(text) | Self::Email(text) | Self::PhoneNumber(text) => {
                DecodedValue::Text(text.clone().unwrap_or_default())
            }
            Self::MultiSelect(names) => DecodedValue::List(names.clone()),
            Self::Number(number) => DecodedValue::Number(number.clone()),
            Self::Checkbox(checked) => DecodedValue::Boolean(*checked),
            Self::Unsupported { raw, .. } => DecodedValue::Text(raw.to_string()),
        }
    }

    /// Encodes back into the wire shape `from_wire` accepts.
    pub fn to_wire(&self) -> Value {
        let payload = match self {
            Self::Title(runs) | Self::RichText(runs) => {
                Value::Array(runs.iter().map(RichTextItem::to_wire).collect())
            }
            Self::Select(name) => name
                .as_ref()
                .map(|name| json!({ "name": name }))
                .unwrap_or(Value::Null),
            Self::MultiSelect(names) => {
                Value::Array(names.iter().map(|name| json!({ "name": name })).collect())
            }
            Self::Date(start) => start
                .as_ref()
                .map(|start| json!({ "start": start, "end": null }))
                .unwrap_or(Value::Null),
            Self::Number(number) => number.clone().map(Value::Number).unwrap_or(Value::Null),
            Self::Checkbox(checked) => Value::Bool(*checked),
            Self::Url(text) | Self::Email(text) | Self::PhoneNumber(text) => {
                text.clone().map(Value::String).unwrap_or(Value::Null)
            }
            Self::Unsupported { raw, .. } => return raw.clone(),
        };

        let mut wire = serde_json::Map::new();
        wire.insert("type".to_string(), Value::String(self.type_name().to_string()));
        wire.insert(self.type_name().to_string(), payload);
        Value::Object(wire)
    }
}

fn option_name(option: &Value) -> Option<String> {
    option.get("name").and_then(Value::as_str).map(str::to_string)
}

fn owned_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
