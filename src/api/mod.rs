// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! I/O lives behind [`NotionTransport`]; status checking lives in
//! [`parser`]; turning raw JSON into domain values lives in [`adapter`].
//! Business logic only ever sees [`NotionApi`].

pub mod adapter;
pub mod client;
pub mod parser;
mod repository;
pub mod responses;

use crate::error::AppError;
use reqwest::StatusCode;
use serde_json::Value;

pub use client::{ClientSettings, NotionHttpClient};
pub use repository::NotionApi;

/// The body of an API response: JSON when it parsed, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parses `text` as JSON, keeping it verbatim when it is not.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub url: String,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn json(status: StatusCode, url: impl Into<String>, body: Value) -> Self {
        Self {
            status,
            url: url.into(),
            body: ResponseBody::Json(body),
        }
    }
}

/// The ability to send requests to the Notion API.
///
/// Endpoints are paths relative to the API base URL, such as
/// `pages/<id>` or `databases/<id>/query`. Implementations return every
/// completed exchange, whatever its status; only transport failures are
/// errors.
#[async_trait::async_trait]
pub trait NotionTransport: Send + Sync {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse, AppError>;
    async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse, AppError>;
}
