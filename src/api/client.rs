// src/api/client.rs
//! HTTP transport for the Notion API.
//!
//! A thin wrapper around reqwest that handles authentication headers, the
//! per-request timeout and request/response logging. It does no parsing
//! beyond splitting JSON from text bodies.

use super::{ApiResponse, NotionTransport, ResponseBody};
use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, ERROR_BODY_PREVIEW_LENGTH, MASKED_HEADER_VISIBLE_CHARS,
    NOTION_API_BASE_URL, NOTION_API_VERSION,
};
use crate::error::AppError;
use crate::types::ApiKey;
use reqwest::{header, Client, Method};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Headers whose values never reach the log in full.
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "x-api-key", "cookie", "set-cookie"];

/// Connection settings for [`NotionHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: NOTION_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    headers: header::HeaderMap,
    settings: ClientSettings,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, settings: ClientSettings) -> Result<Self, AppError> {
        let headers = Self::create_headers(api_key)?;
        let client = Client::builder()
            .default_headers(headers.clone())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            headers,
            settings,
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, AppError> {
        let url = self.url_for(endpoint);
        log::debug!(
            "{} {} (timeout {:?}) headers: {}",
            method,
            url,
            self.settings.timeout,
            describe_headers(&self.headers)
        );
        if let Some(body) = body {
            log::debug!("Request body: {}", body);
        }

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{} {} failed after {:?}: {}", method, url, started.elapsed(), err);
                return Err(err.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;
        let elapsed_ms = started.elapsed().as_millis();

        log::debug!("{} {} -> {} in {}ms", method, url, status, elapsed_ms);
        if !status.is_success() {
            log::warn!(
                "{} {} returned {} in {}ms: {}",
                method,
                url,
                status,
                elapsed_ms,
                body_preview(&text)
            );
        }

        Ok(ApiResponse {
            status,
            url,
            body: ResponseBody::from_text(text),
        })
    }
}

#[async_trait::async_trait]
impl NotionTransport for NotionHttpClient {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse, AppError> {
        self.send(Method::GET, endpoint, None).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse, AppError> {
        self.send(Method::POST, endpoint, Some(body)).await
    }
}

/// Masks a sensitive value down to its last few characters.
pub fn mask_sensitive(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= MASKED_HEADER_VISIBLE_CHARS {
        return "***".to_string();
    }
    let tail: String = chars[chars.len() - MASKED_HEADER_VISIBLE_CHARS..]
        .iter()
        .collect();
    format!("***{}", tail)
}

fn describe_headers(headers: &header::HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                format!("{}: {}", name, mask_sensitive(value))
            } else {
                format!("{}: {}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The first characters of a body, with `...` appended when cut.
pub fn body_preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
