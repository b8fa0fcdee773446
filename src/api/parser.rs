// src/api/parser.rs
//! Status checking for Notion API responses.
//!
//! Successful responses yield their JSON body for the adapter to decode.
//! Everything else becomes a typed [`AppError::NotionService`].

use super::{ApiResponse, ResponseBody};
use crate::error::{AppError, NotionErrorCode};
use serde_json::Value;

/// Checks the status of a response and returns its JSON body.
///
/// A successful response with a non-JSON body yields `Value::Null`, so
/// every field the caller looks up falls back to its default.
pub fn parse_api_response(response: ApiResponse) -> Result<Value, AppError> {
    if response.status.is_success() {
        return Ok(match response.body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => {
                log::warn!(
                    "Expected JSON from {} but got {} bytes of text",
                    response.url,
                    text.len()
                );
                Value::Null
            }
        });
    }

    Err(parse_error_response(&response))
}

/// Decodes a Notion error object, falling back to the HTTP status.
fn parse_error_response(response: &ApiResponse) -> AppError {
    let status = response.status;
    let error_object = response
        .body
        .as_json()
        .filter(|body| body.get("object").and_then(Value::as_str) == Some("error"));

    let (code, message) = match error_object {
        Some(body) => (
            body.get("code")
                .and_then(Value::as_str)
                .map(NotionErrorCode::from_api_response)
                .unwrap_or_else(|| NotionErrorCode::from_http_status(status.as_u16())),
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {} from {}", status, response.url)),
        ),
        None => (
            NotionErrorCode::from_http_status(status.as_u16()),
            format!("HTTP {} from {}", status, response.url),
        ),
    };

    AppError::NotionService {
        code,
        message,
        status,
        url: response.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    const URL: &str = "https://api.notion.com/v1/pages/abc";

    #[test]
    fn success_yields_body() {
        let body = json!({ "object": "page", "id": "abc" });
        let parsed = parse_api_response(ApiResponse::json(StatusCode::OK, URL, body.clone()));
        assert_eq!(parsed.unwrap(), body);
    }

    #[test]
    fn success_with_text_body_degrades_to_null() {
        let response = ApiResponse {
            status: StatusCode::OK,
            url: URL.to_string(),
            body: ResponseBody::Text("<html>".to_string()),
        };
        assert_eq!(parse_api_response(response).unwrap(), Value::Null);
    }

    #[test]
    fn notion_error_objects_are_decoded() {
        let body = json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: abc",
        });
        let err = parse_api_response(ApiResponse::json(StatusCode::NOT_FOUND, URL, body))
            .unwrap_err();

        match err {
            AppError::NotionService {
                code,
                message,
                status,
                url,
            } => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(message, "Could not find page with ID: abc");
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(url, URL);
            }
            other => panic!("expected NotionService, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_errors_fall_back_to_status() {
        let response = ApiResponse {
            status: StatusCode::BAD_GATEWAY,
            url: URL.to_string(),
            body: ResponseBody::Text("upstream down".to_string()),
        };
        match parse_api_response(response).unwrap_err() {
            AppError::NotionService { code, .. } => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502))
            }
            other => panic!("expected NotionService, got {:?}", other),
        }
    }
}
