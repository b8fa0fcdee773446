// src/api/repository.rs
//! Typed endpoint access on top of a [`NotionTransport`].

use super::adapter::convert_blocks;
use super::parser::parse_api_response;
use super::responses::PaginatedResponse;
use super::{ApiResponse, NotionTransport};
use crate::error::AppError;
use crate::model::BlockTree;
use crate::types::{DatabaseId, Id, PageId};
use serde_json::{json, Value};
use std::sync::Arc;

/// The endpoints this crate reads, each returning checked JSON or
/// decoded domain values.
///
/// Cheap to clone; the transport is shared.
#[derive(Clone)]
pub struct NotionApi {
    transport: Arc<dyn NotionTransport>,
}

impl NotionApi {
    pub fn new(transport: Arc<dyn NotionTransport>) -> Self {
        Self { transport }
    }

    /// `GET pages/{id}`: the page object with its properties.
    pub async fn retrieve_page(&self, id: &PageId) -> Result<Value, AppError> {
        let response = self.transport.get(&format!("pages/{}", id)).await?;
        parse_api_response(response)
    }

    /// `GET blocks/{id}/children`: the first page of child blocks.
    pub async fn retrieve_children<T>(&self, parent: &Id<T>) -> Result<BlockTree, AppError> {
        let response = self
            .transport
            .get(&format!("blocks/{}/children", parent))
            .await?;
        let children = PaginatedResponse::from_value(parse_api_response(response)?);
        children.warn_if_truncated(&format!("Block {}", parent));
        Ok(convert_blocks(&children.results))
    }

    /// `GET databases/{id}`: the database object with its title.
    pub async fn retrieve_database(&self, id: &DatabaseId) -> Result<Value, AppError> {
        let response = self.transport.get(&format!("databases/{}", id)).await?;
        parse_api_response(response)
    }

    /// `POST databases/{id}/query` with an empty filter: the first page of rows.
    pub async fn query_rows(&self, id: &DatabaseId) -> Result<Vec<Value>, AppError> {
        let response = self
            .transport
            .post(&format!("databases/{}/query", id), &json!({}))
            .await?;
        let rows = PaginatedResponse::from_value(parse_api_response(response)?);
        rows.warn_if_truncated(&format!("Database {}", id));
        Ok(rows.results)
    }

    /// Any `GET` endpoint, returned without status checking.
    pub async fn raw_get(&self, endpoint: &str) -> Result<ApiResponse, AppError> {
        self.transport.get(endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// Answers every request with one canned response and records endpoints.
    struct CannedTransport {
        response: ApiResponse,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl NotionTransport for CannedTransport {
        async fn get(&self, endpoint: &str) -> Result<ApiResponse, AppError> {
            self.calls.lock().unwrap().push(format!("GET {}", endpoint));
            Ok(self.response.clone())
        }

        async fn post(&self, endpoint: &str, body: &Value) -> Result<ApiResponse, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("POST {} {}", endpoint, body));
            Ok(self.response.clone())
        }
    }

    fn api(status: StatusCode, body: Value) -> (NotionApi, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport {
            response: ApiResponse::json(status, "https://api.notion.com/v1/x", body),
            calls: Mutex::new(Vec::new()),
        });
        (NotionApi::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn query_posts_an_empty_filter() {
        let (api, transport) = api(
            StatusCode::OK,
            json!({ "results": [{ "id": "a" }], "has_more": true, "next_cursor": "c" }),
        );
        let id = DatabaseId::parse("16b9e94d1c9381cea6c4e74c508efea6").unwrap();

        let rows = api.query_rows(&id).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            transport.calls.lock().unwrap().as_slice(),
            ["POST databases/16b9e94d-1c93-81ce-a6c4-e74c508efea6/query {}"]
        );
    }

    #[tokio::test]
    async fn children_are_converted_in_order() {
        let (api, _) = api(
            StatusCode::OK,
            json!({ "results": [
                { "type": "heading_1", "heading_1": { "rich_text": [{ "plain_text": "One" }] } },
                { "type": "divider", "divider": {} }
            ] }),
        );
        let id = PageId::parse("16b9e94d1c9381cea6c4e74c508efea6").unwrap();

        let tree = api.retrieve_children(&id).await.unwrap();
        let types: Vec<_> = tree.roots().map(|b| b.block_type().to_string()).collect();
        assert_eq!(types, vec!["heading_1", "divider"]);
    }

    #[tokio::test]
    async fn raw_get_skips_status_checks() {
        let (api, _) = api(StatusCode::UNAUTHORIZED, json!({ "object": "error" }));
        let response = api.raw_get("users/me").await.unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);

        let id = PageId::parse("16b9e94d1c9381cea6c4e74c508efea6").unwrap();
        assert!(api.retrieve_page(&id).await.is_err());
    }
}
