// tests/common/mod.rs
//! Shared test utilities: an in-memory transport and wire JSON builders.
#![allow(dead_code)]

use notion_book_ingest::api::{ApiResponse, NotionApi, NotionTransport, ResponseBody};
use notion_book_ingest::AppError;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BOOK_URL: &str = "https://www.notion.so/Book-1-Jack-16b9e94d1c9381cea6c4e74c508efea6";
pub const BOOK_ID: &str = "16b9e94d-1c93-81ce-a6c4-e74c508efea6";
pub const CHAPTERS_DB: &str = "aaaaaaaa-0000-4000-8000-000000000001";
pub const CHARACTERS_DB: &str = "aaaaaaaa-0000-4000-8000-000000000002";
pub const CHAPTER_IDS: [&str; 3] = [
    "bbbbbbbb-0000-4000-8000-000000000001",
    "bbbbbbbb-0000-4000-8000-000000000002",
    "bbbbbbbb-0000-4000-8000-000000000003",
];
pub const CHARACTER_ID: &str = "cccccccc-0000-4000-8000-000000000001";

#[derive(Clone)]
enum Reply {
    Respond { status: StatusCode, body: ResponseBody },
    ConnectionLost,
}

/// Serves canned replies keyed by `"GET <endpoint>"` / `"POST <endpoint>"`.
///
/// Unknown routes answer with Notion's 404 `object_not_found` error. Every
/// request is recorded in order.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, endpoint: &str, body: Value) -> Self {
        self.route("GET", endpoint, StatusCode::OK, body)
    }

    pub fn on_post(self, endpoint: &str, body: Value) -> Self {
        self.route("POST", endpoint, StatusCode::OK, body)
    }

    /// Answers `GET endpoint` with a Notion error object.
    pub fn get_error(self, endpoint: &str, status: StatusCode, code: &str, message: &str) -> Self {
        self.route("GET", endpoint, status, error_json(status, code, message))
    }

    /// Answers `POST endpoint` with a Notion error object.
    pub fn post_error(self, endpoint: &str, status: StatusCode, code: &str, message: &str) -> Self {
        self.route("POST", endpoint, status, error_json(status, code, message))
    }

    /// Answers `GET endpoint` with a non-JSON body.
    pub fn get_text(mut self, endpoint: &str, status: StatusCode, text: &str) -> Self {
        self.routes.insert(
            format!("GET {}", endpoint),
            Reply::Respond {
                status,
                body: ResponseBody::Text(text.to_string()),
            },
        );
        self
    }

    /// Makes `GET endpoint` fail before any response arrives.
    pub fn drop_get(mut self, endpoint: &str) -> Self {
        self.routes
            .insert(format!("GET {}", endpoint), Reply::ConnectionLost);
        self
    }

    fn route(mut self, method: &str, endpoint: &str, status: StatusCode, body: Value) -> Self {
        self.routes.insert(
            format!("{} {}", method, endpoint),
            Reply::Respond {
                status,
                body: ResponseBody::Json(body),
            },
        );
        self
    }

    /// Requests received so far, as `"METHOD endpoint"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, key: &str) -> usize {
        self.calls().iter().filter(|call| call.as_str() == key).count()
    }

    fn answer(&self, key: String) -> Result<ApiResponse, AppError> {
        self.calls.lock().unwrap().push(key.clone());
        let url = format!("https://api.notion.com/v1/{}", key.split_once(' ').unwrap().1);

        match self.routes.get(&key).cloned() {
            Some(Reply::Respond { status, body }) => Ok(ApiResponse { status, url, body }),
            Some(Reply::ConnectionLost) => Err(AppError::InternalError {
                message: format!("connection reset while requesting {}", url),
                source: None,
            }),
            None => Ok(ApiResponse::json(
                StatusCode::NOT_FOUND,
                url,
                error_json(StatusCode::NOT_FOUND, "object_not_found", "Could not find object"),
            )),
        }
    }
}

#[async_trait::async_trait]
impl NotionTransport for MockTransport {
    async fn get(&self, endpoint: &str) -> Result<ApiResponse, AppError> {
        self.answer(format!("GET {}", endpoint))
    }

    async fn post(&self, endpoint: &str, _body: &Value) -> Result<ApiResponse, AppError> {
        self.answer(format!("POST {}", endpoint))
    }
}

/// Wraps the transport in an API handle, keeping a handle for inspection.
pub fn api(transport: MockTransport) -> (NotionApi, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let shared: Arc<dyn NotionTransport> = transport.clone();
    (NotionApi::new(shared), transport)
}

// --- Fixtures ---

pub fn fixture(name: &str) -> Value {
    let text = match name {
        "book_page" => include_str!("../fixtures/api_responses/book_page.json"),
        "book_blocks" => include_str!("../fixtures/api_responses/book_blocks.json"),
        "chapters_database" => include_str!("../fixtures/api_responses/chapters_database.json"),
        "chapters_query" => include_str!("../fixtures/api_responses/chapters_query.json"),
        "characters_database" => {
            include_str!("../fixtures/api_responses/characters_database.json")
        }
        "characters_query" => include_str!("../fixtures/api_responses/characters_query.json"),
        other => panic!("unknown fixture {}", other),
    };
    serde_json::from_str(text).unwrap()
}

/// The whole book workspace: root page, two databases and their rows.
pub fn book_workspace() -> MockTransport {
    let mut transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), fixture("book_page"))
        .on_get(&format!("blocks/{}/children", BOOK_ID), fixture("book_blocks"))
        .on_get(&format!("databases/{}", CHAPTERS_DB), fixture("chapters_database"))
        .on_post(&format!("databases/{}/query", CHAPTERS_DB), fixture("chapters_query"))
        .on_get(&format!("databases/{}", CHARACTERS_DB), fixture("characters_database"))
        .on_post(
            &format!("databases/{}/query", CHARACTERS_DB),
            fixture("characters_query"),
        );

    for (n, id) in CHAPTER_IDS.iter().enumerate() {
        let number = n + 1;
        transport = transport
            .on_get(&format!("pages/{}", id), page_json(id, &format!("Chapter {}", number)))
            .on_get(
                &format!("blocks/{}/children", id),
                list_json(vec![paragraph_json(&format!("Text of chapter {}.", number))]),
            );
    }

    transport
        .on_get(&format!("pages/{}", CHARACTER_ID), page_json(CHARACTER_ID, "Buck"))
        .on_get(&format!("blocks/{}/children", CHARACTER_ID), list_json(vec![]))
}

// --- Wire builders ---

pub fn text_run(text: &str) -> Value {
    json!({
        "type": "text",
        "text": { "content": text, "link": null },
        "plain_text": text,
        "href": null
    })
}

pub fn page_json(id: &str, title: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": { "id": "title", "type": "title", "title": [text_run(title)] }
        }
    })
}

pub fn paragraph_json(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "has_children": false,
        "paragraph": { "rich_text": [text_run(text)] }
    })
}

pub fn child_database_json(id: &str, title: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "child_database",
        "has_children": false,
        "child_database": { "title": title }
    })
}

pub fn database_json(id: &str, title: &str) -> Value {
    json!({ "object": "database", "id": id, "title": [text_run(title)] })
}

pub fn list_json(results: Vec<Value>) -> Value {
    json!({ "object": "list", "results": results, "next_cursor": null, "has_more": false })
}

pub fn rows_json(ids: &[&str]) -> Value {
    list_json(ids.iter().map(|id| json!({ "object": "page", "id": id })).collect())
}

pub fn error_json(status: StatusCode, code: &str, message: &str) -> Value {
    json!({
        "object": "error",
        "status": status.as_u16(),
        "code": code,
        "message": message
    })
}
