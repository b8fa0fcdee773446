// tests/ingestion.rs
//! Book ingestion end to end against an in-memory workspace.

mod common;

use common::*;
use notion_book_ingest::formatting::RenderOptions;
use notion_book_ingest::ingest::{BookIngestor, FetchSettings};
use notion_book_ingest::output::IngestionResponse;
use notion_book_ingest::{AppError, DecodedValue, PropertyName};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;

fn ingestor(transport: MockTransport) -> (BookIngestor, std::sync::Arc<MockTransport>) {
    let (api, transport) = api(transport);
    let settings = FetchSettings::new(RenderOptions::spaced(), Some(4));
    (BookIngestor::new(api, settings), transport)
}

#[tokio::test]
async fn ingests_a_book_with_two_databases() {
    let (ingestor, transport) = ingestor(book_workspace());

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();

    assert_eq!(result.book.id.as_str(), BOOK_ID);
    assert_eq!(result.book.title, "The Call of the Wild");
    assert_eq!(result.book.url, BOOK_URL);
    assert_eq!(
        result.book.content,
        "# Overview\n\nA dog's story.\n\n☑ Outline\n\n💡 Public domain\n\n---\n"
    );

    let chapters = result.chapters.as_ref().unwrap();
    assert_eq!(chapters.id.as_str(), CHAPTERS_DB);
    assert_eq!(chapters.title, "Chapters");
    let titles: Vec<_> = chapters.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Chapter 1", "Chapter 2", "Chapter 3"]);
    assert_eq!(
        chapters.pages[0].url,
        "https://www.notion.so/bbbbbbbb000040008000000000000001"
    );
    assert_eq!(chapters.pages[1].content, "Text of chapter 2.\n");

    assert_eq!(result.other_databases.len(), 1);
    assert_eq!(result.other_databases[0].title, "Characters");
    assert_eq!(result.other_databases[0].pages[0].title, "Buck");

    assert_eq!(result.total_chapters, 3);
    assert_eq!(result.total_pages, 4);
    assert_eq!(result.databases_found(), 2);

    // Each database is queried exactly once, even when more rows exist.
    assert_eq!(
        transport.call_count(&format!("POST databases/{}/query", CHARACTERS_DB)),
        1
    );
}

#[tokio::test]
async fn book_properties_are_decoded_in_api_order() {
    let (ingestor, _) = ingestor(book_workspace());
    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();

    let names: Vec<_> = result.book.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(
        names,
        vec!["Author", "Name", "Year", "Genres", "Finished", "Status", "Published", "Created by"]
    );

    let property = |name: &str| result.book.properties[&PropertyName::from(name)].clone();
    assert_eq!(property("Author"), DecodedValue::Text("Jack London".into()));
    assert_eq!(
        property("Genres"),
        DecodedValue::List(vec!["Adventure".into(), "Classic".into()])
    );
    assert_eq!(property("Finished"), DecodedValue::Boolean(true));
    assert_eq!(property("Published"), DecodedValue::Text("1903-07-01".into()));
    assert_eq!(
        serde_json::to_value(property("Year")).unwrap(),
        json!(1903)
    );
    // Unsupported property types keep their raw JSON as text.
    assert!(property("Created by").as_text().unwrap().contains("created_by"));
}

#[tokio::test]
async fn failing_rows_are_dropped_from_counts() {
    let chapters = [CHAPTER_IDS[0], CHAPTER_IDS[1], CHAPTER_IDS[2]];
    let transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), page_json(BOOK_ID, "Book"))
        .on_get(
            &format!("blocks/{}/children", BOOK_ID),
            list_json(vec![child_database_json(CHAPTERS_DB, "Chapters")]),
        )
        .on_get(&format!("databases/{}", CHAPTERS_DB), database_json(CHAPTERS_DB, "Chapters"))
        .on_post(&format!("databases/{}/query", CHAPTERS_DB), rows_json(&chapters))
        .on_get(&format!("pages/{}", chapters[0]), page_json(chapters[0], "One"))
        .on_get(&format!("blocks/{}/children", chapters[0]), list_json(vec![]))
        .get_error(
            &format!("pages/{}", chapters[1]),
            StatusCode::FORBIDDEN,
            "restricted_resource",
            "Insufficient permissions",
        )
        .on_get(&format!("blocks/{}/children", chapters[1]), list_json(vec![]))
        .on_get(&format!("pages/{}", chapters[2]), page_json(chapters[2], "Three"))
        .on_get(&format!("blocks/{}/children", chapters[2]), list_json(vec![]));
    let (ingestor, _) = ingestor(transport);

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();

    let chapters = result.chapters.unwrap();
    let titles: Vec<_> = chapters.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Three"]);
    assert_eq!(result.total_chapters, 2);
    assert_eq!(result.total_pages, 2);
}

#[tokio::test]
async fn rows_without_an_id_are_skipped() {
    let transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), page_json(BOOK_ID, "Book"))
        .on_get(
            &format!("blocks/{}/children", BOOK_ID),
            list_json(vec![child_database_json(CHAPTERS_DB, "Chapters")]),
        )
        .on_get(&format!("databases/{}", CHAPTERS_DB), database_json(CHAPTERS_DB, "Chapters"))
        .on_post(
            &format!("databases/{}/query", CHAPTERS_DB),
            list_json(vec![
                json!({ "object": "page", "id": "not-an-id" }),
                json!({ "object": "page", "id": CHAPTER_IDS[0] }),
            ]),
        )
        .on_get(&format!("pages/{}", CHAPTER_IDS[0]), page_json(CHAPTER_IDS[0], "Only"))
        .on_get(&format!("blocks/{}/children", CHAPTER_IDS[0]), list_json(vec![]));
    let (ingestor, _) = ingestor(transport);

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();
    assert_eq!(result.total_chapters, 1);
}

#[tokio::test]
async fn failing_database_is_dropped_and_the_next_becomes_chapters() {
    let transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), page_json(BOOK_ID, "Book"))
        .on_get(
            &format!("blocks/{}/children", BOOK_ID),
            list_json(vec![
                child_database_json(CHAPTERS_DB, "Linked"),
                child_database_json(CHARACTERS_DB, "Real chapters"),
            ]),
        )
        .get_error(
            &format!("databases/{}", CHAPTERS_DB),
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Database with ID is a linked database.",
        )
        .on_get(
            &format!("databases/{}", CHARACTERS_DB),
            database_json(CHARACTERS_DB, "Real chapters"),
        )
        .on_post(&format!("databases/{}/query", CHARACTERS_DB), rows_json(&[]));
    let (ingestor, transport) = ingestor(transport);

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();

    let chapters = result.chapters.as_ref().unwrap();
    assert_eq!(chapters.id.as_str(), CHARACTERS_DB);
    assert!(result.other_databases.is_empty());
    assert_eq!(result.total_chapters, 0);
    assert_eq!(result.databases_found(), 1);
    // The failed metadata fetch means its rows are never queried.
    assert_eq!(
        transport.call_count(&format!("POST databases/{}/query", CHAPTERS_DB)),
        0
    );
}

#[tokio::test]
async fn book_without_databases_has_no_chapters() {
    let transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), page_json(BOOK_ID, "Lonely"))
        .on_get(
            &format!("blocks/{}/children", BOOK_ID),
            list_json(vec![paragraph_json("Just text")]),
        );
    let (ingestor, _) = ingestor(transport);

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();

    assert!(result.chapters.is_none());
    assert_eq!(result.total_chapters, 0);
    assert_eq!(result.total_pages, 0);

    let response = serde_json::to_value(IngestionResponse::from(result)).unwrap();
    assert_eq!(
        response["summary"],
        json!({ "total_chapters": 0, "total_pages": 0, "databases_found": 0 })
    );
    assert!(response.get("chapters").is_none());
}

#[tokio::test]
async fn unrecognized_url_fails_before_any_request() {
    let (ingestor, transport) = ingestor(book_workspace());

    let err = ingestor
        .ingest_book("https://example.com/some/page")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidReference { .. }));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn root_page_failure_is_fatal() {
    let transport = MockTransport::new()
        .get_error(
            &format!("pages/{}", BOOK_ID),
            StatusCode::NOT_FOUND,
            "object_not_found",
            "Could not find page",
        )
        .on_get(&format!("blocks/{}/children", BOOK_ID), list_json(vec![]));
    let (ingestor, _) = ingestor(transport);

    let err = ingestor.ingest_book(BOOK_URL).await.unwrap_err();

    match err {
        AppError::FetchFailed { id, source, .. } => {
            assert_eq!(id, BOOK_ID);
            assert!(matches!(*source, AppError::NotionService { status, .. } if status == StatusCode::NOT_FOUND));
        }
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn ingestion_response_carries_previews() {
    let long_text = "x".repeat(250);
    let transport = MockTransport::new()
        .on_get(&format!("pages/{}", BOOK_ID), page_json(BOOK_ID, "Book"))
        .on_get(
            &format!("blocks/{}/children", BOOK_ID),
            list_json(vec![
                child_database_json(CHAPTERS_DB, "Chapters"),
                child_database_json(CHARACTERS_DB, "Characters"),
            ]),
        )
        .on_get(&format!("databases/{}", CHAPTERS_DB), database_json(CHAPTERS_DB, "Chapters"))
        .on_post(&format!("databases/{}/query", CHAPTERS_DB), rows_json(&[CHAPTER_IDS[0]]))
        .on_get(&format!("pages/{}", CHAPTER_IDS[0]), page_json(CHAPTER_IDS[0], "Long"))
        .on_get(
            &format!("blocks/{}/children", CHAPTER_IDS[0]),
            list_json(vec![paragraph_json(&long_text)]),
        )
        .on_get(
            &format!("databases/{}", CHARACTERS_DB),
            database_json(CHARACTERS_DB, "Characters"),
        )
        .on_post(&format!("databases/{}/query", CHARACTERS_DB), rows_json(&[]));
    let (ingestor, _) = ingestor(transport);

    let result = ingestor.ingest_book(BOOK_URL).await.unwrap();
    let response = serde_json::to_value(IngestionResponse::from(result)).unwrap();

    assert_eq!(response["status"], "success");
    let preview = response["chapters"]["chapters"][0]["content_preview"]
        .as_str()
        .unwrap();
    assert_eq!(preview, format!("{}...", "x".repeat(200)));
    assert_eq!(
        response["other_databases"],
        json!([{ "id": CHARACTERS_DB, "title": "Characters", "page_count": 0 }])
    );
}
