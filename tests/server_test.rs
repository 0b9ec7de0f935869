use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bijbel_api::server::create_server;
use bijbel_api::source::MemorySource;
use bijbel_api::Library;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let library = Library::open_dir(dir, true).expect("sample bundle loads");
    create_server(Arc::new(library))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "bijbel-api");
}

#[tokio::test]
async fn test_books_endpoint() {
    let (status, body) = get(app(), "/books").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 73);
    assert!(body.contains("Genesis"));
}

#[tokio::test]
async fn test_book_endpoint() {
    let (status, body) = get(app(), "/books/genesis").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "Genesis");
    assert_eq!(json["order"], 1);
}

#[tokio::test]
async fn test_unknown_book_is_404() {
    let (status, _) = get(app(), "/books/pieter").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chapter_endpoint() {
    let (status, body) = get(app(), "/books/genesis/chapter/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("In het begin schiep God de hemel en de aarde"));
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["verses"].as_array().unwrap().len(), 31);
    assert_eq!(json["verses"][0]["paragraph"], "y");
}

#[tokio::test]
async fn test_chapter_endpoint_rejects_non_numeric_chapter() {
    let (status, _) = get(app(), "/books/genesis/chapter/een").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_chapters_endpoint() {
    let (status, body) = get(app(), "/books/genesis/chapters").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["chapters"], 50);
    assert_eq!(json["verseCount"], 1533);
    assert!(json["verses"].as_array().unwrap().len() > 31);
}

#[tokio::test]
async fn test_crossrefs_endpoint() {
    let (status, body) = get(app(), "/crossrefs/genesis").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("John"));
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["book"], "Gen");
}

#[tokio::test]
async fn test_crossrefs_for_deuterocanonical_book_is_404() {
    let (status, body) = get(app(), "/crossrefs/tobit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not found");
}

#[tokio::test]
async fn test_crossrefs_chapter_endpoint() {
    let (status, body) = get(app(), "/crossrefs/genesis/chapter/1").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    let entries = json.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["from"]["book"] == "genesis"));
    assert!(entries.iter().any(|e| e["to"]["book"] == "johannes"));
}

#[tokio::test]
async fn test_crossrefs_verse_endpoint() {
    let (status, body) = get(app(), "/crossrefs/genesis/chapter/1/verse/1").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries[0]["label"], "johannes 1:1-3");
    assert!(entries
        .iter()
        .all(|e| e["from"]["chapter"] == 1 && e["from"]["verse"] == 1));
}

#[tokio::test]
async fn test_parse_errors_are_not_exposed() {
    let source = MemorySource::new()
        .with(
            "books.json",
            r#"[{"id": "ester", "name": "Ester", "order": 19}]"#,
        )
        .with("books/ester.json", "{ \"id\": \"ester\", ")
        .with(
            "crossrefs/book-mapping.json",
            r#"{"mappings": {"Esth": "ester"}}"#,
        )
        .with(
            "crossrefs/index.json",
            r#"{"totalBooks": 0, "books": []}"#,
        );
    let library = Library::open(Arc::new(source), true).unwrap();
    let (status, body) = get(create_server(Arc::new(library)), "/books/ester/chapter/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal server error");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_first_loads_agree() {
    let app = app();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            get(app, "/books/exodus/chapter/1").await
        }));
    }

    let mut bodies = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(bodies[0].contains("Exodus"));
}
