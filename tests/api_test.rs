use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use rusty_library_catalog::api::handlers::AppState;
use rusty_library_catalog::api::router::create_router;
use rusty_library_catalog::api::types::*;
use rusty_library_catalog::domain::Book;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

/// インメモリリポジトリを使ったルーターのセットアップ
fn setup_app(books: impl IntoIterator<Item = Book>) -> axum::Router {
    let service_deps = common::in_memory_deps(books);
    let app_state = Arc::new(AppState { service_deps });
    create_router(app_state)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = setup_app([]);

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_full_book_flow() {
    let app = setup_app([]);

    // Step 1: 登録（POST /books）
    let response = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "book_id": "B1",
            "title": "Dune",
            "author": "Herbert",
            "genre": "SciFi",
            "is_available": true,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: BookResponse = read_json(response).await;
    assert_eq!(created.book_id, "B1");
    assert_eq!(created.status, "available");
    assert_eq!(
        created.description,
        "ID: B1, Title: Dune, Author: Herbert, Genre: SciFi, Status: Available"
    );

    // Step 2: 取得（GET /books/:id）
    let response = send(&app, "GET", "/books/B1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: BookResponse = read_json(response).await;
    assert_eq!(fetched.title, "Dune");
    assert!(fetched.is_available);

    // Step 3: 貸出（POST /books/:id/checkout）
    let response = send(&app, "POST", "/books/B1/checkout", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let checked_out: BookResponse = read_json(response).await;
    assert!(!checked_out.is_available);
    assert_eq!(checked_out.status, "checked_out");
    assert!(checked_out.description.ends_with("Status: Checked Out"));

    // Step 4: 返却（POST /books/:id/return）
    let response = send(&app, "POST", "/books/B1/return", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let returned: BookResponse = read_json(response).await;
    assert!(returned.is_available);

    // Step 5: 更新（PUT /books/:id）
    let response = send(
        &app,
        "PUT",
        "/books/B1",
        Some(json!({
            "title": "Dune Messiah",
            "author": "Herbert",
            "genre": "SciFi",
            "is_available": true,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: BookResponse = read_json(response).await;
    assert_eq!(updated.title, "Dune Messiah");

    // is_available省略時は貸出状態が変わらない
    let response = send(
        &app,
        "PUT",
        "/books/B1",
        Some(json!({ "title": "Dune 2", "author": "Herbert", "genre": "SciFi" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: BookResponse = read_json(response).await;
    assert_eq!(updated.title, "Dune 2");
    assert!(updated.is_available);
    assert_eq!(updated.status, "available");

    // Step 6: 削除（DELETE /books/:id）
    let response = send(&app, "DELETE", "/books/B1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", "/books/B1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_books_with_filter() {
    let app = setup_app([
        Book::new("A1", "Emma", "Austen", "Classic", true),
        Book::new("B2", "Ulysses", "Joyce", "Classic", false),
    ]);

    let response = send(&app, "GET", "/books", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].book_id, "A1");
    assert_eq!(books[1].book_id, "B2");

    let response = send(&app, "GET", "/books?status=checked_out", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let books: Vec<BookResponse> = read_json(response).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].book_id, "B2");
}

// ============================================================================
// エラーケース
// ============================================================================

#[tokio::test]
async fn test_list_books_invalid_status() {
    let app = setup_app([]);

    let response = send(&app, "GET", "/books?status=lost", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BAD_REQUEST");
    assert!(error.message.contains("Invalid book status"));
}

#[tokio::test]
async fn test_create_book_validation_error() {
    let app = setup_app([]);

    // title欠落、authorは空白のみ
    let response = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "book_id": "B1", "author": "   " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "VALIDATION_FAILED");
    assert_eq!(error.violations.len(), 2);
    assert_eq!(error.violations[0].field, "title");
    assert_eq!(error.violations[0].message, "Title is mandatory");
    assert_eq!(error.violations[1].field, "author");
    assert_eq!(error.violations[1].message, "Author is mandatory");

    // 保存されていない
    let response = send(&app, "GET", "/books/B1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_duplicate_id() {
    let app = setup_app([common::dune(true)]);

    let response = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "book_id": "B1", "title": "Emma", "author": "Austen" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "DUPLICATE_BOOK_ID");
    assert!(error.violations.is_empty());
}

#[tokio::test]
async fn test_get_book_not_found() {
    let app = setup_app([]);

    let response = send(&app, "GET", "/books/missing", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_FOUND");
    assert!(error.message.contains("missing"));
}

#[tokio::test]
async fn test_create_book_rejects_malformed_body_with_json_error() {
    let app = setup_app([]);

    // nullや型違いのフィールドはJSONのエラーレスポンスになる
    for body in [
        json!({ "book_id": "B9", "title": null, "author": "X" }),
        json!({ "book_id": "B9", "title": "Dune", "author": "X", "is_available": "yes" }),
        json!("B9"),
    ] {
        let response = send(&app, "POST", "/books", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "INVALID_BODY");
        assert!(!error.message.is_empty());
    }

    let response = send(&app, "GET", "/books/B9", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_book_rejects_malformed_body_with_json_error() {
    let app = setup_app([common::dune(true)]);

    let response = send(
        &app,
        "PUT",
        "/books/B1",
        Some(json!({ "title": 42, "author": "Herbert" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_BODY");
}

#[tokio::test]
async fn test_not_found_code_is_the_same_on_every_route() {
    let app = setup_app([]);

    let requests = [
        ("GET", "/books/B9", None),
        ("PUT", "/books/B9", Some(json!({ "title": "T", "author": "A" }))),
        ("DELETE", "/books/B9", None),
        ("POST", "/books/B9/checkout", None),
        ("POST", "/books/B9/return", None),
    ];
    for (method, uri, body) in requests {
        let response = send(&app, method, uri, body).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error, "BOOK_NOT_FOUND", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_check_out_already_checked_out() {
    let app = setup_app([common::dune(false)]);

    let response = send(&app, "POST", "/books/B1/checkout", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_ALREADY_CHECKED_OUT");
}

#[tokio::test]
async fn test_return_book_not_checked_out() {
    let app = setup_app([common::dune(true)]);

    let response = send(&app, "POST", "/books/B1/return", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "BOOK_NOT_CHECKED_OUT");
}

#[tokio::test]
async fn test_update_and_delete_missing_book() {
    let app = setup_app([]);

    let response = send(
        &app,
        "PUT",
        "/books/B9",
        Some(json!({ "title": "Dune", "author": "Herbert" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/books/B9", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
