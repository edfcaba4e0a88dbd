use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, check_out_book, create_book, delete_book, get_book_by_id, list_books, return_book,
    update_book,
};

/// Creates the API router with all catalog endpoints
///
/// Command endpoints (Write operations):
/// - POST /books - Register a book
/// - PUT /books/:id - Replace a book's details
/// - DELETE /books/:id - Remove a book
/// - POST /books/:id/checkout - Check a book out
/// - POST /books/:id/return - Return a book
///
/// Query endpoints (Read operations):
/// - GET /books - List books, optionally filtered by status
/// - GET /books/:id - Get book details
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book_by_id).put(update_book).delete(delete_book),
        )
        .route("/books/:id/checkout", post(check_out_book))
        .route("/books/:id/return", post(return_book))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
