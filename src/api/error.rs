use crate::application::catalog::CatalogApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーとリクエストボディの解析エラーをまとめ、
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(CatalogApplicationError),
    InvalidBody(String),
}

impl From<CatalogApplicationError> for ApiError {
    fn from(err: CatalogApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Application(err) => err,
            // 400 Bad Request - JSONとして解釈できないボディ
            ApiError::InvalidBody(message) => {
                let body = ErrorResponse::new("INVALID_BODY", message);
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        };

        let (status, body) = match err {
            // 400 Bad Request - 必須項目の未入力
            CatalogApplicationError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", errors.to_string())
                    .with_violations(errors.into_violations()),
            ),

            // 404 Not Found - リクエストされたリソースが存在しない
            CatalogApplicationError::BookNotFound(ref book_id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("BOOK_NOT_FOUND", format!("Book {} not found", book_id)),
            ),

            // 409 Conflict - IDの重複
            CatalogApplicationError::DuplicateBookId(ref book_id) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "DUPLICATE_BOOK_ID",
                    format!("Book {} already exists", book_id),
                ),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            CatalogApplicationError::BookAlreadyCheckedOut(ref book_id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "BOOK_ALREADY_CHECKED_OUT",
                    format!("Book {} is already checked out", book_id),
                ),
            ),
            CatalogApplicationError::BookNotCheckedOut(ref book_id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "BOOK_NOT_CHECKED_OUT",
                    format!("Book {} is not checked out", book_id),
                ),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            CatalogApplicationError::InvalidSeed(ref e) => {
                tracing::error!("Invalid seed data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An unexpected error occurred"),
                )
            }
            CatalogApplicationError::RepositoryError(ref e) => {
                tracing::error!("Book repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("REPOSITORY_ERROR", "Failed to access book storage"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
