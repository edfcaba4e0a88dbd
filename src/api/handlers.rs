use crate::application::catalog::{
    CatalogApplicationError, ServiceDependencies, check_out_book as execute_check_out_book,
    get_book as execute_get_book, list_books as execute_list_books,
    register_book as execute_register_book, remove_book as execute_remove_book,
    return_book as execute_return_book, update_book as execute_update_book,
};
use axum::{
    Json,
    extract::{FromRequest, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{BookResponse, CreateBookRequest, ErrorResponse, ListBooksQuery, UpdateBookRequest},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Extractors
// ============================================================================

/// JSONボディの抽出器
///
/// 解析に失敗した場合もプレーンテキストではなく `ErrorResponse` を返す。
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct BookJson<T>(pub T);

// ============================================================================
// Command handlers (POST / PUT / DELETE)
// ============================================================================

/// POST /books - 書籍を登録
///
/// 強制されるビジネスルール:
/// - book_id, title, author が空白でないこと
/// - book_idが未登録であること
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    BookJson(req): BookJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = execute_register_book(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// PUT /books/:id - 書籍情報を更新
///
/// book_id以外のフィールドを置き換える。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    BookJson(req): BookJson<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = execute_update_book(&state.service_deps, &book_id, req.to_command()).await?;

    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/:id - 書籍を削除
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    execute_remove_book(&state.service_deps, &book_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /books/:id/checkout - 書籍を貸出
///
/// 強制されるビジネスルール:
/// - 書籍が存在すること
/// - 書籍が貸出中でないこと
pub async fn check_out_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = execute_check_out_book(&state.service_deps, &book_id).await?;

    Ok(Json(BookResponse::from(book)))
}

/// POST /books/:id/return - 書籍を返却
///
/// 強制されるビジネスルール:
/// - 書籍が存在すること
/// - 書籍が貸出中であること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = execute_return_book(&state.service_deps, &book_id).await?;

    Ok(Json(BookResponse::from(book)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/:id - 書籍をIDで取得
///
/// 見つかった場合は書籍情報を返し、見つからない場合は404を返す。
pub async fn get_book_by_id(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, QueryError> {
    let book = execute_get_book(&state.service_deps, &book_id).await?;

    Ok(Json(BookResponse::from(book)))
}

/// GET /books - オプションフィルタ付き書籍一覧取得
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（available, checked_out）（オプション）
///
/// フィルタが指定されない場合は全書籍をbook_id順で返す。
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, QueryError> {
    let status = query
        .status
        .as_deref()
        .map(super::types::parse_status_filter)
        .transpose()
        .map_err(QueryError::BadRequest)?;

    let books = execute_list_books(&state.service_deps, status).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl From<CatalogApplicationError> for QueryError {
    fn from(err: CatalogApplicationError) -> Self {
        match err {
            CatalogApplicationError::BookNotFound(book_id) => {
                QueryError::NotFound(format!("Book {} not found", book_id))
            }
            other => QueryError::InternalError(format!("{:?}", other)),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", msg),
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            QueryError::InternalError(msg) => {
                // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                tracing::error!("Internal error in query handler: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
