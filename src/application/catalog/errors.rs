use crate::domain::validation::ValidationErrors;
use thiserror::Error;

/// 蔵書管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CatalogApplicationError {
    /// 必須項目の未入力など、制約違反
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// 書籍が見つからない
    #[error("Book {0} not found")]
    BookNotFound(String),

    /// 同じIDの書籍が既に登録されている
    #[error("Book {0} already exists")]
    DuplicateBookId(String),

    /// 既に貸出中
    #[error("Book {0} is already checked out")]
    BookAlreadyCheckedOut(String),

    /// 貸出されていない書籍の返却
    #[error("Book {0} is not checked out")]
    BookNotCheckedOut(String),

    /// シードデータのJSONが不正
    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogApplicationError>;
