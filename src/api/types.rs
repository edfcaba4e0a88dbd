use serde::{Deserialize, Serialize};

use crate::domain::{
    Book, BookStatus,
    commands::{RegisterBook, UpdateBook},
    validation::FieldViolation,
};

/// 書籍登録リクエスト（POST /books）
///
/// 欠けたフィールドは空文字列・falseになり、検証エラーとして報告される。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBookRequest {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_available: bool,
}

impl CreateBookRequest {
    pub fn to_command(self) -> RegisterBook {
        RegisterBook {
            book_id: self.book_id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            is_available: self.is_available,
        }
    }
}

/// 書籍更新リクエスト（PUT /books/:id）
///
/// `is_available` を省略すると現在の貸出状態が維持される。
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_available: Option<bool>,
}

impl UpdateBookRequest {
    pub fn to_command(self) -> UpdateBook {
        UpdateBook {
            title: self.title,
            author: self.author,
            genre: self.genre,
            is_available: self.is_available,
        }
    }
}

/// 書籍一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// ステータスでフィルタリング（available, checked_out）
    pub status: Option<String>,
}

/// 書籍レスポンス（GET /books/:id, GET /books ほか）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_available: bool,
    pub status: String,
    pub description: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            status: book.status().as_str().to_string(),
            description: book.describe(),
            book_id: book.book_id().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            genre: book.genre().to_string(),
            is_available: book.is_available(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// 検証エラー時のみ
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn with_violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<BookStatus, String> {
    status.parse::<BookStatus>()
}
