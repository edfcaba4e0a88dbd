use std::fmt;

use serde::{Deserialize, Serialize};

use super::book::Book;

pub const BOOK_ID_MANDATORY: &str = "Book ID is mandatory";
pub const TITLE_MANDATORY: &str = "Title is mandatory";
pub const AUTHOR_MANDATORY: &str = "Author is mandatory";

/// 1フィールド分の制約違反
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// 制約違反の一覧（1件以上）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Bookの制約を検査する
///
/// 空白のみの値も未入力として扱う。違反はフィールド順
/// （book_id, title, author）に並ぶ。genreとis_availableに制約はない。
pub fn validate_book(book: &Book) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(book.book_id()) {
        violations.push(FieldViolation::new("book_id", BOOK_ID_MANDATORY));
    }
    if is_blank(book.title()) {
        violations.push(FieldViolation::new("title", TITLE_MANDATORY));
    }
    if is_blank(book.author()) {
        violations.push(FieldViolation::new("author", AUTHOR_MANDATORY));
    }

    violations
}

/// `validate_book` の結果をResultに変換する
pub fn ensure_valid(book: &Book) -> Result<(), ValidationErrors> {
    let violations = validate_book(book);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}
