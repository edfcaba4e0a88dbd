use serde::{Deserialize, Serialize};

use super::book::Book;

/// コマンド：書籍を登録する
///
/// 欠けたフィールドは空文字列・falseとして扱い、検証で未入力として報告する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterBook {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_available: bool,
}

impl RegisterBook {
    pub fn into_book(self) -> Book {
        Book::new(
            self.book_id,
            self.title,
            self.author,
            self.genre,
            self.is_available,
        )
    }
}

/// コマンド：書籍情報を更新する（book_id以外を置換）
///
/// `is_available` が省略された場合は現在の貸出状態を引き継ぐ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub is_available: Option<bool>,
}

impl UpdateBook {
    pub fn apply_to(self, current: &Book) -> Book {
        Book::new(
            current.book_id(),
            self.title,
            self.author,
            self.genre,
            self.is_available.unwrap_or(current.is_available()),
        )
    }
}
