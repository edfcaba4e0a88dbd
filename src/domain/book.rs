use std::fmt;

use super::{BookStatus, CheckOutError, ReturnBookError};

/// Book エンティティ - 蔵書1冊分の識別情報と貸出状態
///
/// 不変条件（book_id, title, author が空白でないこと）はこの型では強制しない。
/// 検証は `validation::validate_book` が担当し、一意性はリポジトリが担当する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    book_id: String,
    title: String,
    author: String,
    genre: String,
    is_available: bool,
}

impl Book {
    /// 5つの値をそのまま保持するBookを生成する（検証なし）
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        is_available: bool,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            is_available,
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn set_book_id(&mut self, book_id: impl Into<String>) {
        self.book_id = book_id.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// 貸出可否を直接設定する
    ///
    /// 遷移ルールは持たない。貸出・返却のルールは `check_out` / `return_book` を使う。
    pub fn set_available(&mut self, is_available: bool) {
        self.is_available = is_available;
    }

    pub fn status(&self) -> BookStatus {
        BookStatus::from(self.is_available)
    }

    /// 人が読むための1行サマリー
    ///
    /// 形式: `ID: {id}, Title: {title}, Author: {author}, Genre: {genre}, Status: {status}`
    pub fn describe(&self) -> String {
        format!(
            "ID: {}, Title: {}, Author: {}, Genre: {}, Status: {}",
            self.book_id,
            self.title,
            self.author,
            self.genre,
            self.status().label()
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 貸出中の書籍は貸し出せない
///
/// 副作用なし。貸出中になった新しいBookを返す。
pub fn check_out(book: &Book) -> Result<Book, CheckOutError> {
    if !book.is_available {
        return Err(CheckOutError::AlreadyCheckedOut);
    }

    Ok(Book {
        is_available: false,
        ..book.clone()
    })
}

/// 純粋関数：書籍を返却する
///
/// ビジネスルール：
/// - 書架にある書籍は返却できない
///
/// 副作用なし。貸出可能になった新しいBookを返す。
pub fn return_book(book: &Book) -> Result<Book, ReturnBookError> {
    if book.is_available {
        return Err(ReturnBookError::NotCheckedOut);
    }

    Ok(Book {
        is_available: true,
        ..book.clone()
    })
}
