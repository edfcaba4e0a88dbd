use crate::domain::Book;
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Book {
    Book::new(
        row.get::<String, _>("book_id"),
        row.get::<String, _>("title"),
        row.get::<String, _>("author"),
        row.get::<String, _>("genre"),
        row.get::<bool, _>("is_available"),
    )
}

/// BookRepositoryのPostgreSQL実装
///
/// booksテーブル（migrations/参照）に書籍を保存する。
/// book_idの一意性は主キー制約で保証する。
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    /// 書籍を追加
    ///
    /// ON CONFLICT DO NOTHINGで重複を検出し、挿入行数で結果を返す。
    async fn insert(&self, book: Book) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (book_id, title, author, genre, is_available)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (book_id) DO NOTHING
            "#,
        )
        .bind(book.book_id())
        .bind(book.title())
        .bind(book.author())
        .bind(book.genre())
        .bind(book.is_available())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_by_id(&self, book_id: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT book_id, title, author, genre, is_available
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    /// 書籍を置き換え（updated_atも更新）
    async fn update(&self, book: Book) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2,
                author = $3,
                genre = $4,
                is_available = $5,
                updated_at = NOW()
            WHERE book_id = $1
            "#,
        )
        .bind(book.book_id())
        .bind(book.title())
        .bind(book.author())
        .bind(book.genre())
        .bind(book.is_available())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, book_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT book_id, title, author, genre, is_available
            FROM books
            ORDER BY book_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_book).collect())
    }
}
