use crate::domain::Book;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// Bookエンティティの永続化を抽象化する。book_idをキーとし、
/// 一意性の保証はこのポートの実装が担当する。
/// 書籍が存在しないことはエラーではなく、戻り値で表す。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を追加する
    ///
    /// 同じbook_idが既に存在する場合は何もせず `false` を返す。
    async fn insert(&self, book: Book) -> Result<bool>;

    /// IDで書籍を取得する
    async fn get_by_id(&self, book_id: &str) -> Result<Option<Book>>;

    /// 書籍を置き換える
    ///
    /// book_idが存在しない場合は `false` を返す。
    async fn update(&self, book: Book) -> Result<bool>;

    /// 書籍を削除する
    ///
    /// book_idが存在しない場合は `false` を返す。
    async fn delete(&self, book_id: &str) -> Result<bool>;

    /// 全書籍をbook_id順で取得する
    async fn list_all(&self) -> Result<Vec<Book>>;
}
