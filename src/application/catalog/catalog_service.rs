use crate::domain::{self, Book, BookStatus, commands::*, validation};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{CatalogApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞いは持たず、各ユースケース関数に引数として渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
}

/// リポジトリから書籍を取得するヘルパー関数
///
/// 存在しない場合は `BookNotFound` を返す。
async fn load_book(repository: &Arc<dyn BookRepository>, book_id: &str) -> Result<Book> {
    repository
        .get_by_id(book_id)
        .await
        .map_err(CatalogApplicationError::RepositoryError)?
        .ok_or_else(|| CatalogApplicationError::BookNotFound(book_id.to_string()))
}

/// 更新済みの書籍を保存するヘルパー関数
///
/// 読み込みから保存までの間に削除された場合は `BookNotFound` になる。
async fn store_book(repository: &Arc<dyn BookRepository>, book: &Book) -> Result<()> {
    let updated = repository
        .update(book.clone())
        .await
        .map_err(CatalogApplicationError::RepositoryError)?;

    if !updated {
        return Err(CatalogApplicationError::BookNotFound(
            book.book_id().to_string(),
        ));
    }
    Ok(())
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - book_id, title, author が空白でないこと
/// - book_idが未登録であること
///
/// # 戻り値
/// 登録された書籍
pub async fn register_book(deps: &ServiceDependencies, cmd: RegisterBook) -> Result<Book> {
    let book = cmd.into_book();

    // 1. 制約の検証
    validation::ensure_valid(&book).map_err(CatalogApplicationError::ValidationFailed)?;

    // 2. 保存（重複はリポジトリが検出）
    let inserted = deps
        .book_repository
        .insert(book.clone())
        .await
        .map_err(CatalogApplicationError::RepositoryError)?;

    if !inserted {
        return Err(CatalogApplicationError::DuplicateBookId(
            book.book_id().to_string(),
        ));
    }

    tracing::info!(book_id = %book.book_id(), "Registered book");
    Ok(book)
}

/// IDで書籍を取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: &str) -> Result<Book> {
    load_book(&deps.book_repository, book_id).await
}

/// 書籍一覧を取得する
///
/// `status` が指定された場合はそのステータスの書籍のみを返す。
pub async fn list_books(
    deps: &ServiceDependencies,
    status: Option<BookStatus>,
) -> Result<Vec<Book>> {
    let books = deps
        .book_repository
        .list_all()
        .await
        .map_err(CatalogApplicationError::RepositoryError)?;

    Ok(match status {
        Some(status) => books
            .into_iter()
            .filter(|book| book.status() == status)
            .collect(),
        None => books,
    })
}

/// 書籍情報を更新する
///
/// book_idはパスで指定されたものを使い、その他のフィールドを置換する。
/// `is_available` が省略された場合は保存済みの貸出状態を維持する。
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - title, author が空白でないこと
pub async fn update_book(
    deps: &ServiceDependencies,
    book_id: &str,
    cmd: UpdateBook,
) -> Result<Book> {
    // 1. 現在の書籍を取得
    let current = load_book(&deps.book_repository, book_id).await?;

    // 2. 変更を適用して検証
    let book = cmd.apply_to(&current);
    validation::ensure_valid(&book).map_err(CatalogApplicationError::ValidationFailed)?;

    // 3. 保存
    store_book(&deps.book_repository, &book).await?;

    tracing::info!(book_id = %book.book_id(), "Updated book");
    Ok(book)
}

/// 書籍を削除する
pub async fn remove_book(deps: &ServiceDependencies, book_id: &str) -> Result<()> {
    let deleted = deps
        .book_repository
        .delete(book_id)
        .await
        .map_err(CatalogApplicationError::RepositoryError)?;

    if !deleted {
        return Err(CatalogApplicationError::BookNotFound(book_id.to_string()));
    }

    tracing::info!(book_id, "Removed book");
    Ok(())
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 書籍が貸出可能であること（貸出中の書籍は貸し出せない）
pub async fn check_out_book(deps: &ServiceDependencies, book_id: &str) -> Result<Book> {
    // 1. 現在の状態を取得
    let book = load_book(&deps.book_repository, book_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let checked_out = domain::book::check_out(&book).map_err(|e| match e {
        domain::CheckOutError::AlreadyCheckedOut => {
            CatalogApplicationError::BookAlreadyCheckedOut(book_id.to_string())
        }
    })?;

    // 3. 保存
    store_book(&deps.book_repository, &checked_out).await?;

    tracing::info!(book_id, "Checked out book");
    Ok(checked_out)
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 書籍が存在すること
/// - 書籍が貸出中であること
pub async fn return_book(deps: &ServiceDependencies, book_id: &str) -> Result<Book> {
    let book = load_book(&deps.book_repository, book_id).await?;

    let returned = domain::book::return_book(&book).map_err(|e| match e {
        domain::ReturnBookError::NotCheckedOut => {
            CatalogApplicationError::BookNotCheckedOut(book_id.to_string())
        }
    })?;

    store_book(&deps.book_repository, &returned).await?;

    tracing::info!(book_id, "Returned book");
    Ok(returned)
}
