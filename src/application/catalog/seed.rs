use crate::domain::commands::RegisterBook;

use super::catalog_service::{ServiceDependencies, register_book};
use super::errors::{CatalogApplicationError, Result};

/// 初期データ（JSON配列）から蔵書を登録する
///
/// 各要素は `RegisterBook` と同じ形式。登録済みのIDはスキップするため、
/// 再起動のたびに実行しても結果は変わらない。
/// 制約違反の要素が1件でもあればその時点でエラーを返す。
///
/// # 戻り値
/// 新たに登録した件数
pub async fn seed_catalog(deps: &ServiceDependencies, json: &str) -> Result<usize> {
    let commands: Vec<RegisterBook> = serde_json::from_str(json)?;
    let mut inserted = 0;

    for cmd in commands {
        match register_book(deps, cmd).await {
            Ok(_) => inserted += 1,
            Err(CatalogApplicationError::DuplicateBookId(book_id)) => {
                tracing::debug!(%book_id, "Seed book already present, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(inserted, "Seeded catalog");
    Ok(inserted)
}
