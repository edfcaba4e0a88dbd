use serde::{Deserialize, Serialize};

/// 書籍の貸出ステータス
///
/// `Book::is_available` の二値をそのまま表す。中間状態は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// 書架にあり貸出可能
    Available,
    /// 貸出中
    CheckedOut,
}

impl BookStatus {
    /// 表示用のラベル（`Book::describe` で使用）
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::CheckedOut => "Checked Out",
        }
    }

    /// APIやクエリパラメータで使う文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl From<bool> for BookStatus {
    fn from(is_available: bool) -> Self {
        if is_available {
            BookStatus::Available
        } else {
            BookStatus::CheckedOut
        }
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BookStatus::Available),
            "checked_out" => Ok(BookStatus::CheckedOut),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}
