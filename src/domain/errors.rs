/// 貸出処理のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutError {
    /// 既に貸出中
    AlreadyCheckedOut,
}

/// 返却処理のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 貸出されていない（既に書架にある）
    NotCheckedOut,
}
