//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    /// 外部レセプトパーサーの失敗（メッセージはそのまま保持）
    #[error("レセプト解析エラー: {0}")]
    Upstream(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
