use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です: {0}（.csv / .txt / .UKE / .json）")]
    UnsupportedFile(String),

    #[error("パーサーコマンドが設定されていません。`rece-viewer config --set-parser COMMAND` で設定してください")]
    MissingParser,

    #[error("レセプトデータが見つかりませんでした")]
    NoReceipts,

    #[error("検索条件に一致するレセプトが見つかりませんでした: {0}")]
    NoMatch(String),

    #[error("{count}件のレセプトが一致しました。--chart と --receipt で1件に絞ってください:\n{candidates}")]
    AmbiguousSelection { count: usize, candidates: String },

    #[error("レセプトが見つかりません: カルテ番号 {chart} / レセプト {index}")]
    ReceiptNotFound { chart: String, index: usize },

    #[error("レコードタイプが見つかりません: {0}")]
    UnknownRecordType(String),

    #[error("パーサー実行エラー: {0}")]
    ParserExecution(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] rece_common::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
