//! レセプトファイルの読み込み
//!
//! レセプトファイル自体の解析は外部パーサーが行う。
//! ここでは外部パーサーの出力（カルテ番号 → レセプト列のJSON）を受け取る。
//!
//! - `.json`: パーサー出力を保存したファイルをそのまま読む
//! - `.csv` / `.txt` / `.UKE`: 設定したパーサーコマンドを実行して標準出力を読む
//!
//! パーサーが失敗した場合は途中の結果を使わず、メッセージをそのまま返す。

use crate::config::Config;
use crate::error::{Result, ViewerError};
use rece_common::{Dialect, MonthlyReceipts};
use std::path::Path;
use std::process::Command;

/// パーサーに渡せるレセプトファイルの拡張子
pub const RECEIPT_EXTENSIONS: [&str; 3] = ["csv", "txt", "uke"];

/// 外部レセプトパーサー
pub trait ReceiptParser {
    fn parse(&self, path: &Path, dialect: Dialect) -> Result<MonthlyReceipts>;
}

/// 保存済みのパーサー出力（JSON）を読む
pub struct JsonDumpParser;

impl ReceiptParser for JsonDumpParser {
    fn parse(&self, path: &Path, _dialect: Dialect) -> Result<MonthlyReceipts> {
        let content = std::fs::read_to_string(path)?;
        parse_dump(&content)
    }
}

/// パーサーコマンドを実行して標準出力のJSONを読む
///
/// 実行形式: `<command> --codes <ika|dpc> <file>`
pub struct CommandParser {
    command: String,
}

impl CommandParser {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl ReceiptParser for CommandParser {
    fn parse(&self, path: &Path, dialect: Dialect) -> Result<MonthlyReceipts> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ViewerError::Config("パーサーコマンドが空です".into()))?;

        tracing::debug!(program, dialect = dialect.code(), "パーサーを実行");

        let output = Command::new(program)
            .args(parts)
            .arg("--codes")
            .arg(dialect.code())
            .arg(path)
            .output()
            .map_err(|e| ViewerError::ParserExecution(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(rece_common::Error::Upstream(stderr.trim().to_string()).into());
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            rece_common::Error::Upstream(format!("パーサー出力がUTF-8ではありません: {}", e))
        })?;
        parse_dump(&stdout)
    }
}

/// パーサー出力（JSON）を読む
pub fn parse_dump(content: &str) -> Result<MonthlyReceipts> {
    serde_json::from_str(content)
        .map_err(|e| rece_common::Error::Upstream(format!("パーサー出力が不正です: {}", e)).into())
}

/// ファイル種別に応じたパーサーを選ぶ
pub fn parser_for(path: &Path, config: &Config) -> Result<Box<dyn ReceiptParser>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ext == "json" {
        return Ok(Box::new(JsonDumpParser));
    }

    if RECEIPT_EXTENSIONS.contains(&ext.as_str()) {
        let command = config.parser_command().ok_or(ViewerError::MissingParser)?;
        return Ok(Box::new(CommandParser::new(command)));
    }

    Err(ViewerError::UnsupportedFile(path.display().to_string()))
}

/// レセプトファイルを読み込む
pub fn load_receipts(path: &Path, dialect: Dialect, config: &Config) -> Result<MonthlyReceipts> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound(path.display().to_string()));
    }

    let parser = parser_for(path, config)?;
    let months = parser.parse(path, dialect)?;

    if months.is_empty() {
        return Err(ViewerError::NoReceipts);
    }

    tracing::info!(
        charts = months.len(),
        dialect = dialect.label(),
        "レセプトデータを読み込み"
    );
    Ok(months)
}
