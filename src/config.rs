use crate::error::{Result, ViewerError};
use rece_common::Dialect;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// パーサーコマンドの環境変数
pub const PARSER_ENV: &str = "RECE_VIEWER_PARSER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定のレセプト種類
    pub dialect: Dialect,
    /// 外部パーサーコマンド（JSONを標準出力に書くもの）
    pub parser_command: Option<String>,
    /// CSVにBOMを付ける
    pub csv_bom: bool,
    /// 既定の出力先
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::Ika,
            parser_command: None,
            csv_bom: true, // Excelで開く前提
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ViewerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("rece-viewer").join("config.json"))
    }

    /// パーサーコマンドを取得（環境変数を優先）
    pub fn parser_command(&self) -> Option<String> {
        match std::env::var(PARSER_ENV) {
            Ok(cmd) if !cmd.trim().is_empty() => Some(cmd),
            _ => self.parser_command.clone(),
        }
    }

    pub fn set_dialect(&mut self, dialect: Dialect) -> Result<()> {
        self.dialect = dialect;
        self.save()
    }

    pub fn set_parser_command(&mut self, command: String) -> Result<()> {
        self.parser_command = Some(command);
        self.save()
    }
}
