use clap::{Args, Parser, Subcommand};
use rece_common::Dialect;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rece-viewer")]
#[command(about = "電子レセプト閲覧・検索・エクスポートツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// レセプトタイプ (ika/dpc)。省略時は設定値
    #[arg(long, global = true)]
    pub dialect: Option<Dialect>,
}

/// レセプトの選択条件
#[derive(Args, Clone, Debug, Default)]
pub struct SelectArgs {
    /// 検索キーワード（氏名・カタカナ氏名・カルテ番号・レセプト番号）
    #[arg(short, long)]
    pub query: Option<String>,

    /// カルテ番号（「未設定」も指定可）
    #[arg(short, long)]
    pub chart: Option<String>,

    /// カルテ内のレセプト番号（0始まり）
    #[arg(short, long)]
    pub receipt: Option<usize>,

    /// カルテの全レセプトを統合して扱う
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レセプト一覧を表示
    List {
        /// レセプトファイル（.csv/.txt/.UKE）またはパーサー出力JSON
        #[arg(required = true)]
        input: PathBuf,

        /// 検索キーワード
        #[arg(short, long)]
        query: Option<String>,

        /// カルテ単位の患者一覧を表示
        #[arg(long)]
        patients: bool,
    },

    /// 選択したレセプトのレコードを表示
    Show {
        /// レセプトファイルまたはパーサー出力JSON
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        select: SelectArgs,

        /// 表示するレコードタイプ（省略時は全タイプ）
        #[arg(short = 't', long)]
        record_type: Option<String>,
    },

    /// 選択したレセプトをエクスポート
    Export {
        /// レセプトファイルまたはパーサー出力JSON
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        select: SelectArgs,

        /// 出力形式 (csv/json/markdown/summary/excel/all)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// CSVのレコードタイプ（省略時は全タイプ）
        #[arg(short = 't', long)]
        record_type: Option<String>,

        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSVにBOMを付けない
        #[arg(long)]
        no_bom: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 既定のレセプトタイプを設定
        #[arg(long)]
        set_dialect: Option<Dialect>,

        /// パーサーコマンドを設定
        #[arg(long)]
        set_parser: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Markdown,
    /// レコードタイプごとの件数
    Summary,
    Excel,
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "summary" => Ok(ExportFormat::Summary),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!(
                "Unknown format: {}. Use csv, json, markdown, summary, excel, or all",
                s
            )),
        }
    }
}
