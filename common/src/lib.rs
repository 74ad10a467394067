//! Rece Common Library
//!
//! 電子レセプトの集約・検索・エクスポート。
//! 外部パーサーの出力（カルテ番号 → レセプト列）を受け取り、
//! CLIなど任意のフロントエンドから同じように利用する。

pub mod types;
pub mod error;
pub mod record;
pub mod catalog;
pub mod search;
pub mod export;

pub use types::{Dialect, FlatRecord, MonthlyReceipts, PatientSnapshot, Receipt};
pub use error::{Error, Result};
pub use record::{group_records, type_group, Grouping, TypeGroup};
pub use catalog::{
    build_catalog, chart_key, chart_label, lookup_chart, lookup_receipt, merged_type_group,
    patient_rows, resolve_chart_key, CatalogEntry, PatientRow, UNASSIGNED_CHART_LABEL,
};
pub use search::{resolve_selection, search, SearchIndex, Selection};
pub use export::{
    columns, export_csv, export_json, export_markdown, export_summary_csv, import_json,
    summarize, with_bom, TypeSummary,
};

#[cfg(feature = "excel")]
pub use export::export_excel;
