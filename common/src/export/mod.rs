//! エクスポート
//!
//! レコード識別ごとのグループをCSV・JSON・Markdown（・Excel）に変換する。
//! すべて入力だけで決まる純粋な変換で、ファイル出力は呼び出し側が行う。
//!
//! レコード識別の並び順:
//! - JSON: 初出順
//! - Markdown / 概要 / Excel: 辞書順

pub mod delimited;
pub mod json;
pub mod markdown;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use delimited::{export_csv, export_summary_csv, with_bom};
pub use json::{export_json, import_json};
pub use markdown::export_markdown;

#[cfg(feature = "excel")]
pub use excel_core::export_excel;

use crate::record::TypeGroup;
use crate::types::FlatRecord;
use serde::{Deserialize, Serialize};

/// レコード識別ごとの概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub record_type: String,
    pub record_count: usize,
    /// 項目数（全レコードの項目の和集合）
    pub column_count: usize,
}

/// 概要を作成（レコード識別の辞書順）
pub fn summarize(group: &TypeGroup) -> Vec<TypeSummary> {
    group
        .sorted_tags()
        .into_iter()
        .map(|tag| {
            let records = group.get(tag).unwrap_or_default();
            TypeSummary {
                record_type: tag.to_string(),
                record_count: records.len(),
                column_count: columns(records).len(),
            }
        })
        .collect()
}

/// レコード列の項目名（初出順の和集合）
pub fn columns(records: &[FlatRecord]) -> Vec<&str> {
    let mut seen = indexmap::IndexSet::new();
    for record in records {
        for key in record.keys() {
            seen.insert(key);
        }
    }
    seen.into_iter().collect()
}
