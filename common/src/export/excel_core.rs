//! Excel出力
//!
//! 先頭に概要シート、以降はレコード識別ごとに1シート（辞書順）。
//! 各シートの列構成はCSV出力と同じ。

use super::{columns, summarize};
use crate::error::{Error, Result};
use crate::record::TypeGroup;
use rust_xlsxwriter::*;

/// 概要シート名
pub const SUMMARY_SHEET_NAME: &str = "概要";

/// シート名の最大長
const MAX_SHEET_NAME_CHARS: usize = 31;

/// グループをExcelブック（xlsx）のバイト列に変換
pub fn export_excel(group: &TypeGroup) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    // 概要シート
    let summary_sheet = workbook.add_worksheet();
    summary_sheet
        .set_name(SUMMARY_SHEET_NAME)
        .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;
    for (col, label) in ["レコードタイプ", "レコード数", "カラム数"].iter().enumerate() {
        summary_sheet
            .write_string_with_format(0, col as u16, *label, &header_format)
            .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
    }
    for (i, summary) in summarize(group).iter().enumerate() {
        let row = i as u32 + 1;
        summary_sheet
            .write_string(row, 0, summary.record_type.as_str())
            .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
        summary_sheet
            .write_number(row, 1, summary.record_count as f64)
            .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
        summary_sheet
            .write_number(row, 2, summary.column_count as f64)
            .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
    }

    // レコード識別ごとのシート
    let mut used_names = vec![SUMMARY_SHEET_NAME.to_lowercase()];
    for tag in group.sorted_tags() {
        let records = group.get(tag).unwrap_or_default();
        let header = columns(records);

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(unique_sheet_name(tag, &mut used_names))
            .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;

        for (col, key) in header.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *key, &header_format)
                .map_err(|e| Error::Excel(format!("ヘッダー書き込みエラー: {}", e)))?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, key) in header.iter().enumerate() {
                worksheet
                    .write_string(row, col as u16, record.get(key))
                    .map_err(|e| Error::Excel(format!("値書き込みエラー: {}", e)))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}

/// シート名に使えない文字を置換し、長さを切り詰める
fn sheet_name(tag: &str) -> String {
    let name: String = tag
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();

    if name.is_empty() || name == SUMMARY_SHEET_NAME {
        format!("{}_", name)
    } else {
        name
    }
}

/// 既出のシート名と重ならない名前にする
///
/// Excelはシート名の大文字小文字を区別しないため、小文字化して比較する。
/// 重なった場合は `_2`, `_3` ... を付ける（31文字に収まるよう本体を切り詰める）。
fn unique_sheet_name(tag: &str, used: &mut Vec<String>) -> String {
    let base = sheet_name(tag);
    let mut name = base.clone();
    let mut n = 2;
    while used.contains(&name.to_lowercase()) {
        let suffix = format!("_{}", n);
        let stem: String = base
            .chars()
            .take(MAX_SHEET_NAME_CHARS - suffix.chars().count())
            .collect();
        name = format!("{}{}", stem, suffix);
        n += 1;
    }
    used.push(name.to_lowercase());
    name
}
