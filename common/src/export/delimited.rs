//! CSV出力
//!
//! 1レコード識別につき1つのCSV。ヘッダーは全レコードの項目名を初出順に並べ、
//! 項目のないセルは空文字にする。

use super::{columns, summarize};
use crate::error::{Error, Result};
use crate::record::TypeGroup;
use csv::{Terminator, WriterBuilder};

/// UTF-8 BOM（表計算ソフトで文字化けしないように付ける）
pub const BOM: char = '\u{FEFF}';

/// 指定したレコード識別のレコードをCSVに変換
///
/// 該当レコードがなければ空文字を返す。
pub fn export_csv(group: &TypeGroup, tag: &str) -> Result<String> {
    let records = match group.get(tag) {
        Some(records) if !records.is_empty() => records,
        _ => return Ok(String::new()),
    };

    let header = columns(records);
    let rows = records
        .iter()
        .map(|record| header.iter().map(|key| record.get(key)).collect::<Vec<_>>());

    write_rows(&header, rows)
}

/// 概要（レコード識別・レコード数・カラム数）をCSVに変換
pub fn export_summary_csv(group: &TypeGroup) -> Result<String> {
    let header = ["レコードタイプ", "レコード数", "カラム数"];
    let rows = summarize(group).into_iter().map(|s| {
        vec![
            s.record_type,
            s.record_count.to_string(),
            s.column_count.to_string(),
        ]
    });

    write_rows(&header, rows)
}

/// 先頭にBOMを付ける
pub fn with_bom(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + BOM.len_utf8());
    out.push(BOM);
    out.push_str(text);
    out
}

fn write_rows<H, R, F>(header: &[H], rows: R) -> Result<String>
where
    H: AsRef<[u8]>,
    R: IntoIterator<Item = Vec<F>>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
