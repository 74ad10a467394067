//! Markdown出力
//!
//! レコード識別を辞書順に並べ、レコードごとに「項目 | 値」の表を出す。

use crate::record::TypeGroup;
use crate::types::FlatRecord;

/// グループをMarkdownに変換
///
/// # Arguments
/// * `group` - レコード識別ごとのグループ
/// * `header` - 文書の見出し
pub fn export_markdown(group: &TypeGroup, header: &str) -> String {
    let mut out = format!("# {}\n", escape_line(header));

    for tag in group.sorted_tags() {
        let records = group.get(tag).unwrap_or_default();

        out.push_str(&format!("\n## {}レコード\n\n", escape_line(tag)));
        out.push_str(&format!("レコード数: {}\n", records.len()));

        for (i, record) in records.iter().enumerate() {
            out.push_str(&format!("\n### {} #{}\n\n", escape_line(tag), i + 1));
            push_record_table(&mut out, record);
        }
    }

    out
}

fn push_record_table(out: &mut String, record: &FlatRecord) {
    out.push_str("| 項目 | 値 |\n");
    out.push_str("| --- | --- |\n");
    for (key, value) in record.iter() {
        out.push_str(&format!("| {} | {} |\n", escape_cell(key), escape_cell(value)));
    }
}

/// 表のセル用（バックスラッシュと `|` をエスケープし、改行を `<br>` にする）
fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

fn escape_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}
