//! エクスポートファイルの書き出し
//!
//! 変換自体は `rece_common::export` が行い、ここではファイル名の決定と保存だけを行う。

use crate::cli::ExportFormat;
use crate::error::{Result, ViewerError};
use rece_common::TypeGroup;
use regex::Regex;
use std::path::{Path, PathBuf};

/// エクスポート設定
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    /// ファイル名の先頭に付ける名前（カルテ番号の表示ラベル）
    pub label: &'a str,
    /// Markdownの見出し
    pub title: &'a str,
    /// CSVの対象レコードタイプ（省略時は全タイプ）
    pub record_type: Option<&'a str>,
    /// CSVにBOMを付ける
    pub bom: bool,
}

/// ファイル名に使えない文字を置換
pub fn sanitize_file_stem(name: &str) -> String {
    lazy_static::lazy_static! {
        static ref INVALID_RE: Regex = Regex::new(r#"[\\/:*?"<>|\s]+"#).unwrap();
    }
    let stem = INVALID_RE.replace_all(name.trim(), "_").to_string();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

fn output_path(output_dir: &Path, stem: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", sanitize_file_stem(stem), extension))
}

fn write_csv(path: &Path, text: &str, bom: bool) -> Result<()> {
    if bom {
        std::fs::write(path, rece_common::with_bom(text))?;
    } else {
        std::fs::write(path, text)?;
    }
    Ok(())
}

/// レコードタイプごとのCSVを書き出す（`{label}_{type}.csv`）
fn export_csv_files(
    group: &TypeGroup,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    let tags: Vec<&str> = match options.record_type {
        Some(tag) => {
            if group.get(tag).is_none() {
                return Err(ViewerError::UnknownRecordType(tag.to_string()));
            }
            vec![tag]
        }
        None => group.sorted_tags(),
    };

    let mut written = Vec::with_capacity(tags.len());
    for tag in tags {
        let path = output_path(output_dir, &format!("{}_{}", options.label, tag), "csv");
        let text = rece_common::export_csv(group, tag)?;
        write_csv(&path, &text, options.bom)?;
        written.push(path);
    }
    Ok(written)
}

/// 形式に応じてファイルを書き出し、書き出したパスを返す
pub fn export_group(
    group: &TypeGroup,
    format: &ExportFormat,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::All) {
        println!("- CSVを生成中...");
        written.extend(export_csv_files(group, output_dir, options)?);
    }

    if matches!(format, ExportFormat::Summary | ExportFormat::All) {
        println!("- 概要CSVを生成中...");
        let path = output_path(output_dir, &format!("{}_summary", options.label), "csv");
        let text = rece_common::export_summary_csv(group)?;
        write_csv(&path, &text, options.bom)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Json | ExportFormat::All) {
        println!("- JSONを生成中...");
        let path = output_path(output_dir, options.label, "json");
        std::fs::write(&path, rece_common::export_json(group)?)?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Markdown | ExportFormat::All) {
        println!("- Markdownを生成中...");
        let path = output_path(output_dir, options.label, "md");
        std::fs::write(&path, rece_common::export_markdown(group, options.title))?;
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::All) {
        println!("- Excelを生成中...");
        let path = output_path(output_dir, options.label, "xlsx");
        std::fs::write(&path, rece_common::export_excel(group)?)?;
        written.push(path);
    }

    for path in &written {
        println!("✔ 出力: {}", path.display());
    }

    Ok(written)
}
