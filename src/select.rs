//! レセプトの選択
//!
//! 検索結果が複数件なら端末では対話選択、それ以外では候補を添えてエラーにする。

use crate::cli::SelectArgs;
use crate::error::{Result, ViewerError};
use dialoguer::Select;
use rece_common::{
    build_catalog, chart_label, lookup_chart, merged_type_group, resolve_chart_key,
    resolve_selection, search, type_group, CatalogEntry, MonthlyReceipts, Selection, TypeGroup,
};
use std::io::IsTerminal;

/// 選択したレセプト（またはカルテ全体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Receipt { chart: String, index: usize },
    Chart { chart: String },
}

impl Target {
    pub fn chart(&self) -> &str {
        match self {
            Target::Receipt { chart, .. } | Target::Chart { chart } => chart,
        }
    }

    /// ファイル名・見出し用のラベル
    pub fn label(&self, months: &MonthlyReceipts) -> String {
        let chart = chart_label(self.chart());
        match self {
            Target::Receipt { index, .. } if chart_receipt_count(months, self.chart()) > 1 => {
                format!("{}_{}", chart, index + 1)
            }
            _ => chart.to_string(),
        }
    }

    /// 対象のレコードをレコードタイプごとにまとめる
    pub fn type_group(&self, months: &MonthlyReceipts) -> Result<TypeGroup> {
        let receipts = lookup_chart(months, self.chart()).ok_or_else(|| self.not_found())?;
        match self {
            Target::Receipt { index, .. } => receipts
                .get(*index)
                .map(type_group)
                .ok_or_else(|| self.not_found()),
            Target::Chart { .. } => Ok(merged_type_group(receipts)),
        }
    }

    fn not_found(&self) -> ViewerError {
        let index = match self {
            Target::Receipt { index, .. } => *index,
            Target::Chart { .. } => 0,
        };
        ViewerError::ReceiptNotFound {
            chart: chart_label(self.chart()).to_string(),
            index,
        }
    }
}

fn chart_receipt_count(months: &MonthlyReceipts, chart: &str) -> usize {
    lookup_chart(months, chart).map_or(0, <[_]>::len)
}

/// 選択条件から対象を決める
pub fn resolve_target(months: &MonthlyReceipts, args: &SelectArgs) -> Result<Target> {
    let catalog = build_catalog(months);

    let candidates: Vec<CatalogEntry> = match &args.chart {
        Some(chart) => {
            let key = resolve_chart_key(months, chart)
                .ok_or_else(|| ViewerError::NoMatch(chart.clone()))?;
            catalog
                .into_iter()
                .filter(|e| e.chart_number == key)
                .collect()
        }
        None => search(&catalog, args.query.as_deref().unwrap_or("")),
    };
    let candidates: Vec<CatalogEntry> = candidates
        .into_iter()
        .filter(|e| args.receipt.map_or(true, |i| e.receipt_index == i))
        .collect();

    if args.all {
        // カルテ単位なら同じカルテの複数レセプトは1件とみなす
        let mut charts: Vec<CatalogEntry> = Vec::new();
        for entry in candidates {
            if !charts.iter().any(|c| c.chart_number == entry.chart_number) {
                charts.push(entry);
            }
        }
        let entry = pick(charts, args)?;
        return Ok(Target::Chart {
            chart: entry.chart_number,
        });
    }

    if args.chart.is_some() && args.receipt.is_some() && candidates.is_empty() {
        return Err(ViewerError::ReceiptNotFound {
            chart: args.chart.clone().unwrap_or_default(),
            index: args.receipt.unwrap_or_default(),
        });
    }

    let entry = pick(candidates, args)?;
    Ok(Target::Receipt {
        chart: entry.chart_number,
        index: entry.receipt_index,
    })
}

fn pick(candidates: Vec<CatalogEntry>, args: &SelectArgs) -> Result<CatalogEntry> {
    match resolve_selection(candidates) {
        Selection::Unique(entry) => Ok(entry),
        Selection::NoMatch => Err(ViewerError::NoMatch(describe(args))),
        Selection::Ambiguous(entries) => {
            if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
                prompt_selection(entries)
            } else {
                Err(ambiguous(&entries))
            }
        }
    }
}

fn describe(args: &SelectArgs) -> String {
    match (&args.chart, &args.query) {
        (Some(chart), _) => format!("カルテ番号 {}", chart),
        (None, Some(query)) => query.clone(),
        (None, None) => String::new(),
    }
}

/// 複数候補のエラー
pub fn ambiguous(entries: &[CatalogEntry]) -> ViewerError {
    let candidates = entries
        .iter()
        .map(|e| format!("  {} (レセプト {}: {})", e.option_label(), e.receipt_index, e.receipt_number))
        .collect::<Vec<_>>()
        .join("\n");
    ViewerError::AmbiguousSelection {
        count: entries.len(),
        candidates,
    }
}

fn prompt_selection(mut entries: Vec<CatalogEntry>) -> Result<CatalogEntry> {
    let options: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.receipt_number.is_empty() {
                e.option_label()
            } else {
                format!("{} (No.{})", e.option_label(), e.receipt_number)
            }
        })
        .collect();

    let selected = Select::new()
        .with_prompt(format!("{}件が一致しました。患者を選択", entries.len()))
        .items(&options)
        .default(0)
        .interact()
        .map_err(|e| ViewerError::Prompt(e.to_string()))?;

    Ok(entries.swap_remove(selected))
}
