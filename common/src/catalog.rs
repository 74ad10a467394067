//! カルテ・レセプト一覧
//!
//! カルテ番号ごとのレセプト列から、レセプト1件につき1行の一覧を作る。
//! カルテ番号が空のレセプトも除外せず、表示上は「未設定」として扱う。

use crate::record::{type_group, TypeGroup};
use crate::types::{MonthlyReceipts, PatientSnapshot, Receipt};
use serde::{Deserialize, Serialize};

/// カルテ番号が空のときの表示ラベル
pub const UNASSIGNED_CHART_LABEL: &str = "未設定";

/// 氏名が空のときの選択肢ラベル
pub const NO_NAME_LABEL: &str = "（氏名なし）";

/// 一覧の1行（レセプト1件）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// カルテ番号（空文字は未設定）
    pub chart_number: String,
    pub receipt_number: String,
    /// カルテ内のレセプト位置（0始まり）
    pub receipt_index: usize,
    pub patient: PatientSnapshot,
}

impl CatalogEntry {
    /// 表示用カルテ番号
    pub fn chart_label(&self) -> &str {
        chart_label(&self.chart_number)
    }

    /// 選択肢の表示文字列
    pub fn option_label(&self) -> String {
        let name = if self.patient.name.is_empty() {
            NO_NAME_LABEL
        } else {
            self.patient.name.as_str()
        };
        format!("{} - {}", self.chart_label(), name)
    }

    /// (カルテ番号, レセプト位置)
    pub fn key(&self) -> (&str, usize) {
        (&self.chart_number, self.receipt_index)
    }
}

/// 患者一覧の1行（カルテ単位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRow {
    pub chart_number: String,
    pub patient: PatientSnapshot,
    /// レセプト数
    pub receipt_count: usize,
}

/// カルテ番号 → 表示ラベル
pub fn chart_label(chart_number: &str) -> &str {
    if chart_number.is_empty() {
        UNASSIGNED_CHART_LABEL
    } else {
        chart_number
    }
}

/// 表示ラベル → カルテ番号
pub fn chart_key(label: &str) -> &str {
    if label == UNASSIGNED_CHART_LABEL {
        ""
    } else {
        label
    }
}

/// レセプト一覧を作成
///
/// カルテ番号はパーサーのキー順、カルテ内はレセプト順。
/// 一覧の件数は全カルテのレセプト数の合計と一致する。
pub fn build_catalog(months: &MonthlyReceipts) -> Vec<CatalogEntry> {
    let mut entries = Vec::with_capacity(months.values().map(Vec::len).sum());

    for (chart_number, receipts) in months {
        for (receipt_index, receipt) in receipts.iter().enumerate() {
            entries.push(CatalogEntry {
                chart_number: chart_number.clone(),
                receipt_number: receipt.receipt_number().to_string(),
                receipt_index,
                patient: receipt.patient(),
            });
        }
    }

    tracing::debug!(charts = months.len(), receipts = entries.len(), "レセプト一覧を作成");
    entries
}

/// カルテ単位の患者一覧を作成（患者情報は先頭レセプトから）
pub fn patient_rows(months: &MonthlyReceipts) -> Vec<PatientRow> {
    months
        .iter()
        .map(|(chart_number, receipts)| PatientRow {
            chart_number: chart_number.clone(),
            patient: receipts.first().map(Receipt::patient).unwrap_or_default(),
            receipt_count: receipts.len(),
        })
        .collect()
}

/// 複数レセプトのレコードをレコード識別ごとに統合
pub fn merged_type_group(receipts: &[Receipt]) -> TypeGroup {
    let mut merged = TypeGroup::new();
    for receipt in receipts {
        merged.extend(type_group(receipt));
    }
    merged
}

/// カルテ番号（表示ラベルも可）とレセプト位置からレセプトを取得
pub fn lookup_receipt<'a>(
    months: &'a MonthlyReceipts,
    chart: &str,
    receipt_index: usize,
) -> Option<&'a Receipt> {
    lookup_chart(months, chart)?.get(receipt_index)
}

/// カルテ番号（表示ラベルも可）からレセプト列を取得
pub fn lookup_chart<'a>(months: &'a MonthlyReceipts, chart: &str) -> Option<&'a [Receipt]> {
    resolve_chart_key(months, chart).and_then(|key| months.get(key).map(Vec::as_slice))
}

/// 実際に存在するカルテ番号を返す
///
/// そのままの値を先に探し、なければ表示ラベルとして読み替える。
pub fn resolve_chart_key<'a>(months: &'a MonthlyReceipts, chart: &str) -> Option<&'a str> {
    months
        .get_key_value(chart)
        .or_else(|| months.get_key_value(chart_key(chart)))
        .map(|(key, _)| key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlatRecord;

    fn re(receipt_number: &str, name: &str) -> FlatRecord {
        [
            ("レコード識別情報", "RE"),
            ("レセプト番号", receipt_number),
            ("氏名", name),
        ]
        .into_iter()
        .collect()
    }

    fn tagged(tag: &str) -> FlatRecord {
        [("レコード識別情報", tag)].into_iter().collect()
    }

    fn sample_months() -> MonthlyReceipts {
        let mut months = MonthlyReceipts::new();
        months.insert(
            "1001".to_string(),
            vec![
                Receipt::new(vec![re("010", "佐藤花子"), tagged("SB")]),
                Receipt::new(vec![re("011", "佐藤花子"), tagged("KO")]),
            ],
        );
        months.insert("".to_string(), vec![Receipt::new(vec![re("001", "山田太郎")])]);
        months.insert("1002".to_string(), vec![Receipt::new(vec![tagged("HO")])]);
        months
    }

    #[test]
    fn test_catalog_one_entry_per_receipt() {
        let months = sample_months();
        let catalog = build_catalog(&months);
        let expected: usize = months.values().map(Vec::len).sum();
        assert_eq!(catalog.len(), expected);

        let keys: Vec<_> = catalog.iter().map(|e| e.key()).collect();
        assert_eq!(keys, vec![("1001", 0), ("1001", 1), ("", 0), ("1002", 0)]);
    }

    #[test]
    fn test_catalog_unassigned_chart() {
        let mut months = MonthlyReceipts::new();
        months.insert("".to_string(), vec![Receipt::new(vec![re("001", "山田太郎")])]);

        let catalog = build_catalog(&months);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].chart_number, "");
        assert_eq!(catalog[0].chart_label(), "未設定");
        assert_eq!(catalog[0].receipt_number, "001");
        assert_eq!(catalog[0].patient.name, "山田太郎");
    }

    #[test]
    fn test_catalog_missing_re_defaults_to_empty() {
        let catalog = build_catalog(&sample_months());
        let entry = catalog.last().unwrap();
        assert_eq!(entry.receipt_number, "");
        assert_eq!(entry.patient, PatientSnapshot::default());
        assert_eq!(entry.option_label(), "1002 - （氏名なし）");
    }

    #[test]
    fn test_merged_type_group() {
        let months = sample_months();
        let merged = merged_type_group(&months["1001"]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.tags(), vec!["RE", "SB", "KO"]);
        let re: Vec<_> = merged.get("RE").unwrap().iter().map(|r| r.get("レセプト番号")).collect();
        assert_eq!(re, vec!["010", "011"]);
    }

    #[test]
    fn test_chart_label_round_trip() {
        assert_eq!(chart_label(""), "未設定");
        assert_eq!(chart_key("未設定"), "");
        assert_eq!(chart_key(chart_label("1001")), "1001");
    }

    #[test]
    fn test_lookup_by_sentinel_label() {
        let months = sample_months();
        let receipt = lookup_receipt(&months, "未設定", 0).expect("未設定のレセプトが見つからない");
        assert_eq!(receipt.receipt_number(), "001");
        assert!(lookup_receipt(&months, "1001", 2).is_none());
        assert!(lookup_chart(&months, "9999").is_none());
    }

    #[test]
    fn test_resolve_chart_key_prefers_literal() {
        let mut months = sample_months();
        assert_eq!(resolve_chart_key(&months, "未設定"), Some(""));
        assert_eq!(resolve_chart_key(&months, "1001"), Some("1001"));
        assert_eq!(resolve_chart_key(&months, "9999"), None);

        months.insert("未設定".to_string(), vec![Receipt::new(vec![re("099", "未設定太郎")])]);
        assert_eq!(resolve_chart_key(&months, "未設定"), Some("未設定"));
        assert_eq!(resolve_chart_key(&months, ""), Some(""));
    }

    #[test]
    fn test_patient_rows() {
        let rows = patient_rows(&sample_months());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].receipt_count, 2);
        assert_eq!(rows[0].patient.name, "佐藤花子");
        assert_eq!(rows[2].patient.name, "");
    }
}
