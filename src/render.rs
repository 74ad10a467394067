//! 端末への表示

use rece_common::{columns, summarize, CatalogEntry, PatientRow, TypeGroup};

const CATALOG_HEADER: [&str; 8] = [
    "カルテ番号",
    "レセプト",
    "レセプト番号",
    "氏名",
    "カタカナ氏名",
    "生年月日",
    "男女区分",
    "診療年月",
];

const PATIENT_HEADER: [&str; 7] = [
    "カルテ番号",
    "氏名",
    "カタカナ氏名",
    "生年月日",
    "男女区分",
    "診療年月",
    "レセプト数",
];

/// レセプト一覧の行
pub fn catalog_lines(entries: &[CatalogEntry]) -> Vec<String> {
    let mut lines = vec![CATALOG_HEADER.join("\t")];
    lines.extend(entries.iter().map(|e| {
        [
            e.chart_label(),
            e.receipt_index.to_string().as_str(),
            e.receipt_number.as_str(),
            e.patient.name.as_str(),
            e.patient.kana_name.as_str(),
            e.patient.birth_date.as_str(),
            e.patient.sex.as_str(),
            e.patient.care_month.as_str(),
        ]
        .join("\t")
    }));
    lines
}

/// 患者一覧の行
pub fn patient_lines(rows: &[PatientRow]) -> Vec<String> {
    let mut lines = vec![PATIENT_HEADER.join("\t")];
    lines.extend(rows.iter().map(|r| {
        [
            rece_common::chart_label(&r.chart_number),
            r.patient.name.as_str(),
            r.patient.kana_name.as_str(),
            r.patient.birth_date.as_str(),
            r.patient.sex.as_str(),
            r.patient.care_month.as_str(),
            r.receipt_count.to_string().as_str(),
        ]
        .join("\t")
    }));
    lines
}

/// レコードタイプごとの表示行
///
/// `record_type` を指定するとそのタイプだけを表示する。
pub fn group_lines(group: &TypeGroup, record_type: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    for summary in summarize(group) {
        if record_type.is_some_and(|t| t != summary.record_type) {
            continue;
        }
        let records = group.get(&summary.record_type).unwrap_or_default();

        lines.push(format!("📄 {}レコード", summary.record_type));
        lines.push(format!(
            "  レコード数: {}  カラム数: {}",
            summary.record_count, summary.column_count
        ));

        let header = columns(records);
        lines.push(format!("  {}", header.join("\t")));
        for record in records {
            let row: Vec<&str> = header.iter().map(|key| record.get(key)).collect();
            lines.push(format!("  {}", row.join("\t")));
        }
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rece_common::{FlatRecord, PatientSnapshot};

    #[test]
    fn test_catalog_lines_sentinel() {
        let entries = vec![CatalogEntry {
            chart_number: String::new(),
            receipt_number: "001".into(),
            receipt_index: 0,
            patient: PatientSnapshot {
                name: "山田太郎".into(),
                ..Default::default()
            },
        }];
        let lines = catalog_lines(&entries);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("未設定\t0\t001\t山田太郎"));
    }

    #[test]
    fn test_group_lines_filter() {
        let mut group = TypeGroup::new();
        let re: FlatRecord = [("レコード識別情報", "RE"), ("氏名", "山田太郎")].into_iter().collect();
        let sb: FlatRecord = [("レコード識別情報", "SB")].into_iter().collect();
        group.push("RE", re);
        group.push("SB", sb);

        let all = group_lines(&group, None);
        assert!(all.iter().any(|l| l.contains("REレコード")));
        assert!(all.iter().any(|l| l.contains("SBレコード")));

        let only_sb = group_lines(&group, Some("SB"));
        assert!(!only_sb.iter().any(|l| l.contains("REレコード")));
    }
}
