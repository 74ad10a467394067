//! レセプトデータの型定義
//!
//! 外部パーサーの出力を受け取るための型:
//! - FlatRecord: レコード1行（項目名 → 値、順序保持）
//! - Receipt: レセプト1件分のレコード列
//! - MonthlyReceipts: カルテ番号 → レセプト列

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// レコード識別の項目名（優先順）
pub const RECORD_TYPE_KEYS: [&str; 2] = ["レコード識別情報", "レコード識別番号"];

/// レセプト共通レコードの識別
pub const RE_TAG: &str = "RE";

pub const FIELD_RECEIPT_NUMBER: &str = "レセプト番号";
pub const FIELD_NAME: &str = "氏名";
pub const FIELD_KANA_NAME: &str = "カタカナ氏名";
pub const FIELD_BIRTH_DATE: &str = "生年月日";
pub const FIELD_SEX: &str = "男女区分";
pub const FIELD_CARE_MONTH: &str = "診療年月";

/// カルテ番号 → レセプト列（パーサーのキー順を保持）
pub type MonthlyReceipts = IndexMap<String, Vec<Receipt>>;

/// レコード1行
///
/// 値はすべて文字列に正規化して保持する。
/// `null` は空文字、数値・真偽値は文字列表現になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, Value>")]
pub struct FlatRecord(IndexMap<String, String>);

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 項目を追加（既存の項目は位置を保ったまま上書き）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// 値を取得（なければ `default`）
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(default)
    }

    /// 値を取得（なければ空文字）
    pub fn get(&self, key: &str) -> &str {
        self.get_or(key, "")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// レコード識別を解決
    ///
    /// `レコード識別情報` を優先し、空または欠落なら `レコード識別番号` を見る。
    /// どちらも空なら `None`。
    pub fn type_tag(&self) -> Option<&str> {
        RECORD_TYPE_KEYS
            .iter()
            .map(|key| self.get(key))
            .find(|tag| !tag.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<IndexMap<String, Value>> for FlatRecord {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| (key, value_to_text(value)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 患者情報（REレコードから取得）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub name: String,       // 氏名
    pub kana_name: String,  // カタカナ氏名
    pub birth_date: String, // 生年月日
    pub sex: String,        // 男女区分
    pub care_month: String, // 診療年月
}

impl PatientSnapshot {
    /// REレコードから生成（レコードがなければ全項目空）
    pub fn from_record(record: Option<&FlatRecord>) -> Self {
        match record {
            Some(r) => Self {
                name: r.get(FIELD_NAME).to_string(),
                kana_name: r.get(FIELD_KANA_NAME).to_string(),
                birth_date: r.get(FIELD_BIRTH_DATE).to_string(),
                sex: r.get(FIELD_SEX).to_string(),
                care_month: r.get(FIELD_CARE_MONTH).to_string(),
            },
            None => Self::default(),
        }
    }
}

/// レセプト1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReceiptRepr")]
pub struct Receipt {
    pub records: Vec<FlatRecord>,
}

/// パーサー出力は `{"records": [...]}` とレコード配列のどちらも受け付ける
#[derive(Deserialize)]
#[serde(untagged)]
enum ReceiptRepr {
    Wrapped { records: Vec<FlatRecord> },
    Bare(Vec<FlatRecord>),
}

impl From<ReceiptRepr> for Receipt {
    fn from(repr: ReceiptRepr) -> Self {
        match repr {
            ReceiptRepr::Wrapped { records } | ReceiptRepr::Bare(records) => Self { records },
        }
    }
}

impl Receipt {
    pub fn new(records: Vec<FlatRecord>) -> Self {
        Self { records }
    }

    /// 指定したレコード識別のレコードを出現順に取得
    pub fn records_of<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a FlatRecord> {
        self.records.iter().filter(move |r| r.type_tag() == Some(tag))
    }

    /// 指定したレコード識別の最初のレコード
    pub fn first_of(&self, tag: &str) -> Option<&FlatRecord> {
        self.records.iter().find(|r| r.type_tag() == Some(tag))
    }

    /// レセプト番号（最初のREレコードから。なければ空文字）
    pub fn receipt_number(&self) -> &str {
        self.first_of(RE_TAG)
            .map(|r| r.get(FIELD_RECEIPT_NUMBER))
            .unwrap_or("")
    }

    /// 患者情報（最初のREレコードから）
    pub fn patient(&self) -> PatientSnapshot {
        PatientSnapshot::from_record(self.first_of(RE_TAG))
    }
}

/// レセプトの種類
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// 医科レセプト
    #[default]
    Ika,
    /// DPCレセプト
    Dpc,
}

impl Dialect {
    /// パーサーに渡すコード
    pub fn code(&self) -> &'static str {
        match self {
            Dialect::Ika => "ika",
            Dialect::Dpc => "dpc",
        }
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::Ika => "医科",
            Dialect::Dpc => "DPC",
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ika" | "医科" => Ok(Dialect::Ika),
            "dpc" => Ok(Dialect::Dpc),
            _ => Err(format!("Unknown dialect: {}. Use ika or dpc", s)),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
