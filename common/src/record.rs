//! レコード識別ごとのグループ化
//!
//! レセプト1件（またはカルテ単位で統合した複数件）のレコードを
//! レコード識別（RE, HO, SB, KO ...）ごとにまとめる。
//! グループ内の順序は元の出現順、グループの順序は初出順。

use crate::types::{FlatRecord, Receipt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// レコード識別 → レコード列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeGroup(IndexMap<String, Vec<FlatRecord>>);

impl TypeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを追加（初出のレコード識別は末尾にグループを作る）
    pub fn push(&mut self, tag: &str, record: FlatRecord) {
        match self.0.get_mut(tag) {
            Some(records) => records.push(record),
            None => {
                self.0.insert(tag.to_string(), vec![record]);
            }
        }
    }

    /// 別のグループを連結（レコード識別ごとに後ろへ追加）
    pub fn extend(&mut self, other: TypeGroup) {
        for (tag, records) in other.0 {
            self.0.entry(tag).or_default().extend(records);
        }
    }

    pub fn get(&self, tag: &str) -> Option<&[FlatRecord]> {
        self.0.get(tag).map(Vec::as_slice)
    }

    /// レコード識別（初出順）
    pub fn tags(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// レコード識別（辞書順）
    pub fn sorted_tags(&self) -> Vec<&str> {
        let mut tags = self.tags();
        tags.sort_unstable();
        tags
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FlatRecord])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// レコード識別の数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 全レコード数
    pub fn record_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// グループ化の結果
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: TypeGroup,
    /// レコード識別がなく除外したレコード数
    pub untagged: usize,
}

/// レコード列をレコード識別ごとにまとめる
///
/// レコード識別のないレコードは除外し、件数だけ数える。
pub fn group_records<'a, I>(records: I) -> Grouping
where
    I: IntoIterator<Item = &'a FlatRecord>,
{
    let mut grouping = Grouping::default();

    for record in records {
        match record.type_tag() {
            Some(tag) => grouping.groups.push(tag, record.clone()),
            None => grouping.untagged += 1,
        }
    }

    if grouping.untagged > 0 {
        tracing::debug!(
            untagged = grouping.untagged,
            "レコード識別のないレコードを除外"
        );
    }

    grouping
}

/// レセプト1件をレコード識別ごとにまとめる
pub fn type_group(receipt: &Receipt) -> TypeGroup {
    group_records(&receipt.records).groups
}
