//! レセプト一覧の検索
//!
//! 氏名・カタカナ氏名・カルテ番号・レセプト番号の部分一致（大文字小文字を区別しない）。
//! 並べ替えは行わず、一覧の順序のまま絞り込む。

use crate::catalog::CatalogEntry;

/// 検索用インデックス
///
/// 各行の検索対象項目を小文字化して保持する。
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    haystacks: Vec<[String; 4]>,
}

impl SearchIndex {
    /// カルテ番号は表示ラベルで検索する（空のカルテ番号は「未設定」に一致する）。
    pub fn new(entries: &[CatalogEntry]) -> Self {
        let haystacks = entries
            .iter()
            .map(|e| {
                [
                    e.patient.name.to_lowercase(),
                    e.patient.kana_name.to_lowercase(),
                    e.chart_label().to_lowercase(),
                    e.receipt_number.to_lowercase(),
                ]
            })
            .collect();
        Self { haystacks }
    }

    /// 一致した行の位置（一覧順）
    ///
    /// 空のクエリはすべての行に一致する。
    pub fn matches(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return (0..self.haystacks.len()).collect();
        }

        let needle = query.to_lowercase();
        self.haystacks
            .iter()
            .enumerate()
            .filter(|(_, fields)| {
                fields
                    .iter()
                    .any(|field| !field.is_empty() && field.contains(&needle))
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }
}

/// 一覧を検索して一致した行を返す
pub fn search(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let index = SearchIndex::new(entries);
    index
        .matches(query)
        .into_iter()
        .map(|i| entries[i].clone())
        .collect()
}

/// 検索結果からの選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1件に確定
    Unique(CatalogEntry),
    /// 複数件（呼び出し側で1件に絞る）
    Ambiguous(Vec<CatalogEntry>),
    /// 一致なし
    NoMatch,
}

impl Selection {
    /// 確定した (カルテ番号, レセプト位置)
    pub fn key(&self) -> Option<(&str, usize)> {
        match self {
            Selection::Unique(entry) => Some(entry.key()),
            _ => None,
        }
    }
}

/// 検索結果を選択に変換
pub fn resolve_selection(mut matches: Vec<CatalogEntry>) -> Selection {
    match matches.len() {
        0 => Selection::NoMatch,
        1 => Selection::Unique(matches.remove(0)),
        _ => Selection::Ambiguous(matches),
    }
}
