//! JSON出力
//!
//! `{ "RE": [ {...}, ... ], "SB": [...] }` 形式。
//! レコード識別・項目とも初出順のまま出力し、読み戻すと元のグループに一致する。

use crate::error::Result;
use crate::record::TypeGroup;

/// グループをJSONに変換
pub fn export_json(group: &TypeGroup) -> Result<String> {
    Ok(serde_json::to_string_pretty(group)?)
}

/// JSONをグループに読み戻す
pub fn import_json(json: &str) -> Result<TypeGroup> {
    Ok(serde_json::from_str(json)?)
}
