//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use rece_common::TypeGroup;
use rece_viewer::cli::{ExportFormat, SelectArgs};
use rece_viewer::config::Config;
use rece_viewer::error::ViewerError;
use rece_viewer::export::{export_group, ExportOptions};
use rece_viewer::select::resolve_target;
use rece_viewer::source::{load_receipts, parse_dump};
use rece_common::Dialect;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイル
#[test]
fn test_load_nonexistent_file() {
    let result = load_receipts(Path::new("/nonexistent/path/12345.UKE"), Dialect::Ika, &Config::default());
    assert!(matches!(result, Err(ViewerError::FileNotFound(_))));
}

/// 対応していない拡張子
#[test]
fn test_load_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("receipt.pdf");
    std::fs::write(&path, "dummy").unwrap();

    let result = load_receipts(&path, Dialect::Ika, &Config::default());
    assert!(matches!(result, Err(ViewerError::UnsupportedFile(_))));
}

/// 空のパーサー出力
#[test]
fn test_load_empty_dump() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dump.json");
    std::fs::write(&path, "{}").unwrap();

    let result = load_receipts(&path, Dialect::Ika, &Config::default());
    assert!(matches!(result, Err(ViewerError::NoReceipts)));
}

/// 壊れたパーサー出力はパーサーのエラーとして扱う
#[test]
fn test_load_broken_dump() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dump.json");
    std::fs::write(&path, "{\"1001\": [").unwrap();

    let err = load_receipts(&path, Dialect::Ika, &Config::default()).unwrap_err();
    assert!(matches!(err, ViewerError::Common(rece_common::Error::Upstream(_))));
}

/// 一致なしは選択エラー
#[test]
fn test_select_no_match() {
    let months = parse_dump(r#"{"1001": [[{"レコード識別情報": "RE", "氏名": "山田太郎"}]]}"#).unwrap();
    let args = SelectArgs {
        query: Some("鈴木".into()),
        ..Default::default()
    };
    let err = resolve_target(&months, &args).unwrap_err();
    assert!(matches!(err, ViewerError::NoMatch(_)));
}

/// 端末がなければ複数件一致はエラー
#[test]
fn test_select_ambiguous_without_terminal() {
    let months = parse_dump(
        r#"{"1001": [[{"レコード識別情報": "RE", "氏名": "山田太郎"}]],
            "1002": [[{"レコード識別情報": "RE", "氏名": "山田花子"}]]}"#,
    )
    .unwrap();
    let args = SelectArgs {
        query: Some("山田".into()),
        ..Default::default()
    };

    // テスト実行時は標準入力が端末でない
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return;
    }
    let err = resolve_target(&months, &args).unwrap_err();
    match err {
        ViewerError::AmbiguousSelection { count, candidates } => {
            assert_eq!(count, 2);
            assert!(candidates.contains("1001 - 山田太郎"));
            assert!(candidates.contains("1002 - 山田花子"));
        }
        other => panic!("複数件エラーになるはず: {:?}", other),
    }
}

/// 存在しないレコードタイプのCSV出力
#[test]
fn test_export_unknown_record_type() {
    let dir = tempdir().expect("Failed to create temp dir");
    let opts = ExportOptions {
        label: "1001",
        title: "テスト",
        record_type: Some("ZZ"),
        bom: true,
    };
    let result = export_group(&TypeGroup::new(), &ExportFormat::Csv, dir.path(), &opts);
    assert!(matches!(result, Err(ViewerError::UnknownRecordType(_))));
}

/// ViewerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ViewerError::Config("テスト設定エラー".to_string()),
        ViewerError::FileNotFound("RECEIPTC.UKE".to_string()),
        ViewerError::UnsupportedFile("receipt.pdf".to_string()),
        ViewerError::MissingParser,
        ViewerError::NoReceipts,
        ViewerError::NoMatch("鈴木".to_string()),
        ViewerError::UnknownRecordType("ZZ".to_string()),
        ViewerError::ParserExecution("receparser: not found".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// パーサー未設定のメッセージ確認
#[test]
fn test_missing_parser_message() {
    let display = format!("{}", ViewerError::MissingParser);
    assert!(display.contains("パーサー"));
    assert!(display.contains("rece-viewer config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ViewerError = io_err.into();
    assert!(matches!(err, ViewerError::Io(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = rece_common::Error::Upstream("RE record missing at line 3".to_string());
    let err: ViewerError = common_err.into();

    assert!(matches!(err, ViewerError::Common(_)));
    assert!(format!("{}", err).contains("RE record missing at line 3"));
}
