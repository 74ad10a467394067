//! 外部パーサーコマンドの統合テスト
//!
//! シェルスクリプトをパーサーとして実行し、成功・失敗の扱いを検証

#![cfg(unix)]

use rece_common::Dialect;
use rece_viewer::error::ViewerError;
use rece_viewer::source::{CommandParser, ReceiptParser};
use std::path::Path;
use tempfile::tempdir;

fn write_script(dir: &Path, body: &str) -> String {
    let path = dir.join("parser.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("スクリプト作成失敗");
    format!("sh {}", path.display())
}

#[test]
fn test_command_parser_reads_stdout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let script = write_script(
        dir.path(),
        r#"echo "{\"$3\": [[{\"レコード識別情報\": \"RE\", \"レセプト番号\": \"$2\"}]]}""#,
    );
    let input = dir.path().join("RECEIPTC.UKE");
    std::fs::write(&input, "dummy").unwrap();

    let months = CommandParser::new(script)
        .parse(&input, Dialect::Dpc)
        .expect("パーサー実行失敗");

    // $1 = --codes, $2 = dpc, $3 = ファイルパス
    let chart = input.display().to_string();
    assert_eq!(months[&chart][0].receipt_number(), "dpc");
}

#[test]
fn test_command_parser_failure_is_reported_verbatim() {
    let dir = tempdir().expect("Failed to create temp dir");
    let script = write_script(dir.path(), "echo 'IR record not found' >&2\nexit 1");
    let input = dir.path().join("RECEIPTC.UKE");
    std::fs::write(&input, "dummy").unwrap();

    let err = CommandParser::new(script)
        .parse(&input, Dialect::Ika)
        .unwrap_err();

    match err {
        ViewerError::Common(rece_common::Error::Upstream(message)) => {
            assert_eq!(message, "IR record not found");
        }
        other => panic!("パーサーのエラーになるはず: {:?}", other),
    }
}

#[test]
fn test_command_parser_missing_program() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("RECEIPTC.UKE");
    std::fs::write(&input, "dummy").unwrap();

    let err = CommandParser::new("rece-parser-that-does-not-exist-12345")
        .parse(&input, Dialect::Ika)
        .unwrap_err();
    assert!(matches!(err, ViewerError::ParserExecution(_)));
}
