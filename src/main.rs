use anyhow::Context;
use clap::Parser;
use rece_common::{build_catalog, patient_rows, search};
use rece_viewer::{cli, config, export, render, select, source};
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    let dialect = cli.dialect.unwrap_or(config.dialect);

    match cli.command {
        Commands::List { input, query, patients } => {
            println!("📋 rece-viewer - レセプト一覧 ({})\n", dialect.label());

            let months = source::load_receipts(&input, dialect, &config)?;
            println!("✔ {}件のレセプトデータを読み込みました\n", months.len());

            if patients {
                println!("👥 患者一覧");
                for line in render::patient_lines(&patient_rows(&months)) {
                    println!("{}", line);
                }
                return Ok(());
            }

            let catalog = build_catalog(&months);
            let found = search(&catalog, query.as_deref().unwrap_or(""));
            if found.is_empty() {
                println!("検索条件に一致する患者が見つかりませんでした。");
                return Ok(());
            }

            println!("📊 {}件の患者が見つかりました（全{}件中）", found.len(), catalog.len());
            for line in render::catalog_lines(&found) {
                println!("{}", line);
            }
        }

        Commands::Show { input, select: select_args, record_type } => {
            let months = source::load_receipts(&input, dialect, &config)?;
            let target = select::resolve_target(&months, &select_args)?;
            let group = target.type_group(&months)?;

            println!("📋 患者データ: {}\n", target.label(&months));
            if let select::Target::Chart { chart } = &target {
                let count = rece_common::lookup_chart(&months, chart).map_or(0, <[_]>::len);
                if count > 1 {
                    println!("⚠️ この患者には{}件のレセプトがあります。すべてのレセプトのデータを統合して表示します。\n", count);
                }
            }

            if group.is_empty() {
                println!("レコードタイプが見つかりませんでした。");
                return Ok(());
            }

            if let Some(tag) = record_type.as_deref() {
                if group.get(tag).is_none() {
                    return Err(rece_viewer::error::ViewerError::UnknownRecordType(tag.to_string()).into());
                }
            }

            for line in render::group_lines(&group, record_type.as_deref()) {
                println!("{}", line);
            }
        }

        Commands::Export { input, select: select_args, format, record_type, output, no_bom } => {
            println!("📄 rece-viewer - エクスポート\n");

            let months = source::load_receipts(&input, dialect, &config)?;
            let target = select::resolve_target(&months, &select_args)?;
            let group = target.type_group(&months)?;
            let label = target.label(&months);
            let title = format!("{} レセプトデータ", label);

            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let options = export::ExportOptions {
                label: &label,
                title: &title,
                record_type: record_type.as_deref(),
                bom: config.csv_bom && !no_bom,
            };

            let written = export::export_group(&group, &format, &output_dir, &options)?;
            println!("\n✅ エクスポート完了（{}ファイル）", written.len());
        }

        Commands::Config { set_dialect, set_parser, show } => {
            let mut config = config;

            if let Some(dialect) = set_dialect {
                config.set_dialect(dialect)?;
                println!("✔ レセプトタイプを設定しました: {}", dialect.label());
            }

            if let Some(command) = set_parser {
                config.set_parser_command(command)?;
                println!("✔ パーサーコマンドを設定しました");
            }

            if show {
                println!("設定:");
                println!("  レセプトタイプ: {}", config.dialect.label());
                println!(
                    "  パーサー: {}",
                    config.parser_command().unwrap_or_else(|| "未設定".into())
                );
                println!("  CSV BOM: {}", if config.csv_bom { "あり" } else { "なし" });
                println!("  出力先: {}", config.output_dir.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rece_viewer=debug,rece_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
