//! 定跡カタログ検証ツール
//!
//! convert_opening_book が出力したカタログを読み込み、不変条件を検証して統計を表示する。
//!
//! 使い方:
//!   verify_opening_book out/opening_book.json
//!   verify_opening_book out/opening_book.json --json

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rshogi_book::BookStatistics;
use tools::common::read_catalog;

#[derive(Parser, Debug)]
#[command(name = "verify_opening_book", version)]
#[command(about = "定跡カタログを検証し統計を表示する")]
struct Cli {
    /// カタログ JSON（.gz 可）
    catalog: PathBuf,

    /// 統計を JSON で出力
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = read_catalog(&cli.catalog)?;
    log::info!("catalog version {} is valid", catalog.version);

    let stats = BookStatistics::from_catalog(&catalog);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{stats}");
    }
    Ok(())
}
