//! 定跡 JSON 変換ツール
//!
//! 人手で書かれた局面キーの定跡手集を、重み・評価値つきの定跡カタログへ変換する。
//!
//! 使い方:
//!   # カタログ（opening_book.json）のみ出力
//!   convert_opening_book openingBook.json -o out/
//!
//!   # 統計レポートと埋め込み用 Rust ソースも出力
//!   convert_opening_book openingBook.json -o out/ --report --rust-code
//!
//!   # 英字表記（"7g"）の入力、テーブル差し替え
//!   convert_opening_book book.json --dialect algebraic --tables my_tables.toml

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rshogi_book::{
    BookStatistics, Converter, Dialect, HeuristicTables, render_catalog, render_source,
};
use tools::common::{ArtifactSet, read_book_input, read_tables};

const CATALOG_FILE: &str = "opening_book.json";
const REPORT_FILE: &str = "migration_report.txt";
const SOURCE_FILE: &str = "opening_book_generated.rs";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DialectArg {
    /// "27" 形式（筋・段とも数字）
    Digits,
    /// "2g" 形式（段は a-i）
    Algebraic,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Digits => Dialect::Digits,
            DialectArg::Algebraic => Dialect::Algebraic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "convert_opening_book", version)]
#[command(about = "定跡 JSON を重み付き定跡カタログに変換する")]
struct Cli {
    /// 入力 JSON（.gz 可、- で stdin）
    input: PathBuf,

    /// 出力ディレクトリ
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// 統計レポート（migration_report.txt）を出力
    #[arg(short, long)]
    report: bool,

    /// 埋め込み用 Rust ソース（opening_book_generated.rs）を出力
    #[arg(long)]
    rust_code: bool,

    /// 入力の升目表記
    #[arg(long, value_enum, default_value_t = DialectArg::Digits)]
    dialect: DialectArg,

    /// ヒューリスティックテーブル（TOML）。省略時は組み込みテーブル
    #[arg(long)]
    tables: Option<PathBuf>,
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
    let input = read_book_input(&cli.input)?;
    let tables = match &cli.tables {
        Some(path) => read_tables(path)?,
        None => HeuristicTables::builtin(),
    };
    log::info!("heuristic tables: {} (version {})", tables.name, tables.version);
    log::info!(
        "converting {} openings / {} moves ({} dialect)",
        input.openings.len(),
        input.total_records(),
        Dialect::from(cli.dialect)
    );

    let catalog = Converter::new(&tables, cli.dialect.into())
        .convert_book(&input)
        .with_context(|| format!("conversion of {} failed", cli.input.display()))?;

    // 全成果物をメモリ上で作ってから書き出す。カタログは最後に rename する
    let mut artifacts = ArtifactSet::new(&cli.output)?;
    if cli.report {
        artifacts.stage(REPORT_FILE, &BookStatistics::from_catalog(&catalog).to_string())?;
    }
    if cli.rust_code {
        artifacts.stage(SOURCE_FILE, &render_source(&catalog))?;
    }
    artifacts.stage(CATALOG_FILE, &render_catalog(&catalog)?)?;

    for path in artifacts.commit()? {
        log::info!("saved {}", path.display());
    }
    println!(
        "Converted {} positions ({} moves)",
        catalog.positions.len(),
        catalog.total_moves()
    );
    Ok(())
}
