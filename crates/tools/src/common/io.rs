//! ファイルI/Oユーティリティ（gzip対応）

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use rshogi_book::export::load_catalog;
use rshogi_book::{BookError, BookInput, HeuristicTables, OpeningCatalog};

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// `-` は stdin、拡張子 `.gz` は gzip として開く
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let p = path.as_ref();
    if p.to_string_lossy() == "-" {
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, io::stdin())));
    }
    let f = File::open(p)?;
    let ext = p.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();

    if ext == "gz" {
        let dec = flate2::read::GzDecoder::new(f);
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, dec)));
    }
    Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, f)))
}

/// 存在しないパスは処理開始前に [`BookError::MissingInputFile`] で弾く
fn ensure_exists(path: &Path) -> Result<()> {
    if path.to_string_lossy() != "-" && !path.exists() {
        return Err(BookError::MissingInputFile(path.to_path_buf()).into());
    }
    Ok(())
}

/// 定跡入力 JSON を読み込む
pub fn read_book_input(path: &Path) -> Result<BookInput> {
    ensure_exists(path)?;
    let reader = open_reader(path).with_context(|| format!("failed to open {}", path.display()))?;
    BookInput::from_reader(reader).with_context(|| format!("failed to parse {}", path.display()))
}

/// 変換済みカタログを読み込んで検証する
pub fn read_catalog(path: &Path) -> Result<OpeningCatalog> {
    ensure_exists(path)?;
    let reader = open_reader(path).with_context(|| format!("failed to open {}", path.display()))?;
    load_catalog(reader).with_context(|| format!("failed to load catalog {}", path.display()))
}

/// ヒューリスティックテーブル（TOML）を読み込む
pub fn read_tables(path: &Path) -> Result<HeuristicTables> {
    ensure_exists(path)?;
    HeuristicTables::load(path).with_context(|| format!("failed to load tables {}", path.display()))
}
