//! 定跡カタログの出力
//!
//! どちらの出力もカタログのみから導出し、重みや分類を再計算しない。

mod catalog;
mod source;

pub use catalog::{CatalogDocument, load_catalog, parse_catalog, render_catalog};
pub use source::{render_source, write_source};
