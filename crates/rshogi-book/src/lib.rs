//! 定跡データ変換ライブラリ
//!
//! 人手で書かれた局面キーの定跡手集（JSON）を、指し手選択エンジンが読み込む
//! 重み付き定跡カタログへ変換する。
//!
//! パイプライン:
//! 1. [`coordinate`] - 2文字の升目表記を 0 始まりの (段, 筋) に変換
//! 2. [`classifier`] - 駒種と指し手カテゴリを推定（盤面は見ない）
//! 3. [`evaluator`] - 重み（0〜1000）と評価値を算出
//! 4. [`aggregator`] - 局面ごとに指し手をまとめる
//! 5. [`export`] / [`stats`] - ソース出力・カタログ出力・統計

pub mod aggregator;
pub mod classifier;
pub mod convert;
pub mod coordinate;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod input;
pub mod ordered;
pub mod stats;
pub mod tables;
pub mod types;

pub use aggregator::{PositionAggregator, aggregate};
pub use classifier::{Classification, MoveContext, MoveHeuristic, TableHeuristic};
pub use convert::Converter;
pub use coordinate::{BoardCoord, Dialect, translate};
pub use error::{BookError, BookResult};
pub use evaluator::Score;
pub use export::{CatalogDocument, render_catalog, render_source};
pub use input::{BookInput, OpeningRecord, RawMove, RawMoveRecord, RawOrigin};
pub use stats::BookStatistics;
pub use tables::HeuristicTables;
pub use types::{
    CATALOG_VERSION, ClassifiedMove, MAX_WEIGHT, MoveCategory, OpeningCatalog, PieceType, Position,
};
