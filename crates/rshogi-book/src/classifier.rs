//! 駒種・指し手カテゴリの推定
//!
//! 実際の盤面は参照せず、戦法名と升目のパターンだけで推定する近似。
//! 推定ロジックは [`MoveHeuristic`] の背後に隔離してあり、将来局面解析に基づく実装へ
//! 差し替えても集約・出力側には影響しない。

use crate::coordinate::BoardCoord;
use crate::tables::HeuristicTables;
use crate::types::{MoveCategory, PieceType};

/// 推定の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext<'a> {
    pub opening: &'a str,
    /// 駒打ちなら `None`
    pub from: Option<BoardCoord>,
    pub to: BoardCoord,
    pub promote: bool,
    /// 入力で明示された駒種
    pub piece_hint: Option<PieceType>,
}

impl MoveContext<'_> {
    #[inline]
    pub fn is_drop(&self) -> bool {
        self.from.is_none()
    }
}

/// 推定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub piece_type: PieceType,
    pub category: MoveCategory,
}

/// `(戦法名, 移動元, 移動先, フラグ) → (駒種, カテゴリ)` の推定戦略
pub trait MoveHeuristic {
    fn classify(&self, ctx: &MoveContext<'_>) -> Classification;
}

/// [`HeuristicTables`] によるテーブル駆動の推定
#[derive(Debug, Clone, Copy)]
pub struct TableHeuristic<'t> {
    tables: &'t HeuristicTables,
}

impl<'t> TableHeuristic<'t> {
    pub fn new(tables: &'t HeuristicTables) -> Self {
        TableHeuristic { tables }
    }
}

impl MoveHeuristic for TableHeuristic<'_> {
    fn classify(&self, ctx: &MoveContext<'_>) -> Classification {
        Classification {
            piece_type: resolve_piece(self.tables, ctx),
            category: resolve_category(self.tables, ctx),
        }
    }
}

/// 駒種を決める
///
/// 明示ヒント → 戦法×升目ルール → 既定駒種 の順。
pub fn resolve_piece(tables: &HeuristicTables, ctx: &MoveContext<'_>) -> PieceType {
    ctx.piece_hint
        .or_else(|| tables.piece_rule(ctx.opening, ctx.from, ctx.to))
        .unwrap_or(tables.default_piece)
}

/// 指し手カテゴリを決める（最初に一致したものを採用）
pub fn resolve_category(tables: &HeuristicTables, ctx: &MoveContext<'_>) -> MoveCategory {
    if ctx.is_drop() || ctx.promote {
        MoveCategory::Tactical
    } else if tables.is_central(ctx.to) {
        MoveCategory::CentralControl
    } else if tables.is_king_safety(ctx.to) {
        MoveCategory::KingSafety
    } else if tables.is_development_opening(ctx.opening) {
        MoveCategory::Development
    } else {
        MoveCategory::Positional
    }
}
