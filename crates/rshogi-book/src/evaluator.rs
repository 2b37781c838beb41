//! 重み・評価値の算出
//!
//! - 重み = 戦法の基本重み + (成りボーナス または 打ちボーナス) + 戦法固有の升目ボーナス、
//!   [`MAX_WEIGHT`] で頭打ち
//! - 評価値 = カテゴリの基本値 + 戦法ティアボーナス + 成りボーナス
//!
//! 評価値には上限を設けない（重みとは非対称）。

use crate::classifier::MoveContext;
use crate::tables::HeuristicTables;
use crate::types::{MAX_WEIGHT, MoveCategory};

/// 1手分の採点結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub weight: u16,
    pub evaluation: i32,
}

/// 重み（0..=MAX_WEIGHT）
pub fn weight(tables: &HeuristicTables, ctx: &MoveContext<'_>) -> u16 {
    let base = u32::from(tables.base_weight(ctx.opening));
    // 成りと打ちは排他（成りを優先）
    let flag_bonus = if ctx.promote {
        tables.promotion_bonus
    } else if ctx.is_drop() {
        tables.drop_bonus
    } else {
        0
    };
    let square_bonus = tables.square_bonus(ctx.opening, ctx.from);

    let total = base + u32::from(flag_bonus) + u32::from(square_bonus);
    total.min(u32::from(MAX_WEIGHT)) as u16
}

/// 評価値
pub fn evaluation(tables: &HeuristicTables, ctx: &MoveContext<'_>, category: MoveCategory) -> i32 {
    let mut eval = tables.category_score(category).saturating_add(tables.tier_bonus(ctx.opening));
    if ctx.promote {
        eval = eval.saturating_add(tables.promotion_eval_bonus);
    }
    eval
}

pub fn score(tables: &HeuristicTables, ctx: &MoveContext<'_>, category: MoveCategory) -> Score {
    Score {
        weight: weight(tables, ctx),
        evaluation: evaluation(tables, ctx, category),
    }
}
