//! 定跡カタログの型

mod category;
mod piece;

pub use category::MoveCategory;
pub use piece::PieceType;

use serde::{Deserialize, Serialize};

use crate::coordinate::BoardCoord;

/// 重みの上限
pub const MAX_WEIGHT: u16 = 1000;

/// カタログ形式のバージョン
pub const CATALOG_VERSION: u32 = 1;

/// 分類・採点済みの定跡手
///
/// 不変条件:
/// - `weight <= MAX_WEIGHT`
/// - `is_drop` なら `from` は `None`（(0, 0) とは区別される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMove {
    pub from: Option<BoardCoord>,
    pub to: BoardCoord,
    pub piece_type: PieceType,
    pub category: MoveCategory,
    pub is_drop: bool,
    pub is_promotion: bool,
    pub weight: u16,
    pub evaluation: i32,
    pub opening_name: String,
    pub move_notation: String,
}

impl ClassifiedMove {
    /// 不変条件を満たしていなければ理由を返す
    pub fn invariant_violation(&self) -> Option<String> {
        if self.weight > MAX_WEIGHT {
            return Some(format!("weight {} exceeds {MAX_WEIGHT}", self.weight));
        }
        match (self.is_drop, self.from) {
            (true, Some(from)) => Some(format!("drop move has a from-square {from}")),
            (false, None) => Some("board move has no from-square".to_string()),
            _ => None,
        }
    }
}

/// 局面（SFEN 風の文字列）とその局面の定跡手
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: String,
    pub moves: Vec<ClassifiedMove>,
}

/// 変換結果の定跡カタログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningCatalog {
    pub version: u32,
    pub positions: Vec<Position>,
}

impl OpeningCatalog {
    pub fn new(positions: Vec<Position>) -> Self {
        OpeningCatalog {
            version: CATALOG_VERSION,
            positions,
        }
    }

    pub fn total_moves(&self) -> usize {
        self.positions.iter().map(|p| p.moves.len()).sum()
    }

    /// 全局面の指し手を局面順・入力順に辿る
    pub fn moves(&self) -> impl Iterator<Item = &ClassifiedMove> {
        self.positions.iter().flat_map(|p| p.moves.iter())
    }

    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_move(is_drop: bool, from: Option<BoardCoord>) -> ClassifiedMove {
        ClassifiedMove {
            from,
            to: BoardCoord::new(4, 4).unwrap(),
            piece_type: PieceType::Pawn,
            category: MoveCategory::Tactical,
            is_drop,
            is_promotion: false,
            weight: 550,
            evaluation: 30,
            opening_name: "Test".to_string(),
            move_notation: "P*5e".to_string(),
        }
    }

    #[test]
    fn test_drop_from_is_distinct_from_origin() {
        let origin = BoardCoord::new(0, 0).unwrap();
        assert!(sample_move(true, None).invariant_violation().is_none());
        assert!(sample_move(true, Some(origin)).invariant_violation().is_some());
        assert!(sample_move(false, Some(origin)).invariant_violation().is_none());
        assert!(sample_move(false, None).invariant_violation().is_some());
    }

    #[test]
    fn test_weight_over_cap_is_violation() {
        let mut mv = sample_move(true, None);
        mv.weight = MAX_WEIGHT + 1;
        assert!(mv.invariant_violation().unwrap().contains("exceeds"));
    }

    #[test]
    fn test_catalog_total_moves() {
        let catalog = OpeningCatalog::new(vec![
            Position { id: "a".into(), moves: vec![sample_move(true, None); 2] },
            Position { id: "b".into(), moves: vec![sample_move(true, None)] },
        ]);
        assert_eq!(catalog.version, CATALOG_VERSION);
        assert_eq!(catalog.total_moves(), 3);
        assert_eq!(catalog.moves().count(), 3);
        assert!(catalog.position("b").is_some());
        assert!(catalog.position("c").is_none());
    }
}
