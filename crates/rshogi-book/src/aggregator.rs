//! 局面ごとの集約
//!
//! 局面は初出順、局面内の手は入力順に並べる。同一の手の重複は除去しない。

use std::collections::HashMap;

use crate::types::{ClassifiedMove, Position};

#[derive(Debug, Default)]
pub struct PositionAggregator {
    positions: Vec<Position>,
    index: HashMap<String, usize>,
}

impl PositionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: &str, mv: ClassifiedMove) {
        let slot = match self.index.get(position).copied() {
            Some(slot) => slot,
            None => {
                self.positions.push(Position {
                    id: position.to_string(),
                    moves: Vec::new(),
                });
                self.index.insert(position.to_string(), self.positions.len() - 1);
                self.positions.len() - 1
            }
        };
        self.positions[slot].moves.push(mv);
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn finish(self) -> Vec<Position> {
        self.positions
    }
}

/// `(局面 ID, 指し手)` の列を局面にまとめる
pub fn aggregate<I>(pairs: I) -> Vec<Position>
where
    I: IntoIterator<Item = (String, ClassifiedMove)>,
{
    let mut aggregator = PositionAggregator::new();
    for (position, mv) in pairs {
        aggregator.push(&position, mv);
    }
    aggregator.finish()
}
