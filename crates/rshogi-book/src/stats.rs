//! 定跡カタログの統計
//!
//! 集計のみを行い、表示は [`fmt::Display`] 実装（レポート形式）に任せる。

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::types::{OpeningCatalog, PieceType};

/// 「高」の下限
pub const HIGH_WEIGHT_THRESHOLD: u16 = 800;
/// 「中」の下限
pub const MEDIUM_WEIGHT_THRESHOLD: u16 = 500;

/// 件数つきの項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally<K> {
    pub key: K,
    pub count: usize,
}

/// 重みの3区分ヒストグラム
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeightHistogram {
    /// 800 以上
    pub high: usize,
    /// 500 以上 800 未満
    pub medium: usize,
    /// 500 未満
    pub low: usize,
}

impl WeightHistogram {
    pub fn record(&mut self, weight: u16) {
        if weight >= HIGH_WEIGHT_THRESHOLD {
            self.high += 1;
        } else if weight >= MEDIUM_WEIGHT_THRESHOLD {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

/// 重みの要約統計
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightSummary {
    pub min: u16,
    pub max: u16,
    pub mean: f64,
    pub median: f64,
}

impl WeightSummary {
    fn from_weights(mut weights: Vec<u16>) -> Option<Self> {
        if weights.is_empty() {
            return None;
        }
        weights.sort_unstable();
        let n = weights.len();
        let sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        let median = if n % 2 == 1 {
            f64::from(weights[n / 2])
        } else {
            (f64::from(weights[n / 2 - 1]) + f64::from(weights[n / 2])) / 2.0
        };
        Some(WeightSummary {
            min: weights[0],
            max: weights[n - 1],
            mean: sum as f64 / n as f64,
            median,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookStatistics {
    pub total_positions: usize,
    pub total_moves: usize,
    /// 件数の降順（同数は初出順）
    pub openings: Vec<Tally<String>>,
    /// 件数の降順（同数は初出順）
    pub piece_types: Vec<Tally<PieceType>>,
    pub weights: WeightHistogram,
    pub weight_summary: Option<WeightSummary>,
}

/// 初出順を保ったまま数え、件数の降順に並べる
fn tally<K, I>(keys: I) -> Vec<Tally<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut tallies: Vec<Tally<K>> = Vec::new();
    for key in keys {
        match slots.get(&key).copied() {
            Some(i) => tallies[i].count += 1,
            None => {
                slots.insert(key.clone(), tallies.len());
                tallies.push(Tally { key, count: 1 });
            }
        }
    }
    // sort_by は安定ソートなので同数は初出順のまま
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

impl BookStatistics {
    pub fn from_catalog(catalog: &OpeningCatalog) -> Self {
        let mut weights = WeightHistogram::default();
        for mv in catalog.moves() {
            weights.record(mv.weight);
        }
        BookStatistics {
            total_positions: catalog.positions.len(),
            total_moves: catalog.total_moves(),
            openings: tally(catalog.moves().map(|m| m.opening_name.clone())),
            piece_types: tally(catalog.moves().map(|m| m.piece_type)),
            weights,
            weight_summary: WeightSummary::from_weights(catalog.moves().map(|m| m.weight).collect()),
        }
    }
}

impl fmt::Display for BookStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Opening Book Migration Report ===")?;
        writeln!(f, "Total Positions: {}", self.total_positions)?;
        writeln!(f, "Total Moves: {}", self.total_moves)?;
        writeln!(f)?;
        writeln!(f, "Opening Distribution:")?;
        for t in &self.openings {
            writeln!(f, "  {}: {} moves", t.key, t.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Piece Type Distribution:")?;
        for t in &self.piece_types {
            writeln!(f, "  {}: {} moves", t.key, t.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Weight Distribution:")?;
        writeln!(f, "  High ({HIGH_WEIGHT_THRESHOLD}+): {} moves", self.weights.high)?;
        writeln!(
            f,
            "  Medium ({MEDIUM_WEIGHT_THRESHOLD}-{}): {} moves",
            HIGH_WEIGHT_THRESHOLD - 1,
            self.weights.medium
        )?;
        writeln!(f, "  Low (<{MEDIUM_WEIGHT_THRESHOLD}): {} moves", self.weights.low)?;
        if let Some(summary) = &self.weight_summary {
            writeln!(f)?;
            writeln!(f, "Weight Summary:")?;
            writeln!(f, "  Min: {}", summary.min)?;
            writeln!(f, "  Max: {}", summary.max)?;
            writeln!(f, "  Mean: {:.1}", summary.mean)?;
            writeln!(f, "  Median: {:.1}", summary.median)?;
        }
        Ok(())
    }
}
