//! 分類・採点に使うヒューリスティックテーブル
//!
//! 戦法ごとの基本重み・カテゴリ別の基本評価値・升目パターンを、制御フローから
//! 切り離したデータとして持つ。組み込みテーブル（version 1）の他に、TOML ファイルで
//! 差し替えられる。テーブル内の升目は数字表記（`"27"`）で書く。

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coordinate::{BoardCoord, Dialect, translate};
use crate::error::{BookError, BookResult};
use crate::types::{MAX_WEIGHT, MoveCategory, PieceType};

pub const AGGRESSIVE_ROOK: &str = "Aggressive Rook";
pub const YAGURA: &str = "Yagura";
pub const KAKUGAWARI: &str = "Kakugawari (Bishop Exchange)";
pub const SHIKENBISYA: &str = "Shikenbisya (Fourth File Rook)";
pub const AIGAKARI: &str = "Aigakari (Double Wing Attack)";
pub const YOKOFUDORI: &str = "Side Pawn Picker (Yokofudori)";

/// テーブル上の升目（数字表記で (de)serialize）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableSquare(pub BoardCoord);

impl TryFrom<String> for TableSquare {
    type Error = BookError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        translate(&token, Dialect::Digits).map(TableSquare)
    }
}

impl From<TableSquare> for String {
    fn from(square: TableSquare) -> String {
        square.0.to_digits()
    }
}

/// 筋・段（1 始まり）から升目を作る。範囲外はコンパイル時に検出する。
const fn square(file: u8, rank: u8) -> TableSquare {
    match BoardCoord::from_file_rank(file, rank) {
        Some(coord) => TableSquare(coord),
        None => panic!("table square out of range"),
    }
}

/// ルールが参照する升目（移動元 / 移動先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareSide {
    From,
    To,
}

/// 戦法 × 升目集合 → 駒種
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PieceRule {
    pub opening: String,
    pub side: SquareSide,
    pub squares: Vec<TableSquare>,
    pub piece: PieceType,
}

impl PieceRule {
    fn matches(&self, opening: &str, from: Option<BoardCoord>, to: BoardCoord) -> bool {
        if self.opening != opening {
            return false;
        }
        let target = match self.side {
            SquareSide::From => from,
            SquareSide::To => Some(to),
        };
        target.is_some_and(|sq| contains(&self.squares, sq))
    }
}

/// 戦法ごとの移動元升目による重みボーナス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareBonus {
    pub opening: String,
    pub squares: Vec<TableSquare>,
    pub bonus: u16,
}

/// カテゴリ別の基本評価値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryScores {
    pub development: i32,
    pub central_control: i32,
    pub king_safety: i32,
    pub tactical: i32,
    pub positional: i32,
    pub neutral: i32,
}

impl CategoryScores {
    pub const fn get(&self, category: MoveCategory) -> i32 {
        match category {
            MoveCategory::Development => self.development,
            MoveCategory::CentralControl => self.central_control,
            MoveCategory::KingSafety => self.king_safety,
            MoveCategory::Tactical => self.tactical,
            MoveCategory::Positional => self.positional,
            MoveCategory::Neutral => self.neutral,
        }
    }
}

/// ヒューリスティックテーブル一式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeuristicTables {
    pub name: String,
    pub version: u32,

    // --- 駒種・カテゴリ推定 ---
    /// どのルールにも一致しない場合の駒種
    pub default_piece: PieceType,
    /// 先頭から順に評価し、最初に一致したものを採用
    pub piece_rules: Vec<PieceRule>,
    pub central_squares: Vec<TableSquare>,
    pub king_safety_squares: Vec<TableSquare>,
    pub development_openings: Vec<String>,

    // --- 重み ---
    pub default_base_weight: u16,
    pub base_weights: BTreeMap<String, u16>,
    pub promotion_bonus: u16,
    pub drop_bonus: u16,
    pub square_bonuses: Vec<SquareBonus>,

    // --- 評価値 ---
    pub category_scores: CategoryScores,
    pub tier_bonuses: BTreeMap<String, i32>,
    pub default_tier_bonus: i32,
    pub promotion_eval_bonus: i32,
}

const CENTRAL_SQUARES: [TableSquare; 4] = [square(4, 4), square(4, 5), square(5, 4), square(5, 5)];
const KING_SAFETY_SQUARES: [TableSquare; 4] =
    [square(7, 7), square(7, 8), square(8, 7), square(8, 8)];

/// `toml::de::Error` の Display は複数行の抜粋を含むので、行番号つきの1行にまとめる
fn toml_error_line(text: &str, err: &toml::de::Error) -> String {
    let message = err.message().trim().replace('\n', " ");
    match err.span() {
        Some(span) => {
            let head = &text.as_bytes()[..span.start.min(text.len())];
            let line = head.iter().filter(|&&b| b == b'\n').count() + 1;
            format!("line {line}: {message}")
        }
        None => message,
    }
}

fn contains(squares: &[TableSquare], target: BoardCoord) -> bool {
    squares.iter().any(|sq| sq.0 == target)
}

impl Default for HeuristicTables {
    fn default() -> Self {
        HeuristicTables::builtin()
    }
}

impl HeuristicTables {
    /// 組み込みテーブル（version 1）
    pub fn builtin() -> Self {
        let rule = |opening: &str, side, squares: &[TableSquare], piece| PieceRule {
            opening: opening.to_string(),
            side,
            squares: squares.to_vec(),
            piece,
        };
        let piece_rules = vec![
            rule(
                AGGRESSIVE_ROOK,
                SquareSide::From,
                &[square(2, 7), square(2, 6), square(2, 5)],
                PieceType::Rook,
            ),
            rule(YAGURA, SquareSide::From, &[square(7, 7), square(7, 6)], PieceType::Pawn),
            rule(YAGURA, SquareSide::From, &[square(6, 9)], PieceType::Gold),
            rule(YAGURA, SquareSide::To, &[square(7, 8)], PieceType::Gold),
            rule(KAKUGAWARI, SquareSide::From, &[square(2, 2)], PieceType::Bishop),
            rule(KAKUGAWARI, SquareSide::To, &[square(8, 8)], PieceType::Bishop),
        ];

        let base_weights: BTreeMap<String, u16> = [
            (AGGRESSIVE_ROOK, 850),
            (YAGURA, 800),
            (KAKUGAWARI, 750),
            (SHIKENBISYA, 700),
            (AIGAKARI, 650),
            (YOKOFUDORI, 600),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        let square_bonuses = vec![
            SquareBonus {
                opening: AGGRESSIVE_ROOK.to_string(),
                squares: vec![square(2, 7), square(2, 6), square(2, 5)],
                bonus: 50,
            },
            SquareBonus {
                opening: YAGURA.to_string(),
                squares: vec![square(7, 7), square(6, 9)],
                bonus: 50,
            },
        ];

        let tier_bonuses: BTreeMap<String, i32> = [(KAKUGAWARI, 10), (AGGRESSIVE_ROOK, 5), (YAGURA, 5)]
            .into_iter()
            .map(|(name, bonus)| (name.to_string(), bonus))
            .collect();

        HeuristicTables {
            name: "builtin".to_string(),
            version: 1,
            default_piece: PieceType::Pawn,
            piece_rules,
            central_squares: CENTRAL_SQUARES.to_vec(),
            king_safety_squares: KING_SAFETY_SQUARES.to_vec(),
            development_openings: vec![YAGURA.to_string(), AGGRESSIVE_ROOK.to_string()],
            default_base_weight: 500,
            base_weights,
            promotion_bonus: 100,
            drop_bonus: 50,
            square_bonuses,
            category_scores: CategoryScores {
                development: 15,
                central_control: 20,
                king_safety: 25,
                tactical: 30,
                positional: 10,
                neutral: 0,
            },
            tier_bonuses,
            default_tier_bonus: 0,
            promotion_eval_bonus: 15,
        }
    }

    /// TOML からテーブルを読み込み、検証する
    ///
    /// 構文エラー・不正な升目はどちらも1行の [`BookError::InvalidTables`] になる。
    pub fn from_toml_str(s: &str) -> BookResult<Self> {
        let tables: HeuristicTables =
            toml::from_str(s).map_err(|e| BookError::InvalidTables(toml_error_line(s, &e)))?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> BookResult<Self> {
        let text = std::fs::read_to_string(path)?;
        HeuristicTables::from_toml_str(&text)
    }

    pub fn validate(&self) -> BookResult<()> {
        let invalid = |msg: String| Err(BookError::InvalidTables(msg));
        if self.name.trim().is_empty() {
            return invalid("table set has no name".to_string());
        }
        if self.default_base_weight > MAX_WEIGHT {
            return invalid(format!(
                "default_base_weight {} exceeds {MAX_WEIGHT}",
                self.default_base_weight
            ));
        }
        if let Some((opening, weight)) = self.base_weights.iter().find(|(_, w)| **w > MAX_WEIGHT) {
            return invalid(format!("base weight {weight} of {opening:?} exceeds {MAX_WEIGHT}"));
        }
        if let Some(rule) = self.piece_rules.iter().find(|r| r.squares.is_empty()) {
            return invalid(format!("piece rule for {:?} has no squares", rule.opening));
        }
        Ok(())
    }

    /// 戦法の基本重み（未知の戦法は既定値）
    pub fn base_weight(&self, opening: &str) -> u16 {
        self.base_weights.get(opening).copied().unwrap_or(self.default_base_weight)
    }

    /// 戦法固有の移動元升目ボーナス
    pub fn square_bonus(&self, opening: &str, from: Option<BoardCoord>) -> u16 {
        let Some(from) = from else {
            return 0;
        };
        self.square_bonuses
            .iter()
            .find(|b| b.opening == opening && contains(&b.squares, from))
            .map_or(0, |b| b.bonus)
    }

    pub fn tier_bonus(&self, opening: &str) -> i32 {
        self.tier_bonuses.get(opening).copied().unwrap_or(self.default_tier_bonus)
    }

    pub fn category_score(&self, category: MoveCategory) -> i32 {
        self.category_scores.get(category)
    }

    /// 最初に一致した駒種ルール
    pub fn piece_rule(
        &self,
        opening: &str,
        from: Option<BoardCoord>,
        to: BoardCoord,
    ) -> Option<PieceType> {
        self.piece_rules.iter().find(|r| r.matches(opening, from, to)).map(|r| r.piece)
    }

    pub fn is_central(&self, to: BoardCoord) -> bool {
        contains(&self.central_squares, to)
    }

    pub fn is_king_safety(&self, to: BoardCoord) -> bool {
        contains(&self.king_safety_squares, to)
    }

    pub fn is_development_opening(&self, opening: &str) -> bool {
        self.development_openings.iter().any(|o| o == opening)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(token: &str) -> BoardCoord {
        translate(token, Dialect::Digits).unwrap()
    }

    #[test]
    fn test_builtin_is_valid() {
        let tables = HeuristicTables::builtin();
        tables.validate().unwrap();
        assert_eq!(tables.version, 1);
        assert_eq!(tables.base_weight(YAGURA), 800);
        assert_eq!(tables.base_weight("Unknown Opening"), 500);
    }

    #[test]
    fn test_default_toml_matches_builtin() {
        let text = include_str!("../tables/default.toml");
        let parsed = HeuristicTables::from_toml_str(text).unwrap();
        assert_eq!(parsed, HeuristicTables::builtin());
    }

    #[test]
    fn test_piece_rules_first_match_wins() {
        let tables = HeuristicTables::builtin();
        // 77 → 78 は Pawn ルールが先に一致する
        assert_eq!(tables.piece_rule(YAGURA, Some(sq("77")), sq("78")), Some(PieceType::Pawn));
        assert_eq!(tables.piece_rule(YAGURA, Some(sq("59")), sq("78")), Some(PieceType::Gold));
        assert_eq!(tables.piece_rule(YAGURA, None, sq("78")), Some(PieceType::Gold));
        assert_eq!(tables.piece_rule(YAGURA, None, sq("76")), None);
        assert_eq!(tables.piece_rule(KAKUGAWARI, Some(sq("22")), sq("33")), Some(PieceType::Bishop));
        assert_eq!(tables.piece_rule("Other", Some(sq("27")), sq("26")), None);
    }

    #[test]
    fn test_square_bonus_needs_from_square() {
        let tables = HeuristicTables::builtin();
        assert_eq!(tables.square_bonus(AGGRESSIVE_ROOK, Some(sq("26"))), 50);
        assert_eq!(tables.square_bonus(AGGRESSIVE_ROOK, Some(sq("28"))), 0);
        assert_eq!(tables.square_bonus(YAGURA, Some(sq("69"))), 50);
        assert_eq!(tables.square_bonus(YAGURA, None), 0);
    }

    #[test]
    fn test_tables_reject_bad_square_and_weight() {
        let mut text = include_str!("../tables/default.toml").to_string();
        text = text.replacen("\"44\"", "\"40\"", 1);
        match HeuristicTables::from_toml_str(&text) {
            Err(BookError::InvalidTables(msg)) => {
                assert!(msg.contains("\"40\""), "{msg}");
                assert!(msg.starts_with("line 10:"), "{msg}");
                assert!(!msg.contains('\n'), "{msg}");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let mut tables = HeuristicTables::builtin();
        tables.base_weights.insert("Broken".to_string(), 1200);
        assert!(matches!(tables.validate(), Err(BookError::InvalidTables(_))));
    }

    #[test]
    fn test_tables_syntax_error_is_single_line() {
        let err = HeuristicTables::from_toml_str("name = \"broken\"\nversion = \n").unwrap_err();
        match err {
            BookError::InvalidTables(msg) => {
                assert!(msg.starts_with("line "), "{msg}");
                assert!(!msg.contains('\n'), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            HeuristicTables::from_toml_str("unknown_key = 1\n"),
            Err(BookError::InvalidTables(_))
        ));
    }

    #[test]
    fn test_table_square_serializes_as_digits() {
        let json = serde_json::to_string(&square(2, 7)).unwrap();
        assert_eq!(json, "\"27\"");
    }
}
