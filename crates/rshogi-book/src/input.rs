//! 入力 JSON（人手の定跡手集）のスキーマ
//!
//! ```json
//! [
//!   {
//!     "name": "Yagura",
//!     "moves": {
//!       "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1": [
//!         {"from": "77", "to": "76"},
//!         {"from": "drop", "to": "55", "pieceType": "P"}
//!       ]
//!     }
//!   }
//! ]
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::error::{BookError, BookResult};
use crate::ordered::OrderedEntries;

/// `from` に置かれた場合に駒打ちを表す値
pub const DROP_SENTINEL: &str = "drop";

/// 入力ファイル全体（戦法レコードの配列）
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct BookInput {
    pub openings: Vec<OpeningRecord>,
}

/// 1戦法分のレコード
#[derive(Debug, Clone, Deserialize)]
pub struct OpeningRecord {
    pub name: String,
    /// 局面 ID → 指し手列（文書順）
    pub moves: OrderedEntries<Vec<RawMoveRecord>>,
}

/// JSON 上の指し手レコード（未検証）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMoveRecord {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub promote: bool,
    #[serde(default, rename = "pieceType")]
    pub piece_type: String,
}

/// 移動元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOrigin {
    Board(String),
    Drop,
}

/// 検証済みの指し手（升目はまだ文字列のまま）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMove {
    pub from: RawOrigin,
    pub to: String,
    pub promote: bool,
    pub piece_hint: Option<String>,
}

impl RawMove {
    /// 盤上の駒を動かす手
    pub fn board(from: &str, to: &str) -> Self {
        RawMove {
            from: RawOrigin::Board(from.to_string()),
            to: to.to_string(),
            promote: false,
            piece_hint: None,
        }
    }

    /// 駒打ち
    pub fn drop(to: &str, piece_hint: Option<&str>) -> Self {
        RawMove {
            from: RawOrigin::Drop,
            to: to.to_string(),
            promote: false,
            piece_hint: piece_hint.map(str::to_string),
        }
    }

    pub fn promoting(mut self) -> Self {
        self.promote = true;
        self
    }
}

impl RawMoveRecord {
    /// 必須フィールドを検証して [`RawMove`] にする
    ///
    /// `from` / `to` が無いレコードは空文字で補わずにエラーとする。
    pub fn validate(&self, opening: &str, position: &str, index: usize) -> BookResult<RawMove> {
        let malformed = |reason: &str| BookError::MalformedInputRecord {
            opening: opening.to_string(),
            position: position.to_string(),
            index,
            reason: reason.to_string(),
        };

        let from = match self.from.as_deref() {
            None => return Err(malformed("missing `from`")),
            Some(DROP_SENTINEL) => RawOrigin::Drop,
            Some(token) => RawOrigin::Board(token.to_string()),
        };
        let to = self.to.clone().ok_or_else(|| malformed("missing `to`"))?;
        let piece_hint = Some(self.piece_type.trim())
            .filter(|hint| !hint.is_empty())
            .map(str::to_string);

        Ok(RawMove {
            from,
            to,
            promote: self.promote,
            piece_hint,
        })
    }
}

impl OpeningRecord {
    /// `(局面 ID, 指し手)` の組を入力順に検証して返す
    pub fn validated_moves(&self) -> BookResult<Vec<(String, RawMove)>> {
        if self.name.trim().is_empty() {
            return Err(BookError::MalformedInputRecord {
                opening: self.name.clone(),
                position: String::new(),
                index: 0,
                reason: "empty opening name".to_string(),
            });
        }
        let mut pairs = Vec::new();
        for (position, records) in self.moves.iter() {
            for (index, record) in records.iter().enumerate() {
                pairs.push((position.to_string(), record.validate(&self.name, position, index)?));
            }
        }
        Ok(pairs)
    }
}

impl BookInput {
    pub fn from_json_str(s: &str) -> BookResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> BookResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn total_records(&self) -> usize {
        self.openings
            .iter()
            .flat_map(|o| o.moves.iter())
            .map(|(_, moves)| moves.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "name": "Test Opening",
            "moves": {
                "B b - 1": [{"from": "27", "to": "26"}],
                "A b - 1": [
                    {"from": "drop", "to": "55", "pieceType": "P"},
                    {"from": "28", "to": "23", "promote": true}
                ]
            }
        }
    ]"#;

    #[test]
    fn test_parse_keeps_position_order_and_defaults() {
        let input = BookInput::from_json_str(SAMPLE).unwrap();
        assert_eq!(input.openings.len(), 1);
        assert_eq!(input.total_records(), 3);

        let pairs = input.openings[0].validated_moves().unwrap();
        let ids: Vec<&str> = pairs.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["B b - 1", "A b - 1", "A b - 1"]);

        assert_eq!(pairs[0].1, RawMove::board("27", "26"));
        assert_eq!(pairs[1].1, RawMove::drop("55", Some("P")));
        assert!(pairs[2].1.promote);
        assert!(pairs[2].1.piece_hint.is_none());
    }

    #[test]
    fn test_missing_from_is_malformed() {
        let record = RawMoveRecord {
            to: Some("26".to_string()),
            ..Default::default()
        };
        let err = record.validate("Yagura", "pos", 4).unwrap_err();
        match err {
            BookError::MalformedInputRecord { index, reason, .. } => {
                assert_eq!(index, 4);
                assert!(reason.contains("from"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_to_is_malformed() {
        let input = BookInput::from_json_str(
            r#"[{"name": "Yagura", "moves": {"p": [{"from": "77"}]}}]"#,
        )
        .unwrap();
        assert!(matches!(
            input.openings[0].validated_moves(),
            Err(BookError::MalformedInputRecord { .. })
        ));
    }

    #[test]
    fn test_empty_opening_name_is_malformed() {
        let input = BookInput::from_json_str(r#"[{"name": " ", "moves": {}}]"#).unwrap();
        assert!(input.openings[0].validated_moves().is_err());
    }

    #[test]
    fn test_non_string_from_is_json_error() {
        let err = BookInput::from_json_str(
            r#"[{"name": "Yagura", "moves": {"p": [{"from": 77, "to": "76"}]}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, BookError::Json(_)));
    }
}
