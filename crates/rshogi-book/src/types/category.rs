//! 指し手カテゴリ

use std::fmt;

use serde::{Deserialize, Serialize};

/// 評価値算出に使う指し手の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Development,
    CentralControl,
    KingSafety,
    Tactical,
    Positional,
    Neutral,
}

impl MoveCategory {
    pub const ALL: [MoveCategory; 6] = [
        MoveCategory::Development,
        MoveCategory::CentralControl,
        MoveCategory::KingSafety,
        MoveCategory::Tactical,
        MoveCategory::Positional,
        MoveCategory::Neutral,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MoveCategory::Development => "development",
            MoveCategory::CentralControl => "central_control",
            MoveCategory::KingSafety => "king_safety",
            MoveCategory::Tactical => "tactical",
            MoveCategory::Positional => "positional",
            MoveCategory::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_names_match_as_str() {
        for category in MoveCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
