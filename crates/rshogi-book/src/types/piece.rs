//! 駒種（成駒を含む）

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 駒種
///
/// シリアライズ名は下流エンジンの `PieceType` バリアント名と一致させる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    PromotedPawn,
    PromotedLance,
    PromotedKnight,
    PromotedSilver,
    PromotedBishop,
    PromotedRook,
}

impl PieceType {
    /// 全ての駒種
    pub const ALL: [PieceType; 14] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::King,
        PieceType::PromotedPawn,
        PieceType::PromotedLance,
        PieceType::PromotedKnight,
        PieceType::PromotedSilver,
        PieceType::PromotedBishop,
        PieceType::PromotedRook,
    ];

    /// バリアント名（"PromotedRook" など）
    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Lance => "Lance",
            PieceType::Knight => "Knight",
            PieceType::Silver => "Silver",
            PieceType::Gold => "Gold",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::King => "King",
            PieceType::PromotedPawn => "PromotedPawn",
            PieceType::PromotedLance => "PromotedLance",
            PieceType::PromotedKnight => "PromotedKnight",
            PieceType::PromotedSilver => "PromotedSilver",
            PieceType::PromotedBishop => "PromotedBishop",
            PieceType::PromotedRook => "PromotedRook",
        }
    }

    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceType::PromotedPawn
                | PieceType::PromotedLance
                | PieceType::PromotedKnight
                | PieceType::PromotedSilver
                | PieceType::PromotedBishop
                | PieceType::PromotedRook
        )
    }

    /// 成る前の駒種
    pub const fn unpromoted(self) -> PieceType {
        match self {
            PieceType::PromotedPawn => PieceType::Pawn,
            PieceType::PromotedLance => PieceType::Lance,
            PieceType::PromotedKnight => PieceType::Knight,
            PieceType::PromotedSilver => PieceType::Silver,
            PieceType::PromotedBishop => PieceType::Bishop,
            PieceType::PromotedRook => PieceType::Rook,
            other => other,
        }
    }

    /// USI の駒文字（成駒は元の駒の文字）
    pub const fn usi_char(self) -> char {
        match self.unpromoted() {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Gold => 'G',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            _ => 'K',
        }
    }

    /// USI の駒記号（"P", "+R" など）
    pub fn usi_symbol(self) -> String {
        if self.is_promoted() {
            format!("+{}", self.usi_char())
        } else {
            self.usi_char().to_string()
        }
    }

    /// 入力の `pieceType` ヒントを解釈する
    ///
    /// USI 記号（"P", "+r"）とバリアント名（"Pawn", "promotedrook"）を受け付ける。
    pub fn from_hint(hint: &str) -> Option<PieceType> {
        let hint = hint.trim();
        if hint.is_empty() {
            return None;
        }
        PieceType::ALL.into_iter().find(|pt| {
            pt.usi_symbol().eq_ignore_ascii_case(hint) || pt.name().eq_ignore_ascii_case(hint)
        })
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceType::from_hint(s).ok_or_else(|| format!("unknown piece type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_hint_usi_and_names() {
        assert_eq!(PieceType::from_hint("P"), Some(PieceType::Pawn));
        assert_eq!(PieceType::from_hint("r"), Some(PieceType::Rook));
        assert_eq!(PieceType::from_hint("+B"), Some(PieceType::PromotedBishop));
        assert_eq!(PieceType::from_hint("Knight"), Some(PieceType::Knight));
        assert_eq!(PieceType::from_hint("promotedsilver"), Some(PieceType::PromotedSilver));
        assert_eq!(PieceType::from_hint(""), None);
        assert_eq!(PieceType::from_hint("Dragon"), None);
    }

    #[test]
    fn test_piece_usi_char_of_promoted() {
        assert_eq!(PieceType::PromotedRook.usi_char(), 'R');
        assert_eq!(PieceType::PromotedRook.usi_symbol(), "+R");
        assert_eq!(PieceType::King.usi_symbol(), "K");
        assert_eq!(PieceType::Gold.unpromoted(), PieceType::Gold);
    }

    #[test]
    fn test_piece_serde_uses_variant_name() {
        for pt in PieceType::ALL {
            assert_eq!(serde_json::to_string(&pt).unwrap(), format!("\"{}\"", pt.name()));
            assert_eq!(pt.name().parse::<PieceType>().unwrap(), pt);
        }
    }
}
