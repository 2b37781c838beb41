//! 升目表記の変換
//!
//! 入力データには2種類の表記が混在する:
//! - 数字表記 `"27"`: 1文字目が筋（1-9）、2文字目が段（1-9）
//! - 英字表記 `"2g"`: 1文字目が筋（1-9）、2文字目が段（'a'-'i'）
//!
//! 自動判別はせず、呼び出し側が [`Dialect`] で明示する。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BookError, BookResult};

/// 盤の一辺のマス数
pub const BOARD_SIZE: u8 = 9;

/// 升目表記の方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// `"27"` 形式
    #[default]
    Digits,
    /// `"2g"` 形式（USI の升目表記）
    Algebraic,
}

impl Dialect {
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Digits => "digits",
            Dialect::Algebraic => "algebraic",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 0 始まりの (段, 筋) 座標。両成分とも 0..=8 に収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CoordFields")]
pub struct BoardCoord {
    row: u8,
    col: u8,
}

#[derive(Deserialize)]
struct CoordFields {
    row: u8,
    col: u8,
}

impl TryFrom<CoordFields> for BoardCoord {
    type Error = BookError;

    fn try_from(fields: CoordFields) -> Result<Self, Self::Error> {
        BoardCoord::new(fields.row, fields.col).ok_or_else(|| {
            BookError::InvalidCatalog(format!(
                "coordinate out of range: row={}, col={}",
                fields.row, fields.col
            ))
        })
    }
}

impl BoardCoord {
    /// 範囲外なら `None`
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<BoardCoord> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(BoardCoord { row, col })
        } else {
            None
        }
    }

    /// 1 始まりの (筋, 段) から作る
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<BoardCoord> {
        if file == 0 || rank == 0 {
            return None;
        }
        BoardCoord::new(rank - 1, file - 1)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// 筋（1-9）
    #[inline]
    pub const fn file(self) -> u8 {
        self.col + 1
    }

    /// 段（1-9）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.row + 1
    }

    /// USI 形式（"7g"）
    pub fn to_usi(self) -> String {
        self.to_string()
    }

    /// 数字表記（"77"）
    pub fn to_digits(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl fmt::Display for BoardCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), (b'a' + self.row) as char)
    }
}

/// 2文字の升目表記を (段, 筋) に変換する
pub fn translate(token: &str, dialect: Dialect) -> BookResult<BoardCoord> {
    let invalid = || BookError::InvalidCoordinate {
        token: token.to_string(),
        dialect,
    };

    let mut chars = token.chars();
    let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
    else {
        return Err(invalid());
    };

    let file = file_char.to_digit(10).ok_or_else(invalid)?;
    let rank = match dialect {
        Dialect::Digits => rank_char.to_digit(10).ok_or_else(invalid)?,
        Dialect::Algebraic => match rank_char {
            'a'..='i' => rank_char as u32 - 'a' as u32 + 1,
            _ => return Err(invalid()),
        },
    };

    // to_digit(10) は 0..=9 を返すので u8 に収まる
    BoardCoord::from_file_rank(file as u8, rank as u8).ok_or_else(invalid)
}
