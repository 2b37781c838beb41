//! 下流エンジンに埋め込む Rust ソースの生成
//!
//! 生成物はエンジン側の `OpeningBook` / `BookMove::new_with_metadata` を使って
//! カタログを組み立てる関数 `create_opening_book()` になる。

use std::fmt::{self, Write};

use crate::types::{ClassifiedMove, OpeningCatalog};

/// カタログを Rust ソースとして書き出す
pub fn write_source<W: Write>(out: &mut W, catalog: &OpeningCatalog) -> fmt::Result {
    writeln!(out, "// Generated by convert_opening_book (catalog version {})", catalog.version)?;
    writeln!(out, "use crate::opening_book::*;")?;
    writeln!(out, "use crate::types::*;")?;
    writeln!(out)?;
    writeln!(out, "pub fn create_opening_book() -> OpeningBook {{")?;
    writeln!(out, "    let mut book = OpeningBook::new();")?;
    writeln!(out)?;

    for position in &catalog.positions {
        // コメントに改行が入らないようにエスケープする
        writeln!(out, "    // Position: {}", position.id.escape_debug())?;
        writeln!(out, "    let moves = vec![")?;
        for mv in &position.moves {
            write_move(out, mv)?;
        }
        writeln!(out, "    ];")?;
        writeln!(out, "    book.add_position({:?}.to_string(), moves);", position.id)?;
        writeln!(out)?;
    }

    writeln!(out, "    book.mark_loaded()")?;
    writeln!(out, "}}")
}

fn write_move<W: Write>(out: &mut W, mv: &ClassifiedMove) -> fmt::Result {
    const INDENT: &str = "            ";
    writeln!(out, "        BookMove::new_with_metadata(")?;
    match mv.from {
        Some(from) => {
            writeln!(out, "{INDENT}Some(Position::new({}, {})),", from.row(), from.col())?
        }
        None => writeln!(out, "{INDENT}None,")?,
    }
    writeln!(out, "{INDENT}Position::new({}, {}),", mv.to.row(), mv.to.col())?;
    writeln!(out, "{INDENT}PieceType::{},", mv.piece_type.name())?;
    writeln!(out, "{INDENT}{},", mv.is_drop)?;
    writeln!(out, "{INDENT}{},", mv.is_promotion)?;
    writeln!(out, "{INDENT}{},", mv.weight)?;
    writeln!(out, "{INDENT}{},", mv.evaluation)?;
    writeln!(out, "{INDENT}Some({:?}.to_string()),", mv.opening_name)?;
    writeln!(out, "{INDENT}Some({:?}.to_string()),", mv.move_notation)?;
    writeln!(out, "        ),")
}

/// カタログを Rust ソース文字列にする
pub fn render_source(catalog: &OpeningCatalog) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = write_source(&mut out, catalog);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::BoardCoord;
    use crate::types::{MoveCategory, PieceType, Position};

    fn catalog() -> OpeningCatalog {
        let board = ClassifiedMove {
            from: BoardCoord::new(6, 1),
            to: BoardCoord::new(5, 1).unwrap(),
            piece_type: PieceType::Rook,
            category: MoveCategory::Development,
            is_drop: false,
            is_promotion: false,
            weight: 900,
            evaluation: 20,
            opening_name: "Aggressive Rook".to_string(),
            move_notation: "2g2f".to_string(),
        };
        let drop = ClassifiedMove {
            from: None,
            to: BoardCoord::new(4, 4).unwrap(),
            piece_type: PieceType::Pawn,
            category: MoveCategory::Tactical,
            is_drop: true,
            weight: 550,
            evaluation: 30,
            move_notation: "P*5e".to_string(),
            opening_name: "Say \"hi\"".to_string(),
            ..board.clone()
        };
        OpeningCatalog::new(vec![
            Position { id: "first b - 1".to_string(), moves: vec![board, drop] },
            Position { id: "second\nw - 2".to_string(), moves: Vec::new() },
        ])
    }

    #[test]
    fn test_source_contains_every_move_in_order() {
        let src = render_source(&catalog());
        assert!(src.starts_with("// Generated by convert_opening_book (catalog version 1)"));
        assert_eq!(src.matches("BookMove::new_with_metadata(").count(), 2);
        assert_eq!(src.matches("book.add_position(").count(), 2);

        let first = src.find("Some(Position::new(6, 1)),").unwrap();
        let drop = src.find("            None,").unwrap();
        assert!(first < drop);
        assert!(src.contains("PieceType::Rook,"));
        assert!(src.contains("Some(\"2g2f\".to_string()),"));
        assert!(src.trim_end().ends_with("book.mark_loaded()\n}"));
    }

    #[test]
    fn test_source_escapes_strings() {
        let src = render_source(&catalog());
        assert!(src.contains(r#"Some("Say \"hi\"".to_string()),"#));
        assert!(src.contains(r#"book.add_position("second\nw - 2".to_string(), moves);"#));
        assert!(src.contains("// Position: second\\nw - 2"));
    }
}
