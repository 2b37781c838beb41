//! 変換パイプライン
//!
//! 生の指し手 → 升目変換 + 推定 + 採点 → 局面ごとに集約 → [`OpeningCatalog`]

use crate::aggregator::PositionAggregator;
use crate::classifier::{MoveContext, MoveHeuristic, TableHeuristic};
use crate::coordinate::{BoardCoord, Dialect, translate};
use crate::error::BookResult;
use crate::evaluator;
use crate::input::{BookInput, RawMove, RawOrigin};
use crate::tables::HeuristicTables;
use crate::types::{ClassifiedMove, OpeningCatalog, PieceType, Position};

/// 変換器
///
/// テーブルと方言を受け取り、入力を一切変更せずに新しいカタログを返す。
pub struct Converter<'t, H = TableHeuristic<'t>> {
    tables: &'t HeuristicTables,
    heuristic: H,
    dialect: Dialect,
}

impl<'t> Converter<'t> {
    pub fn new(tables: &'t HeuristicTables, dialect: Dialect) -> Self {
        Converter {
            tables,
            heuristic: TableHeuristic::new(tables),
            dialect,
        }
    }
}

impl<'t, H: MoveHeuristic> Converter<'t, H> {
    /// 推定戦略を差し替える
    pub fn with_heuristic(tables: &'t HeuristicTables, dialect: Dialect, heuristic: H) -> Self {
        Converter {
            tables,
            heuristic,
            dialect,
        }
    }

    /// 1手を変換する
    pub fn convert_move(&self, raw: &RawMove, opening: &str) -> BookResult<ClassifiedMove> {
        let from = match &raw.from {
            RawOrigin::Board(token) => Some(translate(token, self.dialect)?),
            RawOrigin::Drop => None,
        };
        let to = translate(&raw.to, self.dialect)?;

        let piece_hint = raw.piece_hint.as_deref().and_then(|hint| {
            let parsed = PieceType::from_hint(hint);
            if parsed.is_none() {
                log::warn!("ignoring unknown piece hint {hint:?} ({opening})");
            }
            parsed
        });

        let ctx = MoveContext {
            opening,
            from,
            to,
            promote: raw.promote,
            piece_hint,
        };
        let class = self.heuristic.classify(&ctx);
        let score = evaluator::score(self.tables, &ctx, class.category);

        Ok(ClassifiedMove {
            from,
            to,
            piece_type: class.piece_type,
            category: class.category,
            is_drop: from.is_none(),
            is_promotion: raw.promote,
            weight: score.weight,
            evaluation: score.evaluation,
            opening_name: opening.to_string(),
            move_notation: move_notation(from, to, class.piece_type, raw.promote),
        })
    }

    /// 1戦法分の `(局面 ID, 指し手)` 列を局面にまとめる
    pub fn convert_opening(
        &self,
        opening: &str,
        pairs: &[(String, RawMove)],
    ) -> BookResult<Vec<Position>> {
        let mut aggregator = PositionAggregator::new();
        self.feed(&mut aggregator, opening, pairs)?;
        Ok(aggregator.finish())
    }

    /// 入力全体を変換する
    ///
    /// 複数の戦法に同じ局面が現れた場合は1局面にまとめる（初出順、手は入力順に追記）。
    /// 途中でエラーが起きた場合は何も返さない。
    pub fn convert_book(&self, input: &BookInput) -> BookResult<OpeningCatalog> {
        let mut aggregator = PositionAggregator::new();
        for opening in &input.openings {
            let pairs = opening.validated_moves()?;
            self.feed(&mut aggregator, &opening.name, &pairs)?;
            log::info!("converted {} moves from {:?}", pairs.len(), opening.name);
        }
        let catalog = OpeningCatalog::new(aggregator.finish());
        log::info!(
            "catalog: {} positions, {} moves",
            catalog.positions.len(),
            catalog.total_moves()
        );
        Ok(catalog)
    }

    fn feed(
        &self,
        aggregator: &mut PositionAggregator,
        opening: &str,
        pairs: &[(String, RawMove)],
    ) -> BookResult<()> {
        for (position, raw) in pairs {
            let mv = self.convert_move(raw, opening)?;
            log::debug!("{position}: {} w={} e={}", mv.move_notation, mv.weight, mv.evaluation);
            aggregator.push(position, mv);
        }
        Ok(())
    }
}

/// USI 形式の指し手表記（"7g7f", "2d2c+", "P*5e"）
///
/// 駒打ちの駒文字は推定済みの駒種から取る。
pub fn move_notation(
    from: Option<BoardCoord>,
    to: BoardCoord,
    piece: PieceType,
    promote: bool,
) -> String {
    match from {
        None => format!("{}*{to}", piece.usi_char()),
        Some(from) if promote => format!("{from}{to}+"),
        Some(from) => format!("{from}{to}"),
    }
}
