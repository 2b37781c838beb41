//! バージョン付きカタログ文書（正規の永続化形式）
//!
//! ```json
//! {
//!   "version": 1,
//!   "positions": {
//!     "<局面 ID>": [ { "from": {"row": 6, "col": 1}, "to": ..., "weight": 900, ... } ]
//!   }
//! }
//! ```

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{BookError, BookResult};
use crate::ordered::OrderedEntries;
use crate::types::{CATALOG_VERSION, ClassifiedMove, OpeningCatalog, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: u32,
    pub positions: OrderedEntries<Vec<ClassifiedMove>>,
}

impl CatalogDocument {
    pub fn from_catalog(catalog: &OpeningCatalog) -> Self {
        CatalogDocument {
            version: catalog.version,
            positions: catalog
                .positions
                .iter()
                .map(|p| (p.id.clone(), p.moves.clone()))
                .collect(),
        }
    }

    /// 検証してカタログに戻す
    pub fn into_catalog(self) -> BookResult<OpeningCatalog> {
        if self.version != CATALOG_VERSION {
            return Err(BookError::InvalidCatalog(format!(
                "unsupported catalog version {} (expected {CATALOG_VERSION})",
                self.version
            )));
        }

        let mut seen = HashSet::new();
        let mut positions = Vec::with_capacity(self.positions.len());
        for (id, moves) in self.positions {
            if !seen.insert(id.clone()) {
                return Err(BookError::InvalidCatalog(format!("duplicate position {id:?}")));
            }
            if let Some((index, reason)) = moves
                .iter()
                .enumerate()
                .find_map(|(i, mv)| mv.invariant_violation().map(|r| (i, r)))
            {
                return Err(BookError::InvalidCatalog(format!("{id:?} move #{index}: {reason}")));
            }
            positions.push(Position { id, moves });
        }

        Ok(OpeningCatalog {
            version: self.version,
            positions,
        })
    }
}

/// カタログを整形済み JSON にする
pub fn render_catalog(catalog: &OpeningCatalog) -> BookResult<String> {
    let mut json = serde_json::to_string_pretty(&CatalogDocument::from_catalog(catalog))?;
    json.push('\n');
    Ok(json)
}

/// JSON 文字列からカタログを読み込む
pub fn parse_catalog(s: &str) -> BookResult<OpeningCatalog> {
    let doc: CatalogDocument = serde_json::from_str(s)?;
    doc.into_catalog()
}

pub fn load_catalog<R: Read>(reader: R) -> BookResult<OpeningCatalog> {
    let doc: CatalogDocument = serde_json::from_reader(reader)?;
    doc.into_catalog()
}
