//! 出力成果物のまとめ書き
//!
//! 成果物はまず出力先ディレクトリ内の一時ファイルに書き、全て書き終えてから
//! 本来の名前へ rename する。途中で失敗した場合、一時ファイルは drop 時に消える。
//!
//! rename は1件ずつ stage した順に行う。後の rename が失敗した時点で、それより前の
//! 成果物は既に置き換わっている（前回実行の同名ファイルは戻らない）。呼び出し側は
//! 最も重要な成果物を最後に stage する。

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

#[must_use = "call .commit() to move staged artifacts into place"]
pub struct ArtifactSet {
    dir: PathBuf,
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl ArtifactSet {
    /// 出力先ディレクトリを（無ければ作って）準備する
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        Ok(ArtifactSet {
            dir: dir.to_path_buf(),
            staged: Vec::new(),
        })
    }

    pub fn stage(&mut self, file_name: &str, contents: &str) -> Result<()> {
        let target = self.dir.join(file_name);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.flush())
            .with_context(|| format!("failed to write {}", target.display()))?;
        self.staged.push((tmp, target));
        Ok(())
    }

    /// 一時ファイルを stage した順に本来のパスへ移す
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (tmp, target) in self.staged {
            tmp.persist(&target)
                .map_err(|e| e.error)
                .with_context(|| format!("failed to save {}", target.display()))?;
            written.push(target);
        }
        Ok(written)
    }
}
