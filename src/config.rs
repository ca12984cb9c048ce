//! Run configuration.

use std::path::PathBuf;

use crate::io::Artifacts;

/// Filesystem locations for a run, passed explicitly to the corpus loader
/// and pipelines instead of living in global constants.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the `{id}_raw.txt` / `{id}_meta.json` pairs.
    pub corpus_dir: PathBuf,
    /// Directory the annotation artifacts are written to.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(corpus_dir: P, output_dir: Q) -> Self {
        Config {
            corpus_dir: corpus_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// One directory serving as both corpus source and artifact target.
    pub fn in_place<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        Config {
            corpus_dir: dir.clone(),
            output_dir: dir,
        }
    }

    pub fn artifacts(&self) -> Artifacts {
        Artifacts::new(&self.output_dir)
    }
}
