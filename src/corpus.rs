//! Corpus discovery, validation and loading.
//!
//! A corpus directory holds `{id}_raw.txt` / `{id}_meta.json` pairs where
//! the numeric prefix before the first `_` is the document ID. Validation
//! fails fast and in a fixed order, since a partially checked corpus would
//! produce silently wrong ID to document associations downstream.
//! Metadata files take part in validation only; their content is never
//! read here.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use fs_err as fs;

use crate::types::Document;

/// Error raised while validating or loading a corpus directory. All of
/// these abort the run before any annotation starts.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus path {0:?} does not exist or is not a directory")]
    Path(PathBuf),
    #[error("corpus directory {0:?} contains no documents")]
    EmptyCorpus(PathBuf),
    #[error("inconsistent corpus: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The validated document collection, keyed and iterated by ID.
pub struct Corpus {
    root: PathBuf,
    documents: BTreeMap<u32, Document>,
}

impl Corpus {
    /// Enumerates, validates and reads the corpus under `dir`.
    ///
    /// Checks run in order: the path is a directory, at least one raw and
    /// one metadata file exist, raw and metadata counts match, no file is
    /// zero-length, every filename has a numeric ID prefix, and the IDs
    /// form exactly the range `1..N`. The first violation wins; re-running
    /// on an unchanged directory fails identically.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, CorpusError> {
        let root = dir.as_ref();
        if !root.is_dir() {
            return Err(CorpusError::Path(root.to_path_buf()));
        }

        let mut raw_files = Vec::new();
        let mut meta_files = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };

            if name.ends_with("_raw.txt") {
                raw_files.push(path);
            } else if name.ends_with("_meta.json") {
                meta_files.push(path);
            }
        }

        if raw_files.is_empty() || meta_files.is_empty() {
            return Err(CorpusError::EmptyCorpus(root.to_path_buf()));
        }

        if raw_files.len() != meta_files.len() {
            return Err(CorpusError::Inconsistent(format!(
                "number of raw and metadata files differs ({} vs {})",
                raw_files.len(),
                meta_files.len()
            )));
        }

        for path in raw_files.iter().chain(meta_files.iter()) {
            if fs::metadata(path)?.len() == 0 {
                return Err(CorpusError::Inconsistent(format!("file {:?} is empty", path)));
            }
        }

        let mut raw_ids = Vec::with_capacity(raw_files.len());
        for path in &raw_files {
            raw_ids.push(document_id(path)?);
        }
        let mut meta_ids = Vec::with_capacity(meta_files.len());
        for path in &meta_files {
            meta_ids.push(document_id(path)?);
        }

        raw_ids.sort_unstable();
        meta_ids.sort_unstable();
        let expected: Vec<u32> = (1..=raw_files.len() as u32).collect();
        if raw_ids != expected || meta_ids != expected {
            return Err(CorpusError::Inconsistent(
                "document IDs do not form the contiguous range 1..N".to_string(),
            ));
        }

        let mut documents = BTreeMap::new();
        for path in &raw_files {
            let id = document_id(path)?;
            let text = fs::read_to_string(path)?;
            documents.insert(id, Document::new(id, text));
        }

        log::info!(
            "loaded corpus of {} documents from {:?}",
            documents.len(),
            root
        );

        Ok(Corpus {
            root: root.to_path_buf(),
            documents,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, id: u32) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Documents in ascending ID order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn documents_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.documents.values_mut()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Numeric prefix before the first `_` of the file name.
fn document_id(path: &Path) -> Result<u32, CorpusError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .as_deref()
        .and_then(|name| name.split('_').next())
        .and_then(|prefix| prefix.parse::<u32>().ok())
        .ok_or_else(|| {
            CorpusError::Inconsistent(format!("file {:?} has no numeric ID in its name", path))
        })
}
