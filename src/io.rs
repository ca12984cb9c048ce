//! Artifact naming and the file-backed collaborator interfaces.
//!
//! The pipeline and aggregator reach the filesystem only through this
//! module: raw text in, annotation artifacts out, serialized annotation
//! back in for aggregation.

use std::io;
use std::path::{Path, PathBuf};

use fs_err as fs;

use crate::conllu;
use crate::types::Document;

/// The derived files a pipeline run produces per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Lower-cased text with punctuation stripped.
    Cleaned,
    /// Annotation with the features column masked to `_`.
    PosConllu,
    /// Annotation with the full feature strings.
    MorphConllu,
}

impl ArtifactKind {
    pub fn file_name(&self, id: u32) -> String {
        match self {
            ArtifactKind::Cleaned => format!("{}_cleaned.txt", id),
            ArtifactKind::PosConllu => format!("{}_pos_conllu.txt", id),
            ArtifactKind::MorphConllu => format!("{}_morphological_conllu.conllu", id),
        }
    }
}

/// Output seam the pipeline hands each finished document to, once.
pub trait AnnotationSink {
    fn persist(&self, document: &Document) -> io::Result<()>;
}

/// File-backed collaborator bound to one directory.
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Artifacts { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, id: u32, kind: ArtifactKind) -> PathBuf {
        self.dir.join(kind.file_name(id))
    }

    /// Raw document text, for callers that work file by file instead of
    /// through a loaded [`Corpus`][crate::corpus::Corpus].
    pub fn fetch_text(&self, id: u32) -> io::Result<String> {
        fs::read_to_string(self.dir.join(format!("{}_raw.txt", id)))
    }

    /// Serialized annotation text for the aggregator.
    pub fn annotation_source(&self, id: u32, kind: ArtifactKind) -> io::Result<String> {
        fs::read_to_string(self.path(id, kind))
    }
}

impl AnnotationSink for Artifacts {
    /// Writes the cleaned text and both annotation artifacts.
    fn persist(&self, document: &Document) -> io::Result<()> {
        fs::write(
            self.path(document.id, ArtifactKind::Cleaned),
            document.cleaned(),
        )?;
        fs::write(
            self.path(document.id, ArtifactKind::PosConllu),
            conllu::serialize_sentences(&document.sentences, false),
        )?;
        fs::write(
            self.path(document.id, ArtifactKind::MorphConllu),
            conllu::serialize_sentences(&document.sentences, true),
        )?;

        log::debug!("persisted artifacts for document {}", document.id);
        Ok(())
    }
}
