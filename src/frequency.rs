//! POS-frequency aggregation over previously serialized annotation.
//!
//! The aggregator is a pure consumer of the wire format: it re-reads the
//! per-document annotation file, parses it back into sentences and counts
//! canonical POS occurrences. It never touches the analyzers.

use std::io;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::conllu::{self, ParseError};
use crate::corpus::Corpus;
use crate::io::{ArtifactKind, Artifacts};
use crate::types::{Document, UPos};

#[derive(Debug, thiserror::Error)]
pub enum FrequencyError {
    #[error("annotation source {0:?} is empty")]
    EmptyFile(PathBuf),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Counts canonical POS occurrences across all tokens of all sentences.
pub fn count_frequencies(document: &Document) -> IndexMap<UPos, usize> {
    let mut counts = IndexMap::new();
    for sentence in &document.sentences {
        for token in &sentence.tokens {
            *counts.entry(token.morphology.pos).or_insert(0) += 1;
        }
    }

    counts
}

/// Re-reads serialized annotation and attaches POS frequencies to the
/// documents it came from.
pub struct FrequencyAggregator {
    artifacts: Artifacts,
}

impl FrequencyAggregator {
    pub fn new(artifacts: Artifacts) -> Self {
        FrequencyAggregator { artifacts }
    }

    /// Parses the document's annotation file back and attaches both the
    /// recovered sentences and the frequency map.
    ///
    /// A zero-length annotation file is an error in its own right, caught
    /// before parsing so the report names the file rather than a parse
    /// position inside it.
    pub fn process(&self, document: &mut Document) -> Result<(), FrequencyError> {
        let source = self
            .artifacts
            .annotation_source(document.id, ArtifactKind::PosConllu)?;
        if source.is_empty() {
            return Err(FrequencyError::EmptyFile(
                self.artifacts.path(document.id, ArtifactKind::PosConllu),
            ));
        }

        document.sentences = conllu::parse_document(&source)?;
        document.pos_frequencies = count_frequencies(document);
        Ok(())
    }

    /// Aggregates every document in the corpus. A missing or empty
    /// annotation file fails only the document it belongs to; a malformed
    /// one aborts.
    ///
    /// Annotation skips documents whose analyzer failed, so a corpus can
    /// legitimately arrive here with gaps in its artifacts.
    pub fn run(&self, corpus: &mut Corpus) -> Result<(), FrequencyError> {
        for document in corpus.documents_mut() {
            match self.process(document) {
                Ok(()) => {
                    log::info!(
                        "aggregated document {} ({} tags)",
                        document.id,
                        document.pos_frequencies.len()
                    );
                }
                Err(FrequencyError::EmptyFile(path)) => {
                    log::warn!("skipping empty annotation source {:?}", path);
                    continue;
                }
                Err(FrequencyError::Io(error)) if error.kind() == io::ErrorKind::NotFound => {
                    log::warn!("skipping document {}: {}", document.id, error);
                    continue;
                }
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }
}
