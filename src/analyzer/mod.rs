//! Capability interfaces for the external morphological analyzers.
//!
//! The pipeline never talks to an analyzer library directly; it sees two
//! narrow traits. [`Analyzer`] is the primary per-sentence capability
//! (implemented by [`MystemAnalyzer`] over the external `mystem` binary),
//! [`WordAnalyzer`] is the secondary per-word lookup used for the hybrid
//! NOUN override (implemented by [`DictionaryAnalyzer`] over a tab
//! separated dictionary dump). Tests substitute in-memory stubs.

use std::io;

use crate::tagset::OpenCorporaTag;

mod dictionary;
mod mystem;

pub use dictionary::DictionaryAnalyzer;
pub use mystem::MystemAnalyzer;

/// Error raised by an analyzer adapter.
///
/// At the pipeline level these are absorbed per document, not propagated
/// past the batch driver.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("undecodable analyzer output: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("analyzer process failed ({status}): {stderr}")]
    Subprocess { status: String, stderr: String },
    #[error("malformed dictionary line: {0:?}")]
    DictionaryLine(String),
}

/// One surface token as reported by the primary analyzer, carrying its
/// first analysis when the analyzer produced one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnalysis {
    pub text: String,
    pub lemma: Option<String>,
    pub tag: Option<String>,
}

impl RawAnalysis {
    /// A token the analyzer tokenized but could not analyze.
    pub fn plain<S: Into<String>>(text: S) -> Self {
        RawAnalysis {
            text: text.into(),
            lemma: None,
            tag: None,
        }
    }

    pub fn analyzed(
        text: impl Into<String>,
        lemma: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        RawAnalysis {
            text: text.into(),
            lemma: Some(lemma.into()),
            tag: Some(tag.into()),
        }
    }

    /// Lemma and tag together, present only for fully analyzed tokens.
    pub fn analysis(&self) -> Option<(&str, &str)> {
        match (self.lemma.as_deref(), self.tag.as_deref()) {
            (Some(lemma), Some(tag)) => Some((lemma, tag)),
            _ => None,
        }
    }
}

/// Primary analyzer: tokenizes and tags one sentence at a time.
pub trait Analyzer {
    fn analyze(&self, sentence: &str) -> Result<Vec<RawAnalysis>, AnalyzerError>;
}

/// Secondary analyzer: dictionary lookup for a single word.
///
/// Both operations are fallible only in the "no result" sense; a missing
/// word is `None`, never an error.
pub trait WordAnalyzer {
    /// First tag hypothesis for the word.
    fn analyze_word(&self, word: &str) -> Option<OpenCorporaTag>;

    /// Normal (dictionary) form of the word.
    fn normal_form(&self, word: &str) -> Option<String>;
}
