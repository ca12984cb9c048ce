//! Annotation pipelines.
//!
//! [`Pipeline`] drives a single analyzer; [`HybridPipeline`] adds a
//! secondary word analyzer whose result replaces the primary's for tokens
//! the primary canonicalizes as NOUN (the secondary disambiguates nominal
//! case and gender better). Per-token analyzer gaps degrade through an
//! ordered fallback ladder instead of failing the document; a document
//! whose analysis fails outright is skipped with a warning instead of
//! failing the batch.

use std::io;

use lazy_static::lazy_static;
use regex::Regex;

use crate::analyzer::{Analyzer, AnalyzerError, WordAnalyzer};
use crate::corpus::Corpus;
use crate::io::AnnotationSink;
use crate::segment::Segmenter;
use crate::tagset::{MystemConverter, OpenCorporaConverter, TagConverter};
use crate::types::{Document, Morphology, Sentence, Token, UPos};

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"\d+").unwrap();
    static ref SENTENCE_PUNCT: Regex = Regex::new(r"[.!?]").unwrap();
    static ref LATIN: Regex = Regex::new(r"[A-Za-z]+").unwrap();
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
    #[error(transparent)]
    Sink(#[from] io::Error),
}

/// Per-document annotation, shared by the pipeline variants.
pub trait Annotate {
    /// Segments, analyzes and tokenizes one document, attaching the
    /// resulting sentences to it.
    fn process(&self, document: &mut Document) -> Result<(), PipelineError>;

    /// Processes every document in ID order and hands each finished one to
    /// the sink. A document whose analyzer fails is logged and skipped;
    /// sink failures abort, since losing output is not recoverable.
    fn run<S: AnnotationSink>(&self, corpus: &mut Corpus, sink: &S) -> Result<(), PipelineError> {
        for document in corpus.documents_mut() {
            match self.process(document) {
                Ok(()) => {}
                Err(PipelineError::Analyzer(error)) => {
                    log::warn!("skipping document {}: {}", document.id, error);
                    continue;
                }
                Err(other) => return Err(other),
            }

            sink.persist(document)?;
            log::info!(
                "annotated document {} ({} sentences)",
                document.id,
                document.sentences.len()
            );
        }

        Ok(())
    }
}

/// Best-effort morphology for a token the analyzer had nothing for:
/// numeric literal, then sentence punctuation, then Latin-alphabetic run.
/// `None` means the token is dropped entirely.
fn fallback(text: &str) -> Option<Morphology> {
    if let Some(run) = NUMERIC.find(text) {
        Some(Morphology::plain(run.as_str(), UPos::Num))
    } else if let Some(run) = SENTENCE_PUNCT.find(text) {
        Some(Morphology::plain(run.as_str(), UPos::Punct))
    } else if let Some(run) = LATIN.find(text) {
        Some(Morphology::plain(run.as_str(), UPos::X))
    } else {
        None
    }
}

/// Segments `text` and builds one [`Sentence`] per fragment, resolving
/// analyzed tokens through `resolve` and the rest through the fallback
/// ladder. Token positions are 1-based and only advance for kept tokens.
fn assemble<A: Analyzer>(
    segmenter: &Segmenter,
    analyzer: &A,
    text: &str,
    mut resolve: impl FnMut(&str, &str, &str) -> Morphology,
) -> Result<Vec<Sentence>, PipelineError> {
    let mut sentences = Vec::new();

    for (index, sentence_text) in segmenter.segment(text).into_iter().enumerate() {
        let analyses = analyzer.analyze(&sentence_text)?;

        let mut tokens = Vec::new();
        let mut position = 1u32;
        for entry in &analyses {
            let token_text = entry.text.trim();
            if token_text.is_empty() {
                continue;
            }

            let morphology = match entry.analysis() {
                Some((lemma, tag)) => resolve(token_text, lemma, tag),
                None => match fallback(token_text) {
                    Some(morphology) => morphology,
                    None => {
                        log::debug!("dropping unanalyzable token {:?}", token_text);
                        continue;
                    }
                },
            };

            tokens.push(Token::new(position, token_text, morphology));
            position += 1;
        }

        sentences.push(Sentence::new(index as u32, sentence_text, tokens));
    }

    Ok(sentences)
}

/// Single-analyzer pipeline: the primary analyzer drives lemma, POS and
/// features for every token.
pub struct Pipeline<A> {
    analyzer: A,
    converter: MystemConverter,
    segmenter: Segmenter,
}

impl<A: Analyzer> Pipeline<A> {
    pub fn new(analyzer: A, converter: MystemConverter) -> Self {
        Pipeline {
            analyzer,
            converter,
            segmenter: Segmenter::new(),
        }
    }
}

impl<A: Analyzer> Annotate for Pipeline<A> {
    fn process(&self, document: &mut Document) -> Result<(), PipelineError> {
        document.sentences = assemble(
            &self.segmenter,
            &self.analyzer,
            &document.text,
            |_text, lemma, tag| {
                Morphology::new(
                    lemma,
                    self.converter.convert_pos(tag),
                    self.converter.convert_morphological_tags(tag),
                )
            },
        )?;

        Ok(())
    }
}

/// Dual-analyzer pipeline.
///
/// The primary analyzer is queried for all tokens; where its tag
/// canonicalizes to NOUN, the secondary analyzer's lemma, POS and features
/// supersede it. The override key is exactly "canonical POS == NOUN". When
/// the secondary has no parse for the word, the primary result stands.
pub struct HybridPipeline<A, W> {
    analyzer: A,
    word_analyzer: W,
    converter: MystemConverter,
    backup_converter: OpenCorporaConverter,
    segmenter: Segmenter,
}

impl<A: Analyzer, W: WordAnalyzer> HybridPipeline<A, W> {
    pub fn new(
        analyzer: A,
        converter: MystemConverter,
        word_analyzer: W,
        backup_converter: OpenCorporaConverter,
    ) -> Self {
        HybridPipeline {
            analyzer,
            word_analyzer,
            converter,
            backup_converter,
            segmenter: Segmenter::new(),
        }
    }

    fn resolve(&self, text: &str, lemma: &str, tag: &str) -> Morphology {
        let pos = self.converter.convert_pos(tag);

        if pos == UPos::Noun {
            if let Some(backup_tag) = self.word_analyzer.analyze_word(text) {
                let lemma = self
                    .word_analyzer
                    .normal_form(text)
                    .unwrap_or_else(|| lemma.to_string());

                return Morphology::new(
                    lemma,
                    self.backup_converter.convert_pos(&backup_tag),
                    self.backup_converter.convert_morphological_tags(&backup_tag),
                );
            }
        }

        Morphology::new(lemma, pos, self.converter.convert_morphological_tags(tag))
    }
}

impl<A: Analyzer, W: WordAnalyzer> Annotate for HybridPipeline<A, W> {
    fn process(&self, document: &mut Document) -> Result<(), PipelineError> {
        document.sentences = assemble(
            &self.segmenter,
            &self.analyzer,
            &document.text,
            |text, lemma, tag| self.resolve(text, lemma, tag),
        )?;

        Ok(())
    }
}
