//! Morphological annotation of Russian text corpora.
//! # Overview
//!
//! udmorph has the following core abstractions:
//! - A [Corpus][corpus::Corpus] of numbered documents, validated for shape when loaded from a directory.
//! - An annotation [Pipeline][pipeline::Pipeline] to segment documents into sentences, run a morphological analyzer over them and canonicalize the analyzer's tags. The [HybridPipeline][pipeline::HybridPipeline] variant consults a second, dictionary-backed analyzer for noun disambiguation.
//! - A serializer/parser pair in [conllu] that writes annotation in a CONLL-U flavor and reads it back losslessly.
//! - A [FrequencyAggregator][frequency::FrequencyAggregator] that re-parses serialized annotation and counts canonical POS tags.
//!
//! # Examples
//!
//! Annotate a corpus:
//!
//! ```no_run
//! use udmorph::analyzer::MystemAnalyzer;
//! use udmorph::corpus::Corpus;
//! use udmorph::io::Artifacts;
//! use udmorph::pipeline::{Annotate, Pipeline};
//! use udmorph::tagset::MystemConverter;
//!
//! let mut corpus = Corpus::load("assets")?;
//! let pipeline = Pipeline::new(
//!     MystemAnalyzer::new(),
//!     MystemConverter::new("data/mystem_tags_mapping.json")?,
//! );
//!
//! pipeline.run(&mut corpus, &Artifacts::new("assets"))?;
//! # Ok::<(), udmorph::Error>(())
//! ```
//!
//! Convert a raw analyzer tag:
//!
//! ```no_run
//! use udmorph::tagset::{MystemConverter, TagConverter};
//!
//! let converter = MystemConverter::new("data/mystem_tags_mapping.json")?;
//!
//! assert_eq!(converter.convert_pos("S,жен,од=им,ед").as_str(), "NOUN");
//! assert_eq!(
//!     converter.convert_morphological_tags("S,жен,од=им,ед").to_string(),
//!     "Animacy=Anim|Case=Nom|Gender=Fem|Number=Sing"
//! );
//! # Ok::<(), udmorph::Error>(())
//! ```
//!
//! Count POS tags in previously written annotation:
//!
//! ```no_run
//! use udmorph::corpus::Corpus;
//! use udmorph::frequency::FrequencyAggregator;
//! use udmorph::io::Artifacts;
//!
//! let mut corpus = Corpus::load("assets")?;
//! let aggregator = FrequencyAggregator::new(Artifacts::new("assets"));
//!
//! aggregator.run(&mut corpus)?;
//! for document in corpus.documents() {
//!     println!("{}: {:?}", document.id, document.pos_frequencies);
//! }
//! # Ok::<(), udmorph::Error>(())
//! ```

// #![warn(missing_docs)]
use thiserror::Error;

pub mod analyzer;
pub mod config;
pub mod conllu;
pub mod corpus;
pub mod frequency;
pub mod io;
pub mod pipeline;
pub mod segment;
pub mod tagset;
pub mod types;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Corpus(#[from] corpus::CorpusError),
    #[error(transparent)]
    Mapping(#[from] tagset::MappingError),
    #[error(transparent)]
    Analyzer(#[from] analyzer::AnalyzerError),
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    #[error(transparent)]
    Parse(#[from] conllu::ParseError),
    #[error(transparent)]
    Frequency(#[from] frequency::FrequencyError),
}
