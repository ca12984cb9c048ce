//! Normalization of analyzer-specific tags into the canonical vocabulary.
//!
//! Two tagset families are supported: the compact tag strings emitted by
//! the Mystem analyzer ([`MystemConverter`]) and the named-attribute tags
//! of OpenCorpora-style dictionaries ([`OpenCorporaConverter`]). Both are
//! driven by a [`TagMapping`] loaded once from a JSON definition and both
//! degrade gracefully: a raw tag without a mapping becomes [`UPos::X`]
//! with no features instead of an error.

use std::collections::HashMap;
use std::io::{self, BufReader, Read};
use std::path::Path;

use fs_err::File;
use serde::Deserialize;

use crate::types::{Category, Features, UPos};

mod mystem;
mod opencorpora;

pub use mystem::MystemConverter;
pub use opencorpora::{OpenCorporaConverter, OpenCorporaTag};

/// Error raised when a tag mapping definition can not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed tag mapping: {0}")]
    Json(#[from] serde_json::Error),
}

/// The loaded mapping definition: one table from source POS tags to
/// canonical POS, plus one value table per morphological category.
///
/// Immutable after load; converters hold their own instance.
#[derive(Debug, Clone, Deserialize)]
pub struct TagMapping {
    #[serde(rename = "POS")]
    pos: HashMap<String, UPos>,
    #[serde(rename = "Gender", default)]
    gender: HashMap<String, String>,
    #[serde(rename = "Animacy", default)]
    animacy: HashMap<String, String>,
    #[serde(rename = "Case", default)]
    case: HashMap<String, String>,
    #[serde(rename = "Number", default)]
    number: HashMap<String, String>,
    #[serde(rename = "Tense", default)]
    tense: HashMap<String, String>,
}

impl TagMapping {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MappingError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Canonical POS for a source POS tag, if mapped.
    pub fn pos(&self, raw: &str) -> Option<UPos> {
        self.pos.get(raw).copied()
    }

    /// Canonical value for a source value within one category, if mapped.
    pub fn value(&self, category: Category, raw: &str) -> Option<&str> {
        self.table(category).get(raw).map(String::as_str)
    }

    fn table(&self, category: Category) -> &HashMap<String, String> {
        match category {
            Category::Gender => &self.gender,
            Category::Animacy => &self.animacy,
            Category::Case => &self.case,
            Category::Number => &self.number,
            Category::Tense => &self.tense,
        }
    }
}

/// Which categories a canonical POS may carry, in the order they are
/// considered before the final lexicographic sort.
///
/// Everything not listed here gets the placeholder feature string, no
/// matter what the analyzer reported.
pub fn categories_for(pos: UPos) -> &'static [Category] {
    match pos {
        UPos::Noun | UPos::Adj => &[
            Category::Gender,
            Category::Animacy,
            Category::Case,
            Category::Number,
        ],
        UPos::Verb => &[Category::Tense, Category::Number, Category::Gender],
        UPos::Pron => &[Category::Number, Category::Case],
        UPos::Num => &[Category::Gender, Category::Case, Category::Animacy],
        _ => &[],
    }
}

/// Shared contract of the two converter variants.
///
/// The variants differ in input shape (a tag string to re-parse vs. an
/// attribute struct), expressed through the associated `Tag` type. Both
/// operations are pure lookups over the converter's mapping.
pub trait TagConverter {
    type Tag: ?Sized;

    /// Canonical POS for a raw tag; [`UPos::X`] when unmapped.
    fn convert_pos(&self, tag: &Self::Tag) -> UPos;

    /// Canonical feature set for a raw tag, restricted to the categories
    /// valid for its POS; empty when nothing survives.
    fn convert_morphological_tags(&self, tag: &Self::Tag) -> Features;
}
