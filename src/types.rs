//! Fundamental types used by this crate.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The closed set of canonical part-of-speech categories all analyzer
/// tagsets are mapped into.
///
/// [`UPos::X`] doubles as the "other / undetermined" placeholder: any raw
/// tag without a mapping converts to it instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum UPos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

/// Error raised when a string is not one of the canonical POS names.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown part-of-speech tag: {0:?}")]
pub struct UnknownPos(pub String);

impl UPos {
    /// The canonical upper-case name, as it appears in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            UPos::Adj => "ADJ",
            UPos::Adp => "ADP",
            UPos::Adv => "ADV",
            UPos::Aux => "AUX",
            UPos::Cconj => "CCONJ",
            UPos::Det => "DET",
            UPos::Intj => "INTJ",
            UPos::Noun => "NOUN",
            UPos::Num => "NUM",
            UPos::Part => "PART",
            UPos::Pron => "PRON",
            UPos::Propn => "PROPN",
            UPos::Punct => "PUNCT",
            UPos::Sconj => "SCONJ",
            UPos::Sym => "SYM",
            UPos::Verb => "VERB",
            UPos::X => "X",
        }
    }
}

impl fmt::Display for UPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UPos {
    type Err = UnknownPos;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ADJ" => UPos::Adj,
            "ADP" => UPos::Adp,
            "ADV" => UPos::Adv,
            "AUX" => UPos::Aux,
            "CCONJ" => UPos::Cconj,
            "DET" => UPos::Det,
            "INTJ" => UPos::Intj,
            "NOUN" => UPos::Noun,
            "NUM" => UPos::Num,
            "PART" => UPos::Part,
            "PRON" => UPos::Pron,
            "PROPN" => UPos::Propn,
            "PUNCT" => UPos::Punct,
            "SCONJ" => UPos::Sconj,
            "SYM" => UPos::Sym,
            "VERB" => UPos::Verb,
            "X" => UPos::X,
            _ => return Err(UnknownPos(s.to_string())),
        })
    }
}

/// A morphological category a feature value can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Category {
    Gender,
    Animacy,
    Case,
    Number,
    Tense,
}

impl Category {
    /// The spelling used on the left-hand side of `Category=Value` pairs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gender => "Gender",
            Category::Animacy => "Animacy",
            Category::Case => "Case",
            Category::Number => "Number",
            Category::Tense => "Tense",
        }
    }

    /// Inverse of [`as_str`][Self::as_str].
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Gender" => Category::Gender,
            "Animacy" => Category::Animacy,
            "Case" => Category::Case,
            "Number" => Category::Number,
            "Tense" => Category::Tense,
            _ => return None,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised when a serialized feature string can not be read back.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid feature string: {0:?}")]
pub struct InvalidFeatures(pub String);

/// A set of `Category=Value` pairs with a deterministic order.
///
/// Pairs are sorted lexicographically by their rendered form at
/// construction time, so two [`Features`] built from the same pairs in any
/// order compare and render identically. Renders as a `|`-joined list, or
/// the `_` placeholder when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Features(Vec<(Category, String)>);

impl Features {
    /// Creates a feature set, sorting and deduplicating the pairs.
    pub fn new(mut pairs: Vec<(Category, String)>) -> Self {
        pairs.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
        pairs.dedup();
        Features(pairs)
    }

    /// The "no features" placeholder.
    pub fn empty() -> Self {
        Features(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Category, String)> {
        self.0.iter()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "_")
        } else {
            write!(
                f,
                "{}",
                self.0
                    .iter()
                    .map(|(category, value)| format!("{}={}", category, value))
                    .join("|")
            )
        }
    }
}

impl FromStr for Features {
    type Err = InvalidFeatures;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "_" {
            return Ok(Features::empty());
        }

        let mut pairs = Vec::new();
        for pair in s.split('|') {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| InvalidFeatures(s.to_string()))?;
            let category =
                Category::from_name(name).ok_or_else(|| InvalidFeatures(s.to_string()))?;
            if value.is_empty() {
                return Err(InvalidFeatures(s.to_string()));
            }
            pairs.push((category, value.to_string()));
        }

        Ok(Features::new(pairs))
    }
}

/// Lemma, canonical POS and features associated with a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morphology {
    pub lemma: String,
    pub pos: UPos,
    pub features: Features,
}

impl Morphology {
    pub fn new<S: Into<String>>(lemma: S, pos: UPos, features: Features) -> Self {
        Morphology {
            lemma: lemma.into(),
            pos,
            features,
        }
    }

    /// Morphology with no features, for tokens resolved by the fallback
    /// ladder rather than an analyzer.
    pub fn plain<S: Into<String>>(lemma: S, pos: UPos) -> Self {
        Morphology::new(lemma, pos, Features::empty())
    }
}

/// A single annotated token.
///
/// `position` is the 1-based serialization position within the sentence.
/// It is assigned explicitly when the token is built and is independent of
/// the token's index in the containing [`Sentence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: u32,
    pub text: String,
    pub morphology: Morphology,
}

impl Token {
    pub fn new<S: Into<String>>(position: u32, text: S, morphology: Morphology) -> Self {
        Token {
            position,
            text: text.into(),
            morphology,
        }
    }

    /// The token text lower-cased with punctuation stripped, used for the
    /// plain-text artifact.
    pub fn cleaned(&self) -> String {
        self.text
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
            .collect::<String>()
            .to_lowercase()
            .trim()
            .to_string()
    }
}

/// A sentence with its 0-based position within the document and the
/// verbatim source excerpt it was segmented from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    pub position: u32,
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new<S: Into<String>>(position: u32, text: S, tokens: Vec<Token>) -> Self {
        Sentence {
            position,
            text: text.into(),
            tokens,
        }
    }

    /// Space-joined cleaned token texts, empty tokens skipped.
    pub fn cleaned(&self) -> String {
        self.tokens
            .iter()
            .map(Token::cleaned)
            .filter(|text| !text.is_empty())
            .join(" ")
    }
}

/// A corpus document: raw text plus the annotation layers attached to it
/// over the course of a pipeline run.
///
/// `sentences` is filled by the annotation pipeline (or by the parser when
/// re-reading serialized output), `pos_frequencies` by the frequency
/// aggregator. Both start out empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub id: u32,
    pub text: String,
    pub sentences: Vec<Sentence>,
    pub pos_frequencies: IndexMap<UPos, usize>,
}

impl Document {
    pub fn new<S: Into<String>>(id: u32, text: S) -> Self {
        Document {
            id,
            text: text.into(),
            sentences: Vec::new(),
            pos_frequencies: IndexMap::new(),
        }
    }

    /// Cleaned text of the whole document, sentence by sentence.
    pub fn cleaned(&self) -> String {
        self.sentences
            .iter()
            .map(Sentence::cleaned)
            .filter(|text| !text.is_empty())
            .join(" ")
    }
}
