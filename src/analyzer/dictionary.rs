//! Dictionary-backed word analyzer.
//!
//! The dictionary is a dump with one `word\tlemma\tgrammemes` line per
//! form, `#` lines being comments. Grammemes use the OpenCorpora
//! inventory (`NOUN,anim,masc sing,nomn`) separated by commas or spaces;
//! each one is classified into its named attribute by membership in the
//! fixed per-category inventories below. The first line for a word wins
//! and lookup is case-insensitive.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use fs_err::File;

use super::{AnalyzerError, WordAnalyzer};
use crate::tagset::OpenCorporaTag;

const POS_GRAMMEMES: &[&str] = &[
    "NOUN", "ADJF", "ADJS", "COMP", "VERB", "INFN", "PRTF", "PRTS", "GRND", "NUMR", "ADVB",
    "NPRO", "PRED", "PREP", "CONJ", "PRCL", "INTJ",
];
const GENDER_GRAMMEMES: &[&str] = &["masc", "femn", "neut"];
const ANIMACY_GRAMMEMES: &[&str] = &["anim", "inan"];
const CASE_GRAMMEMES: &[&str] = &[
    "nomn", "gent", "datv", "accs", "ablt", "loct", "voct", "gen2", "loc2",
];
const NUMBER_GRAMMEMES: &[&str] = &["sing", "plur"];
const TENSE_GRAMMEMES: &[&str] = &["past", "pres", "futr"];

struct DictEntry {
    lemma: String,
    tag: OpenCorporaTag,
}

pub struct DictionaryAnalyzer {
    entries: HashMap<String, DictEntry>,
}

impl DictionaryAnalyzer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalyzerError> {
        let mut entries = HashMap::new();

        for line in BufReader::new(reader).lines() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            let (word, lemma, grammemes) = match (parts.next(), parts.next(), parts.next()) {
                (Some(word), Some(lemma), Some(grammemes)) => (word, lemma, grammemes),
                _ => return Err(AnalyzerError::DictionaryLine(line.clone())),
            };

            entries
                .entry(word.to_lowercase())
                .or_insert_with(|| DictEntry {
                    lemma: lemma.to_string(),
                    tag: classify(grammemes),
                });
        }

        Ok(DictionaryAnalyzer { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WordAnalyzer for DictionaryAnalyzer {
    fn analyze_word(&self, word: &str) -> Option<OpenCorporaTag> {
        self.entries
            .get(&word.to_lowercase())
            .map(|entry| entry.tag.clone())
    }

    fn normal_form(&self, word: &str) -> Option<String> {
        self.entries
            .get(&word.to_lowercase())
            .map(|entry| entry.lemma.clone())
    }
}

/// Sorts a grammeme string into named attributes. Unknown grammemes are
/// ignored; within one category the first grammeme wins.
fn classify(grammemes: &str) -> OpenCorporaTag {
    let mut tag = OpenCorporaTag::default();

    for grammeme in grammemes
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|grammeme| !grammeme.is_empty())
    {
        let slot = if POS_GRAMMEMES.contains(&grammeme) {
            &mut tag.pos
        } else if GENDER_GRAMMEMES.contains(&grammeme) {
            &mut tag.gender
        } else if ANIMACY_GRAMMEMES.contains(&grammeme) {
            &mut tag.animacy
        } else if CASE_GRAMMEMES.contains(&grammeme) {
            &mut tag.case
        } else if NUMBER_GRAMMEMES.contains(&grammeme) {
            &mut tag.number
        } else if TENSE_GRAMMEMES.contains(&grammeme) {
            &mut tag.tense
        } else {
            continue;
        };

        if slot.is_none() {
            *slot = Some(grammeme.to_string());
        }
    }

    tag
}
