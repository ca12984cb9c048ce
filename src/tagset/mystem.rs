//! Converter for Mystem's compact tag strings.
//!
//! A Mystem tag looks like `S,жен,од=им,ед`: the POS token first, then
//! lexeme-level grammemes, then after `=` the form-level grammemes, with
//! `|`-separated alternatives for ambiguous forms. Only the first
//! alternative is considered; grammemes are the lowercase Cyrillic runs on
//! both sides of the `=`, since gender and animacy sit left of it and case
//! and number right of it.

use std::path::Path;

use regex::Regex;

use super::{categories_for, MappingError, TagConverter, TagMapping};
use crate::types::{Features, UPos};

pub struct MystemConverter {
    mapping: TagMapping,
    pos_run: Regex,
    value_run: Regex,
}

impl MystemConverter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        Ok(Self::from_mapping(TagMapping::new(path)?))
    }

    pub fn from_mapping(mapping: TagMapping) -> Self {
        MystemConverter {
            mapping,
            pos_run: Regex::new(r"[A-Za-z]+").unwrap(),
            value_run: Regex::new(r"[а-я]+").unwrap(),
        }
    }
}

impl TagConverter for MystemConverter {
    type Tag = str;

    fn convert_pos(&self, tag: &str) -> UPos {
        self.pos_run
            .find(tag)
            .and_then(|pos| self.mapping.pos(pos.as_str()))
            .unwrap_or(UPos::X)
    }

    fn convert_morphological_tags(&self, tag: &str) -> Features {
        let categories = categories_for(self.convert_pos(tag));
        if categories.is_empty() {
            return Features::empty();
        }

        let alternative = tag.split('|').next().unwrap_or(tag);
        let candidates: Vec<&str> = self
            .value_run
            .find_iter(alternative)
            .map(|run| run.as_str())
            .collect();

        let mut pairs = Vec::new();
        for &category in categories {
            for candidate in &candidates {
                if let Some(value) = self.mapping.value(category, candidate) {
                    pairs.push((category, value.to_string()));
                }
            }
        }

        Features::new(pairs)
    }
}
