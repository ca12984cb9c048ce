//! Converter for OpenCorpora-style named-attribute tags.

use std::path::Path;

use super::{categories_for, MappingError, TagConverter, TagMapping};
use crate::types::{Category, Features, UPos};

/// One dictionary tag with its grammemes already resolved into named
/// attributes. Absent attributes are simply `None`; they are skipped by
/// the converter, not treated as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenCorporaTag {
    pub pos: Option<String>,
    pub gender: Option<String>,
    pub animacy: Option<String>,
    pub case: Option<String>,
    pub number: Option<String>,
    pub tense: Option<String>,
}

impl OpenCorporaTag {
    pub(crate) fn value(&self, category: Category) -> Option<&str> {
        match category {
            Category::Gender => self.gender.as_deref(),
            Category::Animacy => self.animacy.as_deref(),
            Category::Case => self.case.as_deref(),
            Category::Number => self.number.as_deref(),
            Category::Tense => self.tense.as_deref(),
        }
    }
}

pub struct OpenCorporaConverter {
    mapping: TagMapping,
}

impl OpenCorporaConverter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        Ok(Self::from_mapping(TagMapping::new(path)?))
    }

    pub fn from_mapping(mapping: TagMapping) -> Self {
        OpenCorporaConverter { mapping }
    }
}

impl TagConverter for OpenCorporaConverter {
    type Tag = OpenCorporaTag;

    fn convert_pos(&self, tag: &OpenCorporaTag) -> UPos {
        tag.pos
            .as_deref()
            .and_then(|raw| self.mapping.pos(raw))
            .unwrap_or(UPos::X)
    }

    fn convert_morphological_tags(&self, tag: &OpenCorporaTag) -> Features {
        let mut pairs = Vec::new();
        for &category in categories_for(self.convert_pos(tag)) {
            if let Some(value) = tag
                .value(category)
                .and_then(|raw| self.mapping.value(category, raw))
            {
                pairs.push((category, value.to_string()));
            }
        }

        Features::new(pairs)
    }
}
