//! Splitting raw text into sentence strings.
//!
//! The heuristic is simple and tuned for news-style prose: a boundary is
//! sentence-final punctuation followed by whitespace and an uppercase
//! letter, with two suppression windows for abbreviations and initials.
//! Fragments of ten characters or less are treated as noise and dropped.
//! Downstream position numbering depends on exactly which fragments
//! survive, so the quirks of the heuristic (an ellipsis followed by a
//! lowercase continuation stays joined, for instance) are pinned by tests.

use regex::{Match, Regex};

/// Fragments at or below this many characters are discarded.
const MIN_SENTENCE_CHARS: usize = 10;

/// Sentence segmenter with its patterns compiled once.
#[derive(Debug)]
pub struct Segmenter {
    /// Sentence-final punctuation (a closing quote may follow `?` or `!`)
    /// plus the whitespace run after it.
    boundary: Regex,
    /// Newline and tab runs, normalized away before boundary detection.
    separators: Regex,
}

impl Default for Segmenter {
    fn default() -> Self {
        Segmenter {
            boundary: Regex::new(r#"(?:[?!]["»]?|\.)\s+"#).unwrap(),
            separators: Regex::new(r"[\n\t]+").unwrap(),
        }
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Segmenter::default()
    }

    /// Splits `text` into trimmed sentence strings, in order.
    pub fn segment(&self, text: &str) -> Vec<String> {
        // A newline is a sentence end even without punctuation, so runs of
        // newlines and tabs become an explicit period marker.
        let normalized = self.separators.replace_all(text, " . ");

        let mut fragments = Vec::new();
        let mut start = 0;

        for candidate in self.boundary.find_iter(&normalized) {
            if !is_boundary(&normalized, &candidate) {
                continue;
            }

            let end = candidate.start() + candidate.as_str().trim_end().len();
            fragments.push(normalized[start..end].to_string());
            start = candidate.end();
        }
        fragments.push(normalized[start..].to_string());

        fragments
            .iter()
            .map(|fragment| fragment.trim())
            .filter(|fragment| fragment.chars().count() > MIN_SENTENCE_CHARS)
            .map(str::to_string)
            .collect()
    }
}

/// Checks a boundary candidate against the context the patterns can not
/// express: the next character must be uppercase, and the punctuation must
/// not close an abbreviated capital ("А. Пушкин") or an initials chain
/// ("т.е. близко").
fn is_boundary(text: &str, candidate: &Match) -> bool {
    let mut following = text[candidate.end()..].chars();
    if !following.next().map_or(false, char::is_uppercase) {
        return false;
    }

    let mut preceding = text[..candidate.start()].chars().rev();
    let prev = preceding.next();
    let prev2 = preceding.next();
    let prev3 = preceding.next();

    let single_capital =
        prev.map_or(false, char::is_uppercase) && prev2.map_or(true, char::is_whitespace);
    let initials = prev.map_or(false, char::is_lowercase)
        && prev2 == Some('.')
        && prev3.map_or(false, char::is_lowercase);

    !(single_capital || initials)
}
