//! Serialization to and parsing from the CONLL-U style annotation format.
//!
//! A token is one line of ten tab-separated fields:
//! `position, text, lemma, POS, _, features, 0, root, _, _`. The fifth,
//! seventh, eighth, ninth and tenth columns are fixed placeholders since
//! syntactic annotation is outside this crate's scope. A sentence is a
//! two-line header (`# sent_id = N`, `# text = ...`) followed by its token
//! lines; a document is the contiguous concatenation of sentence blocks.
//!
//! [`parse_document`] is the exact inverse of [`serialize_sentences`] for
//! everything the model carries: positions, text, lemma, POS and features
//! round-trip, the placeholder columns do not.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{InvalidFeatures, Morphology, Sentence, Token, UnknownPos};

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"(?m)^# sent_id = \d+\n# text = .+$").unwrap();
}

/// Error raised when serialized annotation text can not be read back.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed sentence header: {0:?}")]
    Header(String),
    #[error("expected 10 tab-separated fields, got {count}: {line:?}")]
    FieldCount { line: String, count: usize },
    #[error("invalid token position in line: {0:?}")]
    Position(String),
    #[error(transparent)]
    Pos(#[from] UnknownPos),
    #[error(transparent)]
    Features(#[from] InvalidFeatures),
}

/// Serializes one token as its ten-field line, without a trailing newline.
///
/// With `include_features` unset the features column is always the `_`
/// placeholder, regardless of what the token carries.
pub fn serialize_token(token: &Token, include_features: bool) -> String {
    let features = if include_features {
        token.morphology.features.to_string()
    } else {
        "_".to_string()
    };

    format!(
        "{}\t{}\t{}\t{}\t_\t{}\t0\troot\t_\t_",
        token.position, token.text, token.morphology.lemma, token.morphology.pos, features
    )
}

/// Serializes a sentence block: header, token lines, trailing newline.
pub fn serialize_sentence(sentence: &Sentence, include_features: bool) -> String {
    let mut out = format!(
        "# sent_id = {}\n# text = {}\n",
        sentence.position, sentence.text
    );
    for token in &sentence.tokens {
        out.push_str(&serialize_token(token, include_features));
        out.push('\n');
    }
    out
}

/// Serializes all sentence blocks of a document, contiguously.
pub fn serialize_sentences(sentences: &[Sentence], include_features: bool) -> String {
    sentences
        .iter()
        .map(|sentence| serialize_sentence(sentence, include_features))
        .collect()
}

fn parse_header(header: &str) -> Result<(u32, &str), ParseError> {
    let mut lines = header.lines();
    let position = lines
        .next()
        .and_then(|line| line.strip_prefix("# sent_id = "))
        .ok_or_else(|| ParseError::Header(header.to_string()))?
        .parse::<u32>()
        .map_err(|_| ParseError::Header(header.to_string()))?;
    let text = lines
        .next()
        .and_then(|line| line.strip_prefix("# text = "))
        .ok_or_else(|| ParseError::Header(header.to_string()))?;

    Ok((position, text))
}

fn parse_token_line(line: &str) -> Result<Token, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 10 {
        return Err(ParseError::FieldCount {
            line: line.to_string(),
            count: fields.len(),
        });
    }

    let position = fields[0]
        .parse::<u32>()
        .map_err(|_| ParseError::Position(line.to_string()))?;
    let pos = fields[3].parse()?;
    let features = fields[5].parse()?;

    Ok(Token::new(
        position,
        fields[1],
        Morphology::new(fields[2], pos, features),
    ))
}

/// Parses serialized annotation text back into sentences.
///
/// Splits on the two-line header pattern; everything up to the first header
/// is ignored, everything between headers is treated as token lines (empty
/// lines skipped, so blank-line-separated blocks parse the same as
/// contiguous ones).
pub fn parse_document(text: &str) -> Result<Vec<Sentence>, ParseError> {
    let headers: Vec<regex::Match> = HEADER.find_iter(text).collect();
    let mut sentences = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        let (position, sentence_text) = parse_header(header.as_str())?;
        let block_end = headers
            .get(index + 1)
            .map_or(text.len(), |next| next.start());

        let tokens = text[header.end()..block_end]
            .lines()
            .filter(|line| !line.is_empty())
            .map(parse_token_line)
            .collect::<Result<Vec<_>, _>>()?;

        sentences.push(Sentence::new(position, sentence_text, tokens));
    }

    Ok(sentences)
}
