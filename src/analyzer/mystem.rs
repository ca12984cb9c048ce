//! Adapter for the external `mystem` binary.
//!
//! Mystem is spawned per sentence with JSON output enabled and the
//! sentence piped to stdin. `-c` keeps unanalyzable fragments in the
//! output, `-i` prints grammatical information, `-d` applies context
//! disambiguation so every token carries at most one relevant analysis
//! first. Grammemes stay in their native form (`S,жен,од=им,ед`), which is
//! what the Mystem mapping table is keyed by.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{Analyzer, AnalyzerError, RawAnalysis};

pub struct MystemAnalyzer {
    command: PathBuf,
}

impl MystemAnalyzer {
    /// Uses `mystem` from `PATH`.
    pub fn new() -> Self {
        Self::with_command("mystem")
    }

    /// Uses an explicit binary location.
    pub fn with_command<P: Into<PathBuf>>(command: P) -> Self {
        MystemAnalyzer {
            command: command.into(),
        }
    }
}

impl Default for MystemAnalyzer {
    fn default() -> Self {
        MystemAnalyzer::new()
    }
}

impl Analyzer for MystemAnalyzer {
    fn analyze(&self, sentence: &str) -> Result<Vec<RawAnalysis>, AnalyzerError> {
        let mut child = Command::new(&self.command)
            .args(&["-c", "-i", "-d", "--format", "json"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(sentence.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(AnalyzerError::Subprocess {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        decode(&String::from_utf8_lossy(&output.stdout))
    }
}

#[derive(Deserialize)]
struct Entry {
    text: String,
    #[serde(default)]
    analysis: Vec<Analysis>,
}

#[derive(Deserialize)]
struct Analysis {
    lex: Option<String>,
    gr: Option<String>,
}

/// Decodes mystem's JSON output, one array of entries per input line.
fn decode(stdout: &str) -> Result<Vec<RawAnalysis>, AnalyzerError> {
    let mut analyses = Vec::new();

    for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
        let entries: Vec<Entry> = serde_json::from_str(line)?;
        analyses.extend(entries.into_iter().map(|entry| {
            let first = entry.analysis.into_iter().next();
            let (lemma, tag) = match first {
                Some(analysis) => (analysis.lex, analysis.gr),
                None => (None, None),
            };

            RawAnalysis {
                text: entry.text,
                lemma,
                tag,
            }
        }));
    }

    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_analyzed_and_plain_entries() {
        let stdout = r#"[{"analysis":[{"lex":"мама","gr":"S,жен,од=им,ед"}],"text":"Мама"},{"text":" "},{"analysis":[{"lex":"мыть","gr":"V,несов,пе=прош,ед,изъяв,жен"}],"text":"мыла"},{"text":" "},{"analysis":[],"text":"test"},{"text":".\n"}]"#;

        let analyses = decode(stdout).unwrap();

        assert_eq!(analyses.len(), 6);
        assert_eq!(
            analyses[0],
            RawAnalysis::analyzed("Мама", "мама", "S,жен,од=им,ед")
        );
        assert_eq!(analyses[1], RawAnalysis::plain(" "));
        assert_eq!(analyses[4], RawAnalysis::plain("test"));
        assert_eq!(analyses[5], RawAnalysis::plain(".\n"));
    }

    #[test]
    fn keeps_first_analysis_only() {
        let stdout = r#"[{"analysis":[{"lex":"мыло","gr":"S,сред,неод=им,ед"},{"lex":"мыть","gr":"V,несов,пе=прош,ед,изъяв,жен"}],"text":"мыла"}]"#;

        let analyses = decode(stdout).unwrap();

        assert_eq!(analyses[0].lemma.as_deref(), Some("мыло"));
        assert_eq!(analyses[0].tag.as_deref(), Some("S,сред,неод=им,ед"));
    }

    #[test]
    fn rejects_non_json_output() {
        assert!(matches!(
            decode("mystem: command garbage"),
            Err(AnalyzerError::Decode(_))
        ));
    }

    #[test]
    fn empty_output_decodes_to_nothing() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("\n\n").unwrap().is_empty());
    }
}
