use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use quickcheck_macros::quickcheck;
use tempfile::tempdir;

use udmorph::analyzer::{Analyzer, AnalyzerError, DictionaryAnalyzer, RawAnalysis};
use udmorph::conllu;
use udmorph::corpus::{Corpus, CorpusError};
use udmorph::frequency::FrequencyAggregator;
use udmorph::io::{ArtifactKind, Artifacts};
use udmorph::pipeline::{Annotate, HybridPipeline, Pipeline};
use udmorph::segment::Segmenter;
use udmorph::tagset::{MystemConverter, OpenCorporaConverter};
use udmorph::types::{Features, Morphology, Sentence, Token, UPos};

const MYSTEM_MAPPING_PATH: &str = "data/mystem_tags_mapping.json";
const OPENCORPORA_MAPPING_PATH: &str = "data/opencorpora_tags_mapping.json";
const DICTIONARY_PATH: &str = "data/dictionary.tsv";

lazy_static! {
    static ref ANALYSES: Vec<(&'static str, &'static str, &'static str)> = vec![
        ("Мама", "мама", "S,жен,од=им,ед"),
        ("красиво", "красиво", "ADV="),
        ("мыла", "мыть", "V,несов,пе=прош,ед,изъяв,жен"),
        ("раму", "рама", "S,жен,неод=вин,ед"),
        ("сказала", "сказать", "V,сов,пе=прош,ед,изъяв,жен"),
        ("Помой", "помыть", "V,сов,пе=пов,ед"),
    ];
}

/// Stands in for the external analyzer binary: splits on whitespace,
/// detaches trailing punctuation into entries of its own and looks words
/// up in the fixture table.
struct FixtureAnalyzer;

impl Analyzer for FixtureAnalyzer {
    fn analyze(&self, sentence: &str) -> Result<Vec<RawAnalysis>, AnalyzerError> {
        let mut analyses = Vec::new();

        for chunk in sentence.split_whitespace() {
            let word = chunk.trim_end_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() {
                match ANALYSES.iter().find(|(text, _, _)| *text == word) {
                    Some((_, lemma, tag)) => {
                        analyses.push(RawAnalysis::analyzed(word, *lemma, *tag))
                    }
                    None => analyses.push(RawAnalysis::plain(word)),
                }
            }
            for punctuation in chunk[word.len()..].chars() {
                analyses.push(RawAnalysis::plain(punctuation.to_string()));
            }
        }

        Ok(analyses)
    }
}

fn write_corpus(dir: &Path, texts: &[&str]) {
    for (index, text) in texts.iter().enumerate() {
        let id = index + 1;
        fs::write(dir.join(format!("{}_raw.txt", id)), text).unwrap();
        fs::write(dir.join(format!("{}_meta.json", id)), "{}").unwrap();
    }
}

fn pipeline() -> Pipeline<FixtureAnalyzer> {
    Pipeline::new(
        FixtureAnalyzer,
        MystemConverter::new(MYSTEM_MAPPING_PATH).unwrap(),
    )
}

#[test]
fn annotates_a_corpus_end_to_end() {
    let dir = tempdir().unwrap();
    write_corpus(
        dir.path(),
        &["Мама красиво мыла раму. Мама сказала: Помой раму!"],
    );

    let mut corpus = Corpus::load(dir.path()).unwrap();
    let artifacts = Artifacts::new(dir.path());
    pipeline().run(&mut corpus, &artifacts).unwrap();

    let document = corpus.get(1).unwrap();
    assert_eq!(document.sentences.len(), 2);

    let first = &document.sentences[0];
    let texts: Vec<&str> = first.tokens.iter().map(|token| token.text.as_str()).collect();
    assert_eq!(texts, vec!["Мама", "красиво", "мыла", "раму", "."]);

    let mama = &first.tokens[0];
    assert_eq!(mama.morphology.lemma, "мама");
    assert_eq!(mama.morphology.pos, UPos::Noun);
    assert_eq!(
        mama.morphology.features.to_string(),
        "Animacy=Anim|Case=Nom|Gender=Fem|Number=Sing"
    );

    // The colon has no analysis and no fallback, so it is dropped and the
    // numbering stays contiguous.
    let second = &document.sentences[1];
    let positions: Vec<u32> = second.tokens.iter().map(|token| token.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    assert_eq!(second.tokens[4].text, "!");
    assert_eq!(second.tokens[4].morphology.pos, UPos::Punct);

    assert_eq!(
        fs::read_to_string(artifacts.path(1, ArtifactKind::Cleaned)).unwrap(),
        "мама красиво мыла раму мама сказала помой раму"
    );
}

#[test]
fn written_annotation_parses_back_identically() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path(), &["Мама красиво мыла раму. Мама сказала: Помой раму!"]);

    let mut corpus = Corpus::load(dir.path()).unwrap();
    let artifacts = Artifacts::new(dir.path());
    pipeline().run(&mut corpus, &artifacts).unwrap();

    let morph = fs::read_to_string(artifacts.path(1, ArtifactKind::MorphConllu)).unwrap();
    assert_eq!(
        &conllu::parse_document(&morph).unwrap(),
        &corpus.get(1).unwrap().sentences
    );

    // The POS variant carries the same tokens with the features masked.
    let pos = fs::read_to_string(artifacts.path(1, ArtifactKind::PosConllu)).unwrap();
    let sentences = conllu::parse_document(&pos).unwrap();
    assert_eq!(sentences.len(), 2);
    assert!(sentences
        .iter()
        .flat_map(|sentence| &sentence.tokens)
        .all(|token| token.morphology.features.is_empty()));
}

#[test]
fn aggregated_counts_match_the_annotation() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path(), &["Мама красиво мыла раму. Мама сказала: Помой раму!"]);

    let mut corpus = Corpus::load(dir.path()).unwrap();
    let artifacts = Artifacts::new(dir.path());
    pipeline().run(&mut corpus, &artifacts).unwrap();

    FrequencyAggregator::new(Artifacts::new(dir.path()))
        .run(&mut corpus)
        .unwrap();

    let counts = &corpus.get(1).unwrap().pos_frequencies;
    assert_eq!(counts.get(&UPos::Noun), Some(&4));
    assert_eq!(counts.get(&UPos::Verb), Some(&3));
    assert_eq!(counts.get(&UPos::Adv), Some(&1));
    assert_eq!(counts.get(&UPos::Punct), Some(&2));
}

/// Claims nominative case for every noun it knows, so any accusative in
/// the result must have come from the dictionary.
struct NominativeAnalyzer;

impl Analyzer for NominativeAnalyzer {
    fn analyze(&self, sentence: &str) -> Result<Vec<RawAnalysis>, AnalyzerError> {
        Ok(sentence
            .split_whitespace()
            .map(|word| match word {
                "раму" => RawAnalysis::analyzed(word, "рам", "S,жен,неод=им,ед"),
                "штурвал" => RawAnalysis::analyzed(word, "штурвал", "S,муж,неод=им,ед"),
                _ => RawAnalysis::plain(word),
            })
            .collect())
    }
}

#[test]
fn hybrid_pipeline_defers_to_the_dictionary_for_nouns() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path(), &["Она крутила раму и штурвал ."]);

    let mut corpus = Corpus::load(dir.path()).unwrap();
    let hybrid = HybridPipeline::new(
        NominativeAnalyzer,
        MystemConverter::new(MYSTEM_MAPPING_PATH).unwrap(),
        DictionaryAnalyzer::new(DICTIONARY_PATH).unwrap(),
        OpenCorporaConverter::new(OPENCORPORA_MAPPING_PATH).unwrap(),
    );
    hybrid.run(&mut corpus, &Artifacts::new(dir.path())).unwrap();

    let tokens = &corpus.get(1).unwrap().sentences[0].tokens;

    // "раму" is in the dictionary: lemma and features come from it.
    let ramu = tokens.iter().find(|token| token.text == "раму").unwrap();
    assert_eq!(ramu.morphology.lemma, "рама");
    assert_eq!(
        ramu.morphology.features.to_string(),
        "Animacy=Inan|Case=Acc|Gender=Fem|Number=Sing"
    );

    // "штурвал" is not: the primary analysis stands.
    let shturval = tokens.iter().find(|token| token.text == "штурвал").unwrap();
    assert_eq!(shturval.morphology.lemma, "штурвал");
    assert_eq!(
        shturval.morphology.features.to_string(),
        "Animacy=Inan|Case=Nom|Gender=Masc|Number=Sing"
    );
}

#[test]
fn segments_the_reference_text_into_two_sentences() {
    let segmenter = Segmenter::new();
    let sentences = segmenter.segment("Мама красиво мыла раму. Мама сказала: \"Помой раму!\"");

    assert_eq!(
        sentences,
        vec![
            "Мама красиво мыла раму.".to_string(),
            "Мама сказала: \"Помой раму!\"".to_string(),
        ]
    );
}

#[test]
fn gappy_corpus_is_rejected() {
    let dir = tempdir().unwrap();
    for id in [1, 3] {
        fs::write(dir.path().join(format!("{}_raw.txt", id)), "текст").unwrap();
        fs::write(dir.path().join(format!("{}_meta.json", id)), "{}").unwrap();
    }

    assert!(matches!(
        Corpus::load(dir.path()),
        Err(CorpusError::Inconsistent(_))
    ));
}

#[quickcheck]
fn serialized_sentences_parse_back(seeds: Vec<u8>) -> bool {
    let pool: &[(&str, &str, UPos, &str)] = &[
        ("мама", "мама", UPos::Noun, "Animacy=Anim|Case=Nom|Gender=Fem|Number=Sing"),
        ("мыла", "мыть", UPos::Verb, "Gender=Fem|Number=Sing|Tense=Past"),
        ("красиво", "красиво", UPos::Adv, "_"),
        ("10", "10", UPos::Num, "_"),
        (".", ".", UPos::Punct, "_"),
        ("test", "test", UPos::X, "_"),
    ];

    let tokens: Vec<Token> = seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| {
            let (text, lemma, pos, features) = pool[*seed as usize % pool.len()];
            Token::new(
                index as u32 + 1,
                text,
                Morphology::new(lemma, pos, features.parse::<Features>().unwrap()),
            )
        })
        .collect();
    let sentences = vec![
        Sentence::new(0, "Мама мыла раму.", tokens),
        Sentence::new(1, "Мама мыла раму.", Vec::new()),
    ];

    for include_features in [false, true] {
        let serialized = conllu::serialize_sentences(&sentences, include_features);
        let parsed = conllu::parse_document(&serialized).unwrap();

        if parsed.len() != sentences.len() {
            return false;
        }
        if include_features && parsed != sentences {
            return false;
        }
    }

    true
}
