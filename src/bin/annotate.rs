use std::path::PathBuf;

use clap::Parser;
use udmorph::analyzer::{DictionaryAnalyzer, MystemAnalyzer};
use udmorph::config::Config;
use udmorph::corpus::Corpus;
use udmorph::pipeline::{Annotate, HybridPipeline, Pipeline};
use udmorph::tagset::{MystemConverter, OpenCorporaConverter};

#[derive(Parser)]
#[command(version, about = "Annotates every document of a corpus")]
struct Opts {
    /// Directory with the {id}_raw.txt / {id}_meta.json pairs.
    #[arg(long)]
    corpus_dir: PathBuf,
    /// Artifact target directory, the corpus directory when absent.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Mystem tag mapping table.
    #[arg(long, default_value = "data/mystem_tags_mapping.json")]
    mapping: PathBuf,
    /// Mystem executable.
    #[arg(long, default_value = "mystem")]
    mystem: PathBuf,
    /// Dictionary dump; switches to the hybrid pipeline when given.
    #[arg(long)]
    dictionary: Option<PathBuf>,
    /// OpenCorpora tag mapping table, used by the hybrid pipeline.
    #[arg(long, default_value = "data/opencorpora_tags_mapping.json")]
    backup_mapping: PathBuf,
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    let config = match opts.output_dir {
        Some(ref output_dir) => Config::new(&opts.corpus_dir, output_dir),
        None => Config::in_place(&opts.corpus_dir),
    };

    let mut corpus = Corpus::load(&config.corpus_dir).unwrap();
    log::info!(
        "annotating {} documents from {:?}",
        corpus.len(),
        corpus.root()
    );

    let analyzer = MystemAnalyzer::with_command(&opts.mystem);
    let converter = MystemConverter::new(&opts.mapping).unwrap();
    let sink = config.artifacts();
    log::info!("writing artifacts to {:?}", sink.dir());

    match opts.dictionary {
        Some(ref dictionary) => {
            let word_analyzer = DictionaryAnalyzer::new(dictionary).unwrap();
            let backup_converter = OpenCorporaConverter::new(&opts.backup_mapping).unwrap();

            HybridPipeline::new(analyzer, converter, word_analyzer, backup_converter)
                .run(&mut corpus, &sink)
                .unwrap();
        }
        None => {
            Pipeline::new(analyzer, converter)
                .run(&mut corpus, &sink)
                .unwrap();
        }
    }
}
