use std::path::PathBuf;

use clap::Parser;
use udmorph::corpus::Corpus;
use udmorph::frequency::FrequencyAggregator;
use udmorph::io::Artifacts;

#[derive(Parser)]
#[command(version, about = "Reports canonical POS counts per document")]
struct Opts {
    /// Directory with the corpus and its annotation artifacts.
    #[arg(long)]
    corpus_dir: PathBuf,
    /// Restrict the report to a single document ID.
    #[arg(long)]
    id: Option<u32>,
}

fn main() {
    env_logger::init();
    let opts = Opts::parse();

    let mut corpus = Corpus::load(&opts.corpus_dir).unwrap();
    let aggregator = FrequencyAggregator::new(Artifacts::new(&opts.corpus_dir));
    aggregator.run(&mut corpus).unwrap();

    for document in corpus.documents() {
        if opts.id.map_or(false, |id| id != document.id) {
            continue;
        }

        let mut counts: Vec<_> = document.pos_frequencies.iter().collect();
        counts.sort_by_key(|&(pos, _)| pos.as_str());
        for (pos, count) in counts {
            println!("{}\t{}\t{}", document.id, pos, count);
        }
    }
}
