use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_splice_core::io::load_corpus;
use rs_splice_core::render::render;
use rs_splice_core::{Generator, GraphIndex, Preference, SpliceResult, WalkOptions};

/// Splice two corpora into one pseudo-random text
#[derive(Parser, Debug)]
#[command(name = "rs-splice")]
#[command(version = "0.1.0")]
#[command(about = "Generates text that hops between two corpora wherever they overlap")]
struct Cli {
    /// First corpus
    corpus_a: PathBuf,

    /// Second corpus
    corpus_b: PathBuf,

    /// Number of sentences to generate
    sentences: usize,

    /// Tag of the first corpus (defaults to its path)
    #[arg(long)]
    tag_a: Option<String>,

    /// Tag of the second corpus (defaults to its path)
    #[arg(long)]
    tag_b: Option<String>,

    /// Seed for a reproducible walk
    #[arg(long)]
    seed: Option<u64>,

    /// Alternate between crossing and staying instead of always crossing
    #[arg(long)]
    alternate: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, the generated line alone goes to stdout
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the index from both corpora and renders one walk over it.
fn run(cli: &Cli) -> SpliceResult<String> {
    // Both corpora are read and tokenized before any walk
    let corpora = [
        load_corpus(&cli.corpus_a, cli.tag_a.as_deref())?,
        load_corpus(&cli.corpus_b, cli.tag_b.as_deref())?,
    ];
    let index = GraphIndex::build(&corpora)?;

    let preference = if cli.alternate { Preference::Alternate } else { Preference::PreferCross };
    let options = WalkOptions::new(cli.sentences).with_preference(preference);
    let generator = Generator::new(&index, options);

    let walk = match cli.seed {
        Some(seed) => generator.walk(&mut StdRng::seed_from_u64(seed))?,
        None => generator.walk(&mut rand::rng())?,
    };
    info!("{} sentences, {} corpus crossings", walk.sentences, walk.crossings);

    Ok(render(&walk.tokens))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rs-splice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn missing_corpus_is_reported_by_path() {
        let err = run(&cli(&["missing-a.txt", "missing-b.txt", "1"])).unwrap_err();
        assert!(err.to_string().starts_with("cannot read corpus missing-a.txt: "));
    }

    #[test]
    fn unparseable_corpus_is_reported_by_tag() {
        let dir = std::env::temp_dir();
        let a = dir.join(format!("rs-splice-cli-a-{}.txt", std::process::id()));
        let b = dir.join(format!("rs-splice-cli-b-{}.txt", std::process::id()));
        fs::write(&a, "the cat sat.").unwrap();
        fs::write(&b, "a cat # sat.").unwrap();

        let args = [a.to_str().unwrap(), b.to_str().unwrap(), "1", "--tag-b", "B"];
        let err = run(&cli(&args)).unwrap_err();
        assert_eq!(err.to_string(), "corpus `B`: no token rule matches '#' at byte 6");

        let args = [a.to_str().unwrap(), a.to_str().unwrap(), "0", "--seed", "3"];
        assert_eq!(run(&cli(&args)).unwrap(), " the cat");

        fs::remove_file(&a).unwrap();
        fs::remove_file(&b).unwrap();
    }

    #[test]
    fn sentence_count_must_be_a_number() {
        let parsed = Cli::try_parse_from(["rs-splice", "a.txt", "b.txt", "many"]);
        assert!(parsed.is_err());
    }
}
