//! `midx-build` — turn a newline-delimited corpus into a binary index.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::Parser;

use midx::cli::args::BuildArgs;
use midx::index::IndexBuilder;
use midx::IndexError;

fn main() {
    midx::init_logging();
    let args = BuildArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &BuildArgs) -> Result<(), IndexError> {
    let file = File::open(&args.input)?;
    let reader = BufReader::new(file);

    let index = IndexBuilder::new().build_from_corpus(reader)?;

    if args.stats {
        println!(
            "{} documents, {} terms -> {}",
            index.doc_count(),
            index.term_count(),
            args.output
        );
        println!();
        println!("Top 20 most frequent terms:");
        for (i, (term, doc_freq)) in index.term_frequencies().into_iter().take(20).enumerate() {
            println!("  {}. {term} - {doc_freq} documents", i + 1);
        }
    }

    index.save(Path::new(&args.output))?;

    Ok(())
}
