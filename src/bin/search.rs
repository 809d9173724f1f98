//! `midx-search` — run boolean queries against a binary index.

use std::io::BufRead;
use std::path::Path;

use clap::Parser;

use midx::cli::args::SearchArgs;
use midx::index::Index;
use midx::{search, IndexError};

fn main() {
    midx::init_logging();
    let args = SearchArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &SearchArgs) -> Result<(), IndexError> {
    let index = Index::load(Path::new(&args.index))?;

    match (&args.query, args.batch) {
        (Some(query), _) => run_query(&index, query, args.limit),
        (None, true) => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }
                println!("> {query}");
                run_query(&index, query, args.limit);
            }
        }
        (None, false) => {
            eprintln!("Error: provide --query or --batch");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_query(index: &Index, query: &str, limit: usize) {
    let hits = search(index, query);
    println!("{} result(s)", hits.len());
    for doc_id in hits.into_iter().take(limit) {
        let doc = index.get_document(doc_id);
        println!("  [{doc_id}] {} — {}", doc.title, doc.url);
    }
}
