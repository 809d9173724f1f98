//! # midx — boolean search over a bilingual document corpus
//!
//! A build-time pass turns a newline-delimited corpus into a compact,
//! byte-exact binary inverted index (see [`index`]); a query-time pass
//! loads that index and answers boolean queries over document ids (see
//! [`query`]).
//!
//! ## Library usage
//!
//! This crate is primarily the two CLI binaries `midx-build` and
//! `midx-search`, but every building block — tokenizer, stemmer, corpus
//! reader, index, query parser/evaluator, posting-list algebra — is a
//! public module for testing and benchmarking.

pub mod cli;
pub mod corpus;
pub mod error;
pub mod index;
pub mod query;
pub mod stemmer;
pub mod tokenizer;

pub use error::IndexError;
pub use index::{Document, Index, IndexBuilder};
pub use query::{parse, search, ParseOutcome, Query};
pub use stemmer::stem;
pub use tokenizer::tokenize;

/// Install a `tracing-subscriber` fmt layer writing to stderr, honoring
/// `RUST_LOG` if set and defaulting to `info` otherwise. Shared by both
/// binaries so their diagnostics look identical.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn public_api_round_trips_build_and_search() {
        let mut builder = IndexBuilder::new();
        builder.add_document(
            corpus::parse_line(
                r#"{"id":"a1","title":"Кардиология","text":"Болезни сердца и лечение"}"#,
            )
            .unwrap(),
        );
        builder.add_document(
            corpus::parse_line(r#"{"id":"a2","title":"Neurology","text":"Brain and nerves"}"#)
                .unwrap(),
        );
        let index = builder.finalize();

        assert_eq!(index.doc_count(), 2);
        let hits = search(&index, "сердца");
        assert_eq!(hits, vec![0]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokenize_never_panics(s in ".{0,200}") {
            let _ = tokenize(&s);
        }

        #[test]
        fn stem_never_lengthens_tokenized_input(s in "[a-zA-Zа-яА-Я ]{1,40}") {
            for token in tokenize(&s) {
                let stemmed = stem(&token);
                prop_assert!(stemmed.len() <= token.len());
            }
        }

        #[test]
        fn parse_never_panics(s in ".{0,100}") {
            let _ = parse(&s);
        }
    }
}
