//! CLI argument structs for the `midx-build` and `midx-search` binaries.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "midx-build", version, about = "Build a binary inverted index from a newline-delimited corpus", after_long_help = r#"EXAMPLES:
  Basic:           midx-build --input corpus.jsonl --output index.midx
  With stats:      midx-build --input corpus.jsonl --output index.midx --stats
  Default paths:   midx-build

INPUT FORMAT:
  One JSON-like object per line: {"id":"1","title":"...","url":"...",
  "category":"...","source":"...","text":"..."}. Missing fields are treated
  as empty strings; "null" is treated as an empty string. Lines where both
  title and text are empty are skipped.
"#)]
pub struct BuildArgs {
    /// Path to the newline-delimited corpus file.
    #[arg(short, long, default_value = "corpus.jsonl")]
    pub input: String,

    /// Path to write the binary index to.
    #[arg(short, long, default_value = "index.midx")]
    pub output: String,

    /// Print document/term counts and timing after building.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Parser, Debug)]
#[command(name = "midx-search", version, about = "Run boolean queries against a binary inverted index", after_long_help = r#"QUERY SYNTAX:
  Terms separated by whitespace are implicitly ANDed: "red car" means
  "red && car". Explicit operators: && (and), || (or), ! (not), and
  parentheses for grouping.

EXAMPLES:
  Single term:     midx-search --query "diabetes"
  AND:             midx-search --query "diabetes && treatment"
  OR:              midx-search --query "red || yellow"
  NOT:             midx-search --query "!surgery"
  Grouped:         midx-search --query "(red || yellow) && car"
  Batch mode:      midx-search --batch < queries.txt
"#)]
pub struct SearchArgs {
    /// Path to a binary index built by midx-build.
    #[arg(long, default_value = "index.midx")]
    pub index: String,

    /// A single query to run.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Read one query per stdin line instead of a single `--query`.
    #[arg(long)]
    pub batch: bool,

    /// Maximum number of matching documents to print per query.
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}
