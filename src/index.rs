//! The inverted index: in-memory construction, querying, and a byte-exact
//! binary codec.
//!
//! Layout on disk (all integers little-endian):
//!
//! ```text
//! header (32 bytes):
//!   u32 magic           0x5849_444D  ("MIDX")
//!   u32 version         1
//!   u32 num_terms
//!   u32 num_docs
//!   u64 forward_offset  byte offset of the forward block
//!   u64 reserved        0
//! term block (sorted ascending by term, immediately after the header):
//!   repeated num_terms times:
//!     u32 term_len, [u8; term_len]   term bytes (UTF-8)
//!     u32 posting_len, [u32; posting_len]  sorted, deduplicated doc ids
//! forward block (at forward_offset):
//!   repeated num_docs times, indexed by doc id 0..num_docs:
//!     u32 id              equal to the record's position in this block
//!     u32 title_len, [u8; title_len]
//!     u32 url_len, [u8; url_len]
//!     u32 category_len, [u8; category_len]
//!     u32 source_len, [u8; source_len]
//! ```
//!
//! `text` is consumed during indexing and never reaches the forward block.

use std::collections::HashMap;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

use crate::corpus::CorpusRecord;
use crate::error::IndexError;
use crate::stemmer::stem;
use crate::tokenizer::tokenize;

/// Magic bytes identifying an index file: ASCII "MIDX" read little-endian.
pub const MAGIC: u32 = 0x5849_444D;
/// The only format version this build knows how to read or write.
pub const VERSION: u32 = 1;

/// Everything kept about a document except its text. `id` is the
/// document's insertion ordinal, redundant with its position in the
/// forward store — there is no independent identifier in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub url: String,
    pub category: String,
    pub source: String,
}

/// A fully built, query-ready index.
#[derive(Debug, Default)]
pub struct Index {
    terms: HashMap<String, Vec<u32>>,
    forward: Vec<Document>,
}

impl Index {
    pub fn doc_count(&self) -> usize {
        self.forward.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Sorted, deduplicated posting list for `term`, or an empty slice if
    /// the term was never indexed.
    pub fn postings(&self, term: &str) -> &[u32] {
        self.terms.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every term paired with its posting-list length (document frequency),
    /// sorted by frequency descending. Used by `--stats` to report the most
    /// frequent terms in the corpus.
    pub fn term_frequencies(&self) -> Vec<(&str, usize)> {
        let mut freqs: Vec<(&str, usize)> = self
            .terms
            .iter()
            .map(|(term, postings)| (term.as_str(), postings.len()))
            .collect();
        freqs.sort_by(|a, b| b.1.cmp(&a.1));
        freqs
    }

    /// Look up a document by id. Out-of-range ids return an empty
    /// [`Document`] rather than an error — the universe of valid doc ids
    /// is `0..doc_count()` and callers only ever produce ids from postings.
    pub fn get_document(&self, doc_id: u32) -> Document {
        self.forward
            .get(doc_id as usize)
            .cloned()
            .unwrap_or_default()
    }

    pub fn all_doc_ids(&self) -> impl Iterator<Item = u32> {
        0..self.forward.len() as u32
    }

    /// Serialize this index to `path` in the layout documented at the top
    /// of this module.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let start = Instant::now();
        let path_str = path.display().to_string();
        let file = std::fs::File::create(path)?;
        let mut w = BufWriter::new(file);

        // Placeholder header; forward_offset gets patched in once known.
        w.write_all(&MAGIC.to_le_bytes())?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&(self.terms.len() as u32).to_le_bytes())?;
        w.write_all(&(self.forward.len() as u32).to_le_bytes())?;
        w.write_all(&0u64.to_le_bytes())?; // forward_offset placeholder
        w.write_all(&0u64.to_le_bytes())?; // reserved

        let mut terms: Vec<&String> = self.terms.keys().collect();
        terms.sort();
        for term in &terms {
            let bytes = term.as_bytes();
            w.write_all(&(bytes.len() as u32).to_le_bytes())?;
            w.write_all(bytes)?;
            let postings = &self.terms[*term];
            w.write_all(&(postings.len() as u32).to_le_bytes())?;
            for &doc_id in postings {
                w.write_all(&doc_id.to_le_bytes())?;
            }
        }

        w.flush()?;
        let mut file = w.into_inner().map_err(|e| e.into_error())?;
        let forward_offset = file.stream_position()?;

        let mut w = BufWriter::new(&mut file);
        for doc in &self.forward {
            w.write_all(&doc.id.to_le_bytes())?;
            write_field(&mut w, &doc.title)?;
            write_field(&mut w, &doc.url)?;
            write_field(&mut w, &doc.category)?;
            write_field(&mut w, &doc.source)?;
        }
        w.flush()?;
        drop(w);

        file.seek(SeekFrom::Start(16))?;
        file.write_all(&forward_offset.to_le_bytes())?;
        file.flush()?;

        let elapsed = start.elapsed();
        tracing::info!(
            path = %path_str,
            terms = terms.len(),
            docs = self.forward.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "saved index"
        );

        Ok(())
    }

    /// Load an index previously written by [`Index::save`].
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let start = Instant::now();
        let path_str = path.display().to_string();
        let file = std::fs::File::open(path)?;
        let mut r = BufReader::new(file);

        let magic = read_u32(&mut r, &path_str, "magic")?;
        if magic != MAGIC {
            return Err(IndexError::BadMagic {
                path: path_str,
                expected: MAGIC,
                found: magic,
            });
        }
        let version = read_u32(&mut r, &path_str, "version")?;
        if version != VERSION {
            return Err(IndexError::UnsupportedVersion {
                path: path_str,
                expected: VERSION,
                found: version,
            });
        }
        let num_terms = read_u32(&mut r, &path_str, "num_terms")?;
        let num_docs = read_u32(&mut r, &path_str, "num_docs")?;
        let _forward_offset = read_u64(&mut r, &path_str, "forward_offset")?;
        let _reserved = read_u64(&mut r, &path_str, "reserved")?;

        let mut terms = HashMap::with_capacity(num_terms as usize);
        for _ in 0..num_terms {
            let term = read_string(&mut r, &path_str, "term")?;
            let posting_len = read_u32(&mut r, &path_str, "posting_len")?;
            let mut postings = Vec::with_capacity(posting_len as usize);
            for _ in 0..posting_len {
                postings.push(read_u32(&mut r, &path_str, "posting entry")?);
            }
            terms.insert(term, postings);
        }

        let mut forward = Vec::with_capacity(num_docs as usize);
        for _ in 0..num_docs {
            forward.push(Document {
                id: read_u32(&mut r, &path_str, "doc id")?,
                title: read_string(&mut r, &path_str, "doc title")?,
                url: read_string(&mut r, &path_str, "doc url")?,
                category: read_string(&mut r, &path_str, "doc category")?,
                source: read_string(&mut r, &path_str, "doc source")?,
            });
        }

        let elapsed = start.elapsed();
        tracing::info!(
            path = %path_str,
            terms = terms.len(),
            docs = forward.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "loaded index"
        );

        Ok(Index { terms, forward })
    }
}

fn write_field<W: Write>(w: &mut W, s: &str) -> std::io::Result<()> {
    let bytes = s.as_bytes();
    w.write_all(&(bytes.len() as u32).to_le_bytes())?;
    w.write_all(bytes)
}

fn read_u32<R: Read>(r: &mut R, path: &str, context: &str) -> Result<u32, IndexError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|_| IndexError::Truncated {
        path: path.to_string(),
        context: context.to_string(),
    })?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R, path: &str, context: &str) -> Result<u64, IndexError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf).map_err(|_| IndexError::Truncated {
        path: path.to_string(),
        context: context.to_string(),
    })?;
    Ok(u64::from_le_bytes(buf))
}

fn read_string<R: Read>(r: &mut R, path: &str, context: &str) -> Result<String, IndexError> {
    let len = read_u32(r, path, context)?;
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf).map_err(|_| IndexError::Truncated {
        path: path.to_string(),
        context: context.to_string(),
    })?;
    String::from_utf8(buf).map_err(|_| IndexError::InvalidUtf8 {
        path: path.to_string(),
        context: context.to_string(),
    })
}

/// Accumulates documents and their postings while a corpus is scanned.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    terms: HashMap<String, Vec<u32>>,
    forward: Vec<Document>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize, stem, and index `record.text` (and its title) under the
    /// next doc id, then store the record's metadata in the forward block.
    pub fn add_document(&mut self, record: CorpusRecord) {
        let doc_id = self.forward.len() as u32;

        let mut seen = std::collections::HashSet::new();
        for field in [&record.title, &record.text] {
            for token in tokenize(field) {
                let stemmed = stem(&token);
                if seen.insert(stemmed.clone()) {
                    self.terms.entry(stemmed).or_default().push(doc_id);
                }
            }
        }

        self.forward.push(Document {
            id: doc_id,
            title: record.title,
            url: record.url,
            category: record.category,
            source: record.source,
        });
    }

    /// Read every record from a corpus reader, add each to the index, and
    /// finalize. Logs document/term/throughput diagnostics as it goes.
    pub fn build_from_corpus<R: std::io::BufRead>(
        mut self,
        reader: R,
    ) -> std::io::Result<Index> {
        let start = Instant::now();
        let records = crate::corpus::read_corpus(reader)?;
        let doc_total = records.len();
        for record in records {
            self.add_document(record);
        }
        let index = self.finalize();

        let elapsed = start.elapsed();
        let rate = if elapsed.as_secs_f64() > 0.0 {
            doc_total as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        tracing::info!(
            documents = doc_total,
            terms = index.term_count(),
            elapsed_ms = elapsed.as_millis() as u64,
            docs_per_sec = rate,
            "built index from corpus"
        );

        Ok(index)
    }

    /// Sort and dedup every posting list, consuming the builder.
    pub fn finalize(mut self) -> Index {
        for postings in self.terms.values_mut() {
            postings.sort_unstable();
            postings.dedup();
        }
        Index {
            terms: self.terms,
            forward: self.forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::parse_line;

    fn sample_index() -> Index {
        let mut builder = IndexBuilder::new();
        builder.add_document(
            parse_line(r#"{"title":"Cats and dogs","text":"Cats are running in the yard"}"#)
                .unwrap(),
        );
        builder.add_document(
            parse_line(r#"{"title":"Dogs only","text":"Dogs are barking loudly"}"#).unwrap(),
        );
        builder.finalize()
    }

    #[test]
    fn doc_and_term_counts() {
        let index = sample_index();
        assert_eq!(index.doc_count(), 2);
        assert!(index.term_count() > 0);
    }

    #[test]
    fn doc_id_equals_insertion_position() {
        let index = sample_index();
        assert_eq!(index.get_document(0).id, 0);
        assert_eq!(index.get_document(1).id, 1);
    }

    #[test]
    fn postings_are_sorted_and_deduped() {
        let index = sample_index();
        let postings = index.postings(&crate::stemmer::stem("dogs"));
        assert_eq!(postings, &[0, 1]);
    }

    #[test]
    fn unknown_term_has_empty_postings() {
        let index = sample_index();
        assert!(index.postings("nonexistentword").is_empty());
    }

    #[test]
    fn out_of_range_doc_id_returns_default_document() {
        let index = sample_index();
        assert_eq!(index.get_document(999), Document::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let index = sample_index();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.midx");
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded.doc_count(), index.doc_count());
        assert_eq!(loaded.term_count(), index.term_count());
        assert_eq!(loaded.get_document(0).id, index.get_document(0).id);
        assert_eq!(loaded.get_document(1).title, index.get_document(1).title);
        assert_eq!(
            loaded.postings(&crate::stemmer::stem("dogs")),
            index.postings(&crate::stemmer::stem("dogs"))
        );
    }

    #[test]
    fn load_rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.midx");
        std::fs::write(&path, [0u8; 32]).unwrap();
        let err = Index::load(&path).unwrap_err();
        assert!(matches!(err, IndexError::BadMagic { .. }));
    }

    #[test]
    fn load_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.midx");
        std::fs::write(&path, MAGIC.to_le_bytes()).unwrap();
        let err = Index::load(&path).unwrap_err();
        assert!(matches!(err, IndexError::Truncated { .. }));
    }

    #[test]
    fn term_frequencies_sorted_descending_by_posting_length() {
        let index = sample_index();
        let freqs = index.term_frequencies();
        assert_eq!(freqs.len(), index.term_count());
        for pair in freqs.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        let dogs_stem = crate::stemmer::stem("dogs");
        let dogs_freq = freqs
            .iter()
            .find(|(term, _)| *term == dogs_stem)
            .expect("dogs stem present");
        assert_eq!(dogs_freq.1, 2);
    }

    #[test]
    fn text_field_is_not_persisted() {
        let index = sample_index();
        // The forward block only carries id/title/url/category/source.
        let doc = index.get_document(0);
        assert_eq!(doc.title, "Cats and dogs");
    }
}
