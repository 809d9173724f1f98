//! Line-delimited corpus reader.
//!
//! The corpus format is JSON-*like*, not JSON: one object per line, with
//! `title`, `url`, `category`, `source`, `text` string fields. We read it
//! with a hand-rolled field extractor rather than a real JSON parser,
//! matching the reference indexer's tolerance for the exact shape the
//! corpus generator produces (no nesting, no arrays, string or `null`
//! values only). There is no `id` field in the input — a document's id is
//! its insertion ordinal, assigned by the index builder.

use std::io::BufRead;

/// One parsed corpus line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusRecord {
    pub title: String,
    pub url: String,
    pub category: String,
    pub source: String,
    pub text: String,
}

/// Number of bytes the UTF-8 sequence starting with `c` occupies.
fn utf8_seq_len(c: u8) -> usize {
    if c & 0x80 == 0 {
        1
    } else if c & 0xE0 == 0xC0 {
        2
    } else if c & 0xF0 == 0xE0 {
        3
    } else if c & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Find `"key"`, then the next `:` after it, then extract the value that
/// follows: a quoted string (with escapes decoded) or a bare token read up
/// to the next `,`, `}`, or end of line. `null` yields an empty string.
fn extract_field(line: &str, key: &str) -> Option<String> {
    let needle = format!("\"{key}\"");
    let key_pos = line.find(&needle)?;
    let after_key = key_pos + needle.len();
    let colon_rel = line[after_key..].find(':')?;
    let mut pos = after_key + colon_rel + 1;

    let bytes = line.as_bytes();
    while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
        pos += 1;
    }

    if pos >= bytes.len() {
        return Some(String::new());
    }

    if bytes[pos] == b'"' {
        pos += 1;
        let mut value = String::new();
        while pos < bytes.len() {
            match bytes[pos] {
                b'"' => return Some(value),
                b'\\' if pos + 1 < bytes.len() => {
                    match bytes[pos + 1] {
                        b'n' => {
                            value.push('\n');
                            pos += 2;
                        }
                        b't' => {
                            value.push('\t');
                            pos += 2;
                        }
                        b'"' => {
                            value.push('"');
                            pos += 2;
                        }
                        b'\\' => {
                            value.push('\\');
                            pos += 2;
                        }
                        _ => {
                            // Unrecognized escape: the literal backslash
                            // passes through; the next byte is handled on
                            // its own by the next loop iteration.
                            value.push('\\');
                            pos += 1;
                        }
                    }
                }
                b => {
                    let len = utf8_seq_len(b);
                    if pos + len > bytes.len() {
                        break;
                    }
                    if let Ok(s) = std::str::from_utf8(&bytes[pos..pos + len]) {
                        value.push_str(s);
                    }
                    pos += len;
                }
            }
        }
        Some(value)
    } else {
        // Bare token: null or an unquoted scalar. Read to the next `,` `}` or EOL.
        let start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b',' | b'}' | b'\n' | b'\r') {
            pos += 1;
        }
        let token = line[start..pos].trim();
        if token == "null" {
            Some(String::new())
        } else {
            Some(token.to_string())
        }
    }
}

/// Parse one corpus line into a [`CorpusRecord`]. Returns `None` for lines
/// that are blank, that don't start with `{`, or where both `title` and
/// `text` are empty — the reference indexer treats all three as nothing
/// worth indexing.
pub fn parse_line(line: &str) -> Option<CorpusRecord> {
    if line.is_empty() || !line.starts_with('{') {
        return None;
    }

    let record = CorpusRecord {
        title: extract_field(line, "title").unwrap_or_default(),
        url: extract_field(line, "url").unwrap_or_default(),
        category: extract_field(line, "category").unwrap_or_default(),
        source: extract_field(line, "source").unwrap_or_default(),
        text: extract_field(line, "text").unwrap_or_default(),
    };

    if record.title.is_empty() && record.text.is_empty() {
        return None;
    }

    Some(record)
}

/// Read every record out of a newline-delimited corpus file.
pub fn read_corpus<R: BufRead>(reader: R) -> std::io::Result<Vec<CorpusRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(record) = parse_line(&line) {
            records.push(record);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_line() {
        let line = r#"{"title":"Hello","url":"http://x","category":"news","source":"wire","text":"Hello world"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.title, "Hello");
        assert_eq!(record.url, "http://x");
        assert_eq!(record.category, "news");
        assert_eq!(record.source, "wire");
        assert_eq!(record.text, "Hello world");
    }

    #[test]
    fn decodes_escapes() {
        let line = r#"{"title":"a\"b\\c","text":"line1\nline2\ttab"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.title, "a\"b\\c");
        assert_eq!(record.text, "line1\nline2\ttab");
    }

    #[test]
    fn unrecognized_escape_passes_backslash_through() {
        let line = r#"{"title":"a\qb","text":"x"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.title, "a\\qb");
    }

    #[test]
    fn null_becomes_empty_string() {
        let line = r#"{"title":"x","url":null,"text":"y"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.url, "");
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn line_not_starting_with_brace_is_skipped() {
        assert!(parse_line(r#"// comment {"title":"x","text":"y"}"#).is_none());
    }

    #[test]
    fn title_and_text_both_empty_is_skipped() {
        let line = r#"{"title":"","text":"","url":"http://x"}"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn title_alone_is_enough() {
        let line = r#"{"title":"Just a title","text":""}"#;
        assert!(parse_line(line).is_some());
    }

    #[test]
    fn handles_cyrillic_values() {
        let line = r#"{"title":"Привет","text":"Как дела"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.title, "Привет");
        assert_eq!(record.text, "Как дела");
    }

    #[test]
    fn missing_field_is_empty_not_an_error() {
        let line = r#"{"title":"only title"}"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.category, "");
        assert_eq!(record.source, "");
    }

    #[test]
    fn reads_multiple_lines_from_a_reader() {
        let data = concat!(
            "{\"title\":\"One\",\"text\":\"first\"}\n",
            "\n",
            "{\"title\":\"\",\"text\":\"\"}\n",
            "{\"title\":\"Two\",\"text\":\"second\"}\n",
        );
        let records = read_corpus(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "One");
        assert_eq!(records[1].title, "Two");
    }
}
