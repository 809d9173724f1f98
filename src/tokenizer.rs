//! UTF-8-aware tokenizer: byte stream → lowercase term stream.
//!
//! Classification and case-folding operate on raw bytes, not on a Unicode
//! library, so that the on-disk index stays bit-exact across Rust versions
//! and platforms. The alphabet is ASCII Latin plus Cyrillic (U+0410-U+044F,
//! U+0401, U+0451) — see the module-level tables below for the exact ranges.

/// Classify the UTF-8 sequence starting at `bytes[pos]`.
///
/// Returns `Some((lowercased_bytes, consumed))` if it's a letter, `None` if
/// it's a separator (in which case `consumed` bytes should still be skipped
/// by the caller via [`non_letter_len`]).
fn letter_at(bytes: &[u8], pos: usize) -> Option<([u8; 2], usize)> {
    let c = bytes[pos];

    // ASCII
    if c.is_ascii_alphabetic() {
        let lower = if c.is_ascii_uppercase() { c + 0x20 } else { c };
        return Some(([lower, 0], 1));
    }

    // Cyrillic: two-byte UTF-8 sequences with lead 0xD0 or 0xD1.
    if c == 0xD0 || c == 0xD1 {
        if let Some(&c2) = bytes.get(pos + 1) {
            if c == 0xD0 && (0x90..=0xBF).contains(&c2) {
                // U+0410-U+043F
                let (lead, trail) = lowercase_d0(c2);
                return Some(([lead, trail], 2));
            }
            if c == 0xD1 && (0x80..=0x8F).contains(&c2) {
                // U+0440-U+044F already lowercase
                return Some(([0xD1, c2], 2));
            }
            if c == 0xD0 && c2 == 0x81 {
                // Yo uppercase U+0401 -> U+0451
                return Some(([0xD1, 0x91], 2));
            }
            if c == 0xD1 && c2 == 0x91 {
                // Yo lowercase, already canonical
                return Some(([0xD1, 0x91], 2));
            }
        }
    }

    None
}

/// Lowercase a Cyrillic byte pair whose lead byte is 0xD0.
///
/// U+0410-U+041F (uppercase А-П) -> U+0430-U+043F (lead stays 0xD0, trail +0x20).
/// U+0420-U+042F (uppercase Р-Я) -> U+0440-U+044F (lead becomes 0xD1, trail -0x20).
/// Already-lowercase trail bytes (0xB0-0xBF = а-п) pass through unchanged.
fn lowercase_d0(trail: u8) -> (u8, u8) {
    match trail {
        0x90..=0x9F => (0xD0, trail + 0x20), // А-П -> а-п
        0xA0..=0xAF => (0xD1, trail - 0x20), // Р-Я -> р-я
        _ => (0xD0, trail),                  // already lowercase (а-п)
    }
}

/// Number of bytes a non-letter UTF-8 sequence starting with `c` occupies,
/// so the tokenizer can skip it as a single separator instead of re-scanning
/// each continuation byte as its own (non-)letter.
fn non_letter_len(c: u8) -> usize {
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

/// Tokenize `text` into an ordered sequence of lowercase tokens.
///
/// Each maximal run of letters (ASCII Latin or Cyrillic) becomes one token.
/// Everything else — digits, punctuation, whitespace, other scripts — is a
/// separator. Repetitions are preserved; callers that need per-document
/// dedup do it themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut current = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match letter_at(bytes, pos) {
            Some((buf, len)) => {
                current.extend_from_slice(&buf[..len]);
                pos += len;
            }
            None => {
                if !current.is_empty() {
                    // SAFETY: `current` is built exclusively from bytes emitted
                    // by `letter_at`, which only ever returns valid ASCII or
                    // valid two-byte Cyrillic UTF-8 sequences.
                    tokens.push(String::from_utf8(std::mem::take(&mut current)).unwrap());
                }
                pos += non_letter_len(bytes[pos]);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(String::from_utf8(current).unwrap());
    }

    tokens
}
