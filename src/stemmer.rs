//! Bilingual suffix-stripping stemmer.
//!
//! Purely suffix-based, never lengthens a word, and is idempotent on short
//! inputs. Russian words are recognized by their leading UTF-8 byte; every
//! other input goes through a simplified Porter variant. Neither rule set
//! is linguistically complete — see SPEC_FULL.md §9 for why that's fine.

/// Russian suffixes, longest-first; order within a length tier is the order
/// they're listed in, matching the reference implementation's table.
const RUSSIAN_SUFFIXES: &[&str] = &[
    "ивший", "ывший", "ующий", "ающий", // participles
    "ённый", "анный", "енный", // passive participles
    "ость", "ести", "ости", // nouns
    "ами", "ями", "ому", "ему", // case endings
    "ого", "его", "ых", "их", // adjectives
    "ать", "ять", "еть", "ить", // infinitives
    "ал", "ял", "ел", "ил", // past tense
    "ет", "ит", "ат", "ят", // present tense
    "ой", "ый", "ий", "ая", "яя", // adjectives
    "ов", "ев", "ей", // genitive plural
    "ам", "ям", "ом", "ем", // dative, instrumental
    "ах", "ях", "ую", "юю", // prepositional, accusative
    "ть", "ся", // infinitive, reflexive
    "а", "я", "о", "е", "и", "ы", "у", "ю", // bare endings
];

/// English suffixes for step 4, longest-first.
const ENGLISH_SUFFIXES: &[&str] = &[
    "ational", "ization", "fulness", "ousness", "iveness",
    "ation", "ness", "ment", "able", "ible", "ence", "ance",
    "ful", "ous", "ive", "ize", "ise", "ant", "ent",
    "al", "er", "or", "ly",
];

fn char_count(word: &str) -> usize {
    word.chars().count()
}

fn is_cyrillic(word: &str) -> bool {
    matches!(word.as_bytes().first(), Some(0xD0) | Some(0xD1))
}

/// Stem a non-empty lowercase token.
pub fn stem(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if is_cyrillic(word) {
        stem_russian(word)
    } else {
        stem_english(word)
    }
}

fn stem_russian(word: &str) -> String {
    if word.len() < 4 {
        return word.to_string();
    }

    for suffix in RUSSIAN_SUFFIXES {
        if word.ends_with(suffix) && char_count(word) > char_count(suffix) + 1 {
            return word[..word.len() - suffix.len()].to_string();
        }
    }

    word.to_string()
}

fn stem_english(word: &str) -> String {
    if word.len() < 3 {
        return word.to_string();
    }

    let mut result = word.to_string();

    // Step 1: plurals.
    if result.ends_with("sses") {
        result.truncate(result.len() - 2); // strip "es"
    } else if result.ends_with("ies") {
        result.truncate(result.len() - 3);
        result.push('i');
    } else if result.ends_with("ss") {
        // leave as-is
    } else if result.ends_with('s') && result.len() > 3 {
        result.truncate(result.len() - 1);
    }

    // Step 2: past tense / progressive.
    if result.ends_with("eed") {
        if result.len() > 4 {
            result.truncate(result.len() - 2); // strip "ed"
        }
    } else if result.ends_with("ed") && result.len() > 4 {
        result.truncate(result.len() - 2);
        strip_doubled_final_letter(&mut result);
    } else if result.ends_with("ing") && result.len() > 5 {
        result.truncate(result.len() - 3);
        strip_doubled_final_letter(&mut result);
    }

    // Step 3: y -> i after a consonant.
    if result.ends_with('y') && result.len() > 2 {
        let prev = result.as_bytes()[result.len() - 2] as char;
        if !matches!(prev, 'a' | 'e' | 'i' | 'o' | 'u') {
            result.truncate(result.len() - 1);
            result.push('i');
        }
    }

    // Step 4: suffix list.
    for suffix in ENGLISH_SUFFIXES {
        if result.ends_with(suffix) && result.len() > suffix.len() + 2 {
            result.truncate(result.len() - suffix.len());
            break;
        }
    }

    result
}

/// If the working stem ends in a doubled letter, strip one copy.
fn strip_doubled_final_letter(word: &mut String) {
    let bytes = word.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        word.truncate(word.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_running_and_runs_converge() {
        let a = stem("running");
        let b = stem("runs");
        assert!(!a.is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn english_happiness_strips_ness() {
        assert_eq!(stem("happiness"), "happi");
    }

    #[test]
    fn english_short_word_unchanged() {
        assert_eq!(stem("is"), "is");
    }

    #[test]
    fn english_plural_sses() {
        assert_eq!(stem("classes"), "class");
    }

    #[test]
    fn english_plural_ies() {
        assert_eq!(stem("ponies"), "poni");
    }

    #[test]
    fn english_plural_ies_on_length_three_word() {
        // No emptiness guard on this branch: the word "ies" itself yields a bare "i".
        assert_eq!(stem("ies"), "i");
    }

    #[test]
    fn english_ss_is_untouched() {
        assert_eq!(stem("class"), "class");
    }

    #[test]
    fn english_eed_requires_length() {
        assert_eq!(stem("agreed"), "agree");
    }

    #[test]
    fn english_ed_with_doubled_consonant() {
        assert_eq!(stem("stopped"), "stop");
    }

    #[test]
    fn english_ing_with_doubled_consonant() {
        assert_eq!(stem("running"), "run");
    }

    #[test]
    fn english_y_after_consonant_becomes_i() {
        assert_eq!(stem("happy"), "happi");
    }

    #[test]
    fn english_y_after_vowel_unchanged() {
        assert_eq!(stem("play"), "play");
    }

    #[test]
    fn russian_short_word_unchanged() {
        // Under 4 bytes -> unchanged even though it has a stemmable ending.
        assert_eq!(stem("это"), "это");
    }

    #[test]
    fn russian_cardiology_shares_prefix_with_its_genitive() {
        let a = stem("кардиология");
        let b = stem("кардиологии");
        assert!(!a.is_empty());
        assert!(!b.is_empty());
        let prefix_a = &a.as_bytes()[..10.min(a.len())];
        let prefix_b = &b.as_bytes()[..10.min(b.len())];
        assert_eq!(prefix_a, prefix_b);
    }

    #[test]
    fn russian_min_length_guard_prevents_overstemming() {
        // "то" is 4 bytes / 2 chars and ends in the 1-char suffix "о", the
        // only suffix it matches. char_count(word) == char_count(suffix) + 1
        // exactly (2 == 1 + 1), so the guard's strict `>` fails and the
        // suffix is not stripped.
        let result = stem("то");
        assert_eq!(result, "то");
    }

    #[test]
    fn stemmer_never_lengthens_input() {
        for w in ["running", "кардиология", "is", "а", "happiness"] {
            assert!(stem(w).len() <= w.len());
        }
    }

    #[test]
    fn stemmer_idempotent_on_its_own_output() {
        for w in [
            "running", "runs", "happiness", "is", "кардиология",
            "кардиологии", "ponies", "stopped", "happy",
        ] {
            let once = stem(w);
            let twice = stem(&once);
            assert_eq!(once, twice, "stem not idempotent for {w:?}");
        }
    }
}
