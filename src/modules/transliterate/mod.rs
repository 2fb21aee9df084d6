//! HinglishTransliterator (spec.md §4.2): maps romanized Indic tokens to
//! Devanagari via a closed lexicon, falling back to a deterministic
//! longest-match-first multigraph rewrite. Output is not claimed to be
//! linguistically correct — only stable and roughly phonetic; the
//! downstream phoneme mapper tolerates the noise (spec.md §4.2).

use crate::modules::script::lexicon::{
    DIGRAPH_TABLE, HINGLISH_TO_DEVANAGARI, VOWEL_SIGN_TABLE,
};
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static DIGRAPH_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    let patterns: Vec<&str> = DIGRAPH_TABLE.iter().map(|(ascii, _)| *ascii).collect();
    AhoCorasickBuilder::new()
        .match_kind(MatchKind::LeftmostLongest)
        .build(patterns)
        .expect("digraph table patterns must be valid")
});

static VOWEL_SIGNS: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| VOWEL_SIGN_TABLE.iter().copied().collect());

/// The independent vowel letters in [`DIGRAPH_TABLE`] — used to tell a
/// vowel-initial match from a consonant match so we know whether to emit an
/// independent vowel or a dependent vowel sign.
fn is_vowel_ascii(ascii: &str) -> bool {
    matches!(ascii, "a" | "i" | "u" | "e" | "o" | "aa" | "ee" | "oo" | "ai" | "au")
}

pub struct HinglishTransliterator;

impl HinglishTransliterator {
    /// Transliterates an ASCII Hinglish token to Devanagari.
    pub fn transliterate(token: &str) -> String {
        let lower = token.to_lowercase();

        if let Some(deva) = HINGLISH_TO_DEVANAGARI.get(lower.as_str()) {
            return deva.to_string();
        }

        Self::rewrite(&lower)
    }

    /// Deterministic longest-match-first multigraph rewrite (spec.md §4.2).
    /// Unmatched characters pass through; unknown letters outside ASCII
    /// a-z are dropped (best-effort).
    fn rewrite(lower: &str) -> String {
        let mut out = String::new();
        let mut prev_was_consonant = false;

        let mut pos = 0;
        let mut matches: Vec<(usize, usize, usize)> = DIGRAPH_AUTOMATON
            .find_iter(lower)
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();
        matches.sort_by_key(|(start, _, _)| *start);

        let bytes = lower.as_bytes();
        for (start, end, pattern_idx) in matches {
            if start < pos {
                continue; // overlapped by an earlier, already-consumed match
            }
            if start > pos {
                // Gap of unmatched characters: best-effort passthrough for
                // ASCII, drop everything else.
                for ch in lower[pos..start].chars() {
                    if ch.is_ascii() {
                        out.push(ch);
                    }
                }
            }

            let (ascii, deva) = DIGRAPH_TABLE[pattern_idx];
            if is_vowel_ascii(ascii) && prev_was_consonant {
                if let Some(sign) = VOWEL_SIGNS.get(ascii) {
                    out.push_str(sign);
                } else {
                    out.push_str(deva);
                }
                prev_was_consonant = false;
            } else {
                out.push_str(deva);
                prev_was_consonant = !is_vowel_ascii(ascii);
            }

            pos = end;
        }

        if pos < bytes.len() {
            for ch in lower[pos..].chars() {
                if ch.is_ascii() {
                    out.push(ch);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_hit_returns_table_value() {
        assert_eq!(HinglishTransliterator::transliterate("tera"), "तेरा");
        assert_eq!(HinglishTransliterator::transliterate("Mera"), "मेरा");
    }

    #[test]
    fn unknown_word_falls_back_to_multigraph_rewrite() {
        let out = HinglishTransliterator::transliterate("kal");
        assert!(!out.is_empty());
        assert!(out.chars().all(|c| (0x0900..=0x097F).contains(&(c as u32))));
    }

    #[test]
    fn output_is_stable_across_calls() {
        let a = HinglishTransliterator::transliterate("bhaiyaa");
        let b = HinglishTransliterator::transliterate("bhaiyaa");
        assert_eq!(a, b);
    }

    #[test]
    fn never_panics_on_unusual_input() {
        let _ = HinglishTransliterator::transliterate("");
        let _ = HinglishTransliterator::transliterate("xyz123");
        let _ = HinglishTransliterator::transliterate("zzzzzz");
    }
}
