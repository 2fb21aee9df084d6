//! Injected English pronunciation dictionary (spec.md §1, §6): treated as a
//! read-only `word → list[PhonemeSequence]` mapping the caller supplies.
//! Absence triggers the letter-fallback G2P in
//! [`crate::modules::phoneme::english`].

use crate::modules::error::PhonemeError;
use crate::modules::phoneme::{Alphabet, Phoneme, PhonemeSequence};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

/// The dictionary-alphabet vowel symbols (spec.md §4.5).
pub static DICTIONARY_VOWELS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY",
        "OW", "OY", "UH", "UW",
    ]
    .into_iter()
    .collect()
});

/// Builds a [`PhonemeSequence`] from ARPABET-style tokens such as `"K"`,
/// `"AE1"`, `"T"` — the format common pronunciation dictionaries (e.g.
/// CMUdict) use, where a trailing digit on a vowel is its stress.
pub fn from_arpabet_tokens(tokens: &[&str]) -> PhonemeSequence {
    let phonemes = tokens
        .iter()
        .map(|tok| {
            let (base, stress) = split_stress(tok);
            if DICTIONARY_VOWELS.contains(base) {
                Phoneme::vowel(base, stress)
            } else {
                Phoneme::consonant(base)
            }
        })
        .collect();
    PhonemeSequence::new(Alphabet::Dictionary, phonemes)
}

fn split_stress(tok: &str) -> (&str, Option<u8>) {
    if let Some(last) = tok.chars().last() {
        if let Some(digit) = last.to_digit(10) {
            return (&tok[..tok.len() - 1], Some(digit as u8));
        }
    }
    (tok, None)
}

/// Read-only injected mapping from lowercase word to its known
/// pronunciations. Implementations must be safe to share across threads
/// (spec.md §5).
///
/// `Ok(None)` is an ordinary miss (the word just isn't in the dictionary,
/// handled by the letter-fallback G2P with no degradation). `Err` is a
/// genuine failure of a dictionary that *was* injected — e.g. a backing
/// store that went away mid-run — and is what spec.md §7's
/// `DictionaryUnavailable` degrades on.
pub trait Dictionary: Send + Sync {
    fn lookup(&self, word: &str) -> Result<Option<Vec<PhonemeSequence>>, PhonemeError>;
}

/// A simple immutable in-memory dictionary, suitable for tests and for
/// small bundled pronunciation lists.
pub struct StaticDictionary {
    entries: FxHashMap<String, Vec<PhonemeSequence>>,
}

impl StaticDictionary {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn with_entry(mut self, word: &str, tokens: &[&str]) -> Self {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(from_arpabet_tokens(tokens));
        self
    }
}

impl Default for StaticDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for StaticDictionary {
    fn lookup(&self, word: &str) -> Result<Option<Vec<PhonemeSequence>>, PhonemeError> {
        Ok(self.entries.get(&word.to_lowercase()).cloned())
    }
}

/// A dictionary stub that always fails its lookups, for exercising the
/// `DictionaryUnavailable` degrade path (spec.md §7) where a real backing
/// store is unreachable.
pub struct FailingDictionary;

impl Dictionary for FailingDictionary {
    fn lookup(&self, _word: &str) -> Result<Option<Vec<PhonemeSequence>>, PhonemeError> {
        Err(PhonemeError::DictionaryUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arpabet_tokens_tag_vowels_and_stress() {
        let seq = from_arpabet_tokens(&["K", "AE1", "T"]);
        assert_eq!(seq.phonemes[0].symbol, "K");
        assert!(!seq.phonemes[0].is_vowel());
        assert_eq!(seq.phonemes[1].symbol, "AE");
        assert!(seq.phonemes[1].is_vowel());
        assert_eq!(seq.phonemes[1].stress, Some(1));
        assert!(seq.phonemes[1].is_primary_stress());
    }

    #[test]
    fn static_dictionary_lookup_is_case_insensitive() {
        let dict = StaticDictionary::new().with_entry("cat", &["K", "AE1", "T"]);
        assert!(dict.lookup("CAT").unwrap().is_some());
        assert!(dict.lookup("dog").unwrap().is_none());
    }

    #[test]
    fn failing_dictionary_surfaces_an_error() {
        let dict = FailingDictionary;
        assert!(dict.lookup("anything").is_err());
    }
}
