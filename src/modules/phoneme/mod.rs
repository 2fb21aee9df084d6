//! Shared phoneme types (spec.md §3: PhonemeSequence). Both the dictionary
//! (ARPABET-style) and IPA-style phoneme mappers (§4.3, §4.4) produce this
//! same shape so [`crate::modules::unify`] has a single consumer-facing
//! input.

pub mod english;
pub mod hindi;

use serde::{Deserialize, Serialize};

/// Which alphabet a [`PhonemeSequence`]'s symbols are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alphabet {
    /// ARPABET-style dictionary alphabet (~40 symbols + stress digits).
    Dictionary,
    /// IPA-style, open set.
    Ipa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhonemeKind {
    Vowel,
    Consonant,
}

/// A single phoneme symbol, tagged vowel/consonant, carrying an optional
/// stress digit (only meaningful for dictionary-alphabet vowels: 0, 1, 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phoneme {
    pub symbol: String,
    pub kind: PhonemeKind,
    pub stress: Option<u8>,
}

impl Phoneme {
    pub fn vowel(symbol: impl Into<String>, stress: Option<u8>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: PhonemeKind::Vowel,
            stress,
        }
    }

    pub fn consonant(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind: PhonemeKind::Consonant,
            stress: None,
        }
    }

    pub fn is_vowel(&self) -> bool {
        matches!(self.kind, PhonemeKind::Vowel)
    }

    /// Primary stress is digit `1` (spec.md §3, ARPABET convention).
    pub fn is_primary_stress(&self) -> bool {
        self.stress == Some(1)
    }
}

/// An ordered phoneme sequence plus the index of its primary-stress
/// phoneme, if known (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeSequence {
    pub alphabet: Alphabet,
    pub phonemes: Vec<Phoneme>,
}

impl PhonemeSequence {
    pub fn new(alphabet: Alphabet, phonemes: Vec<Phoneme>) -> Self {
        Self { alphabet, phonemes }
    }

    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }

    /// Index of the phoneme carrying primary stress, if any.
    pub fn primary_stress_index(&self) -> Option<usize> {
        self.phonemes.iter().position(|p| p.is_primary_stress())
    }

    /// Index of the last vowel phoneme, if any.
    pub fn last_vowel_index(&self) -> Option<usize> {
        self.phonemes.iter().rposition(|p| p.is_vowel())
    }
}
