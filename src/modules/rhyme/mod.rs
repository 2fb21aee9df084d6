//! Rhyme tail extraction (spec.md §4.6) and the data types §3 defines for
//! clustering: [`WordClusterEntry`], [`Cluster`], [`RhymeClassId`].

pub mod basic;
pub mod multisyllable;

use crate::modules::unify::UnifiedSequence;
use serde::{Deserialize, Serialize};

/// A stable id derived purely from tail content (spec.md §3): two tails
/// with equal unified symbol strings always share an id, independent of
/// encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RhymeClassId(pub u64);

/// The distinguished class for tokens with an empty tail (spec.md §4.7).
pub const EMPTY_TAIL_CLASS: RhymeClassId = RhymeClassId(0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClusterEntry {
    pub word_index: usize,
    pub surface: String,
    pub class_id: RhymeClassId,
    /// Character spans into `surface`; a single whole-surface span for
    /// basic detection, narrower spans for multisyllable detection.
    pub spans: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub class_id: RhymeClassId,
    pub members: Vec<WordClusterEntry>,
}

/// Extracts the rhyme tail from a [`UnifiedSequence`] (spec.md §4.6):
/// the suffix starting at the last vowel carrying primary stress, falling
/// back to the last vowel overall, falling back to the full sequence if
/// there is no vowel at all.
pub fn extract_tail(unified: &UnifiedSequence) -> &[crate::modules::unify::UnifiedSymbol] {
    if unified.is_empty() {
        return unified;
    }

    let stressed_vowel_idx = unified
        .iter()
        .rposition(|s| s.is_vowel && s.stress == Some(1));

    let idx = stressed_vowel_idx.or_else(|| unified.iter().rposition(|s| s.is_vowel));

    match idx {
        Some(i) => &unified[i..],
        None => unified,
    }
}

/// Stable hash of a tail's coarse symbols, independent of token order
/// (spec.md §4.7). Tails with no vowel at all (pure-consonant or empty
/// tokens) map to [`EMPTY_TAIL_CLASS`] instead.
pub fn hash_tail(tail: &[crate::modules::unify::UnifiedSymbol]) -> RhymeClassId {
    if tail.is_empty() || !tail.iter().any(|s| s.is_vowel) {
        return EMPTY_TAIL_CLASS;
    }
    hash_symbols(tail.iter().map(|s| s.coarse.as_str()))
}

/// Shared hashing primitive for both basic tail hashes (§4.7) and
/// multisyllable window hashes (§4.8): a pure function of the joined
/// symbol bytes, separator-delimited so adjacent symbols can't alias
/// (e.g. "A","B" vs "AB","").
pub fn hash_symbols<'a>(symbols: impl Iterator<Item = &'a str>) -> RhymeClassId {
    let mut hasher = blake3::Hasher::new();
    for (i, sym) in symbols.enumerate() {
        if i > 0 {
            hasher.update(b"\x1f");
        }
        hasher.update(sym.as_bytes());
    }
    let digest = hasher.finalize();
    let bytes = digest.as_bytes();
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    RhymeClassId(u64::from_le_bytes(buf))
}
