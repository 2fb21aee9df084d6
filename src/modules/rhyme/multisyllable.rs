//! MultisyllableClusterer (spec.md §4.8): syllabifies each token's unified
//! sequence, slides 2- and 3-syllable windows across the whole lyrics
//! stream (crossing word boundaries), and groups windows that recur.
//!
//! Character spans are recovered by allocating each token's surface length
//! proportionally across its syllables in unified-symbol order; the
//! phoneme mappers don't (yet) track exact per-symbol source offsets, so
//! this is an approximation rather than a byte-exact recovery. Good enough
//! to distinguish "narrower than the full surface" per spec.md §4.8.4.

use super::{hash_symbols, Cluster, RhymeClassId, WordClusterEntry};
use crate::modules::token::Token;
use crate::modules::unify::UnifiedSequence;
use rustc_hash::FxHashMap;

/// One syllable of a token: its coarse symbols (onset + nucleus + coda, in
/// order) and the character span of the surface it approximately covers.
#[derive(Debug, Clone)]
struct Syllable {
    symbols: Vec<String>,
    char_span: (usize, usize),
}

/// Splits a [`UnifiedSequence`] into syllables (spec.md §4.8.1): maximal
/// consonant runs between vowels are split so the consonant adjacent to the
/// following vowel becomes its onset, and any earlier consonants in the run
/// become the coda of the previous syllable. Leading consonants before the
/// first vowel become the first syllable's onset; trailing consonants after
/// the last vowel become the last syllable's coda.
fn syllabify(unified: &UnifiedSequence) -> Vec<Vec<usize>> {
    let vowel_indices: Vec<usize> = unified
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_vowel)
        .map(|(i, _)| i)
        .collect();

    if vowel_indices.is_empty() {
        // No vowel at all: treat the whole token as one syllable so it
        // still contributes to windows (rare: pure-consonant tokens).
        return if unified.is_empty() {
            Vec::new()
        } else {
            vec![(0..unified.len()).collect()]
        };
    }

    let mut syllables: Vec<Vec<usize>> = Vec::with_capacity(vowel_indices.len());

    for (si, &vowel_idx) in vowel_indices.iter().enumerate() {
        let run_start = if si == 0 {
            0
        } else {
            vowel_indices[si - 1] + 1
        };
        let run_len = vowel_idx.saturating_sub(run_start);

        // CV preference: the single consonant directly adjacent to this
        // vowel is its onset; anything earlier in the run is coda of the
        // previous syllable (already appended below for si > 0, or
        // dropped as word-initial onset-of-first-syllable for si == 0).
        let onset_start = if run_len > 0 { vowel_idx - 1 } else { vowel_idx };

        if si > 0 && onset_start > run_start {
            if let Some(prev) = syllables.last_mut() {
                prev.extend(run_start..onset_start);
            }
        }

        let mut current: Vec<usize> = (onset_start.max(run_start)..=vowel_idx).collect();
        if si == 0 {
            // word-initial onset: everything before the first vowel.
            current = (0..=vowel_idx).collect();
        }
        syllables.push(current);
    }

    // Trailing consonants after the last vowel become the last syllable's coda.
    let last_vowel = *vowel_indices.last().unwrap();
    if last_vowel + 1 < unified.len() {
        if let Some(last) = syllables.last_mut() {
            last.extend((last_vowel + 1)..unified.len());
        }
    }

    syllables
}

/// Builds [`Syllable`] values (symbols + approximate char span) for one
/// token's unified sequence.
fn token_syllables(unified: &UnifiedSequence, surface_char_len: usize) -> Vec<Syllable> {
    let index_groups = syllabify(unified);
    if index_groups.is_empty() || unified.is_empty() {
        return Vec::new();
    }

    let total_phonemes = unified.len();
    index_groups
        .into_iter()
        .map(|indices| {
            let symbols = indices
                .iter()
                .map(|&i| unified[i].coarse.clone())
                .collect();
            let start_phoneme = *indices.first().unwrap();
            let end_phoneme = *indices.last().unwrap() + 1;
            let char_start = (start_phoneme * surface_char_len) / total_phonemes.max(1);
            let char_end = ((end_phoneme * surface_char_len) / total_phonemes.max(1)).max(char_start + 1);
            Syllable {
                symbols,
                char_span: (char_start, char_end.min(surface_char_len)),
            }
        })
        .collect()
}

/// A syllable tagged with the word it came from, for the global sliding
/// window (spec.md §4.8.2: windows cross word boundaries).
struct StreamSyllable<'a> {
    word_index: usize,
    surface: &'a str,
    syllable: Syllable,
}

pub struct MultisyllableClusterer;

impl MultisyllableClusterer {
    /// Input: tokens paired with their unified sequences, in `word_index`
    /// order. Output: multisyllable classes (spec.md §4.8.3), emitted in
    /// addition to whatever [`super::basic::BasicRhymeClusterer`] produces.
    pub fn cluster(tokens: &[(&Token, UnifiedSequence)]) -> Vec<Cluster> {
        let mut stream: Vec<StreamSyllable> = Vec::new();
        for (token, unified) in tokens {
            let surface_len = token.surface.chars().count();
            for syllable in token_syllables(unified, surface_len) {
                stream.push(StreamSyllable {
                    word_index: token.index,
                    surface: &token.surface,
                    syllable,
                });
            }
        }

        let mut by_hash: FxHashMap<RhymeClassId, Vec<usize>> = FxHashMap::default();

        for window_len in [2usize, 3usize] {
            if stream.len() < window_len {
                continue;
            }
            for start in 0..=(stream.len() - window_len) {
                let window = &stream[start..start + window_len];
                let symbols: Vec<&str> = window
                    .iter()
                    .flat_map(|s| s.syllable.symbols.iter().map(String::as_str))
                    .collect();
                let hash = hash_symbols(symbols.into_iter());
                by_hash.entry(hash).or_default().push(start);
            }
        }

        let mut clusters: Vec<Cluster> = Vec::new();
        for (class_id, starts) in by_hash {
            // `starts.len() >= 2` is the spec.md §4.8.3 threshold: at least
            // two *occurrences* of the window, not two distinct words. A
            // window that recurs twice inside a single multisyllable word
            // (an internal rhyme) clears this the same as one that recurs
            // across two different words.
            if starts.len() < 2 {
                continue;
            }

            // Each occurrence gets its own WordClusterEntry per word it
            // touches; spans are merged only *within* one occurrence
            // (a window crossing a word boundary contributes one entry per
            // word for that occurrence). Occurrences are never merged into
            // each other here, so a word with two separate matching spans
            // contributes two distinct entries instead of being silently
            // collapsed into one.
            let mut members: Vec<WordClusterEntry> = Vec::new();
            for &start in &starts {
                // Determine this occurrence's window length by checking
                // which of 2/3 consecutive-from-start slices hashed here.
                for window_len in [2usize, 3usize] {
                    if start + window_len > stream.len() {
                        continue;
                    }
                    let window = &stream[start..start + window_len];
                    let symbols: Vec<&str> = window
                        .iter()
                        .flat_map(|s| s.syllable.symbols.iter().map(String::as_str))
                        .collect();
                    if hash_symbols(symbols.into_iter()) != class_id {
                        continue;
                    }

                    let mut per_word: FxHashMap<usize, (usize, usize, &str)> = FxHashMap::default();
                    for s in window {
                        let entry = per_word
                            .entry(s.word_index)
                            .or_insert((s.syllable.char_span.0, s.syllable.char_span.1, s.surface));
                        entry.0 = entry.0.min(s.syllable.char_span.0);
                        entry.1 = entry.1.max(s.syllable.char_span.1);
                    }
                    for (word_index, (start_char, end_char, surface)) in per_word {
                        members.push(WordClusterEntry {
                            word_index,
                            surface: surface.to_string(),
                            class_id,
                            spans: vec![(start_char, end_char)],
                        });
                    }
                }
            }

            members.sort_by_key(|m| (m.word_index, m.spans[0].0));
            if members.len() >= 2 {
                clusters.push(Cluster { class_id, members });
            }
        }

        clusters.sort_by_key(|c| c.members.first().map(|m| m.word_index).unwrap_or(usize::MAX));
        clusters
    }
}
