//! HindiPhonemeMapper (spec.md §4.3): walks a Devanagari string as a
//! sequence of grapheme clusters (consonant + optional virama + optional
//! vowel mark + optional nasalization) and emits an IPA-style
//! [`PhonemeSequence`]. Never fails; unknown code points are skipped
//! silently.

use super::{Alphabet, Phoneme, PhonemeSequence};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use unicode_normalization::UnicodeNormalization;

const VIRAMA: char = '्';
const ANUSVARA: char = 'ं';
const CANDRABINDU: char = 'ँ';
const VISARGA: char = 'ः';

static CONSONANTS: Lazy<FxHashMap<char, &'static str>> = Lazy::new(|| {
    [
        ('क', "k"), ('ख', "kʰ"), ('ग', "g"), ('घ', "gʰ"), ('ङ', "ŋ"),
        ('च', "tʃ"), ('छ', "tʃʰ"), ('ज', "dʒ"), ('झ', "dʒʰ"), ('ञ', "ɲ"),
        ('ट', "ʈ"), ('ठ', "ʈʰ"), ('ड', "ɖ"), ('ढ', "ɖʰ"), ('ण', "ɳ"),
        ('त', "t̪"), ('थ', "t̪ʰ"), ('द', "d̪"), ('ध', "d̪ʰ"), ('न', "n"),
        ('प', "p"), ('फ', "pʰ"), ('ब', "b"), ('भ', "bʰ"), ('म', "m"),
        ('य', "j"), ('र', "r"), ('ल', "l"), ('व', "v"),
        ('श', "ʃ"), ('ष', "ʂ"), ('स', "s"), ('ह', "h"),
        ('ळ', "ɭ"),
    ]
    .into_iter()
    .collect()
});

static INDEPENDENT_VOWELS: Lazy<FxHashMap<char, &'static str>> = Lazy::new(|| {
    [
        ('अ', "ə"), ('आ', "aː"), ('इ', "i"), ('ई', "iː"), ('उ', "u"),
        ('ऊ', "uː"), ('ऋ', "r̩"), ('ए', "eː"), ('ऐ', "ai"), ('ओ', "oː"),
        ('औ', "au"),
    ]
    .into_iter()
    .collect()
});

static VOWEL_SIGNS: Lazy<FxHashMap<char, &'static str>> = Lazy::new(|| {
    [
        ('ा', "aː"), ('ि', "i"), ('ी', "iː"), ('ु', "u"), ('ू', "uː"),
        ('ृ', "r̩"), ('े', "eː"), ('ै', "ai"), ('ो', "oː"), ('ौ', "au"),
    ]
    .into_iter()
    .collect()
});

pub struct HindiPhonemeMapper;

impl HindiPhonemeMapper {
    /// Maps a Devanagari token to an IPA-style [`PhonemeSequence`].
    pub fn map(deva: &str) -> PhonemeSequence {
        let normalized: String = deva.nfc().collect();
        let mut phonemes: Vec<Phoneme> = Vec::new();
        // Tracks a consonant whose inherent vowel hasn't been resolved yet.
        let mut pending_schwa = false;

        for ch in normalized.chars() {
            if let Some(ipa) = CONSONANTS.get(&ch) {
                if pending_schwa {
                    phonemes.push(Phoneme::vowel("ə", None));
                }
                phonemes.push(Phoneme::consonant(*ipa));
                pending_schwa = true;
                continue;
            }

            if ch == VIRAMA {
                pending_schwa = false;
                continue;
            }

            if let Some(ipa) = VOWEL_SIGNS.get(&ch) {
                phonemes.push(Phoneme::vowel(*ipa, None));
                pending_schwa = false;
                continue;
            }

            if let Some(ipa) = INDEPENDENT_VOWELS.get(&ch) {
                if pending_schwa {
                    phonemes.push(Phoneme::vowel("ə", None));
                }
                phonemes.push(Phoneme::vowel(*ipa, None));
                pending_schwa = false;
                continue;
            }

            if ch == ANUSVARA || ch == CANDRABINDU {
                if pending_schwa {
                    phonemes.push(Phoneme::vowel("ə", None));
                    pending_schwa = false;
                }
                if let Some(last) = phonemes.last_mut() {
                    if last.is_vowel() {
                        last.symbol.push('\u{0303}'); // combining tilde, nasalization
                    }
                }
                continue;
            }

            if ch == VISARGA {
                if pending_schwa {
                    phonemes.push(Phoneme::vowel("ə", None));
                    pending_schwa = false;
                }
                phonemes.push(Phoneme::consonant("h"));
                continue;
            }

            // Unknown code point: skip silently (spec.md §4.3).
        }

        // Schwa-deletion heuristic: the last consonant in a word emits no
        // trailing inherent vowel (spec.md §4.3).
        let _ = pending_schwa;

        PhonemeSequence::new(Alphabet::Ipa, phonemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(seq: &PhonemeSequence) -> Vec<&str> {
        seq.phonemes.iter().map(|p| p.symbol.as_str()).collect()
    }

    #[test]
    fn kaala_produces_consonant_long_vowel_pattern() {
        // काला = क + ा + ल + ा → k aː l aː
        let seq = HindiPhonemeMapper::map("काला");
        assert_eq!(symbols(&seq), vec!["k", "aː", "l", "aː"]);
    }

    #[test]
    fn bare_consonant_word_gets_no_trailing_schwa() {
        // गल = ग (inherent) + ल (final, schwa suppressed) → g ə l
        let seq = HindiPhonemeMapper::map("गल");
        assert_eq!(symbols(&seq), vec!["g", "ə", "l"]);
    }

    #[test]
    fn virama_suppresses_inherent_vowel() {
        // धर्म = ध + र + ् + म → dʰ ə r m
        let seq = HindiPhonemeMapper::map("धर्म");
        assert_eq!(symbols(&seq), vec!["d̪ʰ", "ə", "r", "m"]);
    }

    #[test]
    fn unknown_code_points_are_skipped_not_fatal() {
        let seq = HindiPhonemeMapper::map("क7");
        assert_eq!(seq.phonemes.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let seq = HindiPhonemeMapper::map("");
        assert!(seq.is_empty());
    }
}
