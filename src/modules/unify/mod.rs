//! UnifiedPhonemeMapper (spec.md §4.5): coerces both the dictionary
//! (ARPABET-style) and IPA phoneme streams into a single coarse alphabet so
//! English and Indic tokens become comparable. The tables here are the
//! knobs that tune the false-positive/false-negative trade-off and are
//! fixed at [`SCHEMA_VERSION`] (spec.md §4.5).

use crate::modules::phoneme::{Alphabet, Phoneme, PhonemeSequence};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Schema version for the coarse-alphabet tables. Reused as part of the
/// cache key (spec.md §4.9) so a future table revision invalidates old
/// cache entries automatically.
pub const SCHEMA_VERSION: u32 = 1;

/// One symbol of a [`UnifiedSequence`]: a coarse vowel or consonant class,
/// with the source phoneme's stress carried as a parallel annotation
/// (spec.md §4.5: "Stress markers are preserved as a parallel annotation,
/// not as part of the symbol").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedSymbol {
    pub coarse: String,
    pub is_vowel: bool,
    pub stress: Option<u8>,
}

pub type UnifiedSequence = Vec<UnifiedSymbol>;

static DICTIONARY_TO_COARSE: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("AA", "A"), ("AE", "A"), ("AH", "A"), ("AO", "A"),
        ("EH", "E"), ("ER", "E"), ("EY", "E"),
        ("IH", "I"), ("IY", "I"),
        ("OW", "O"), ("OY", "O"), ("UH", "U"), ("UW", "U"),
        // AW/AY handled specially below to retain their glide tail.
        ("R", "R"), ("L", "L"), ("M", "M"), ("N", "N"), ("NG", "NG"),
        ("S", "S"), ("Z", "Z"), ("SH", "SH"), ("ZH", "ZH"),
        ("F", "F"), ("V", "V"), ("TH", "TH"), ("DH", "DH"),
        ("P", "P"), ("B", "B"), ("T", "T"), ("D", "D"),
        ("K", "K"), ("G", "G"), ("CH", "CH"), ("JH", "JH"),
        ("Y", "Y"), ("W", "W"), ("HH", "HH"), ("KW", "KW"),
    ]
    .into_iter()
    .collect()
});

static IPA_VOWEL_TO_COARSE: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("a", "A"), ("aː", "A"), ("ə", "A"), ("ɑ", "A"),
        ("e", "E"), ("eː", "E"), ("ɛ", "E"),
        ("i", "I"), ("iː", "I"), ("ɪ", "I"),
        ("o", "O"), ("oː", "O"), ("ɔ", "O"),
        ("u", "U"), ("uː", "U"), ("ʊ", "U"),
        ("r̩", "I"), // vocalic r: no coarse class of its own, approximated.
    ]
    .into_iter()
    .collect()
});

static IPA_CONSONANT_TO_COARSE: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("k", "K"), ("kʰ", "K"), ("g", "G"), ("gʰ", "G"), ("ŋ", "NG"),
        ("tʃ", "CH"), ("tʃʰ", "CH"), ("dʒ", "JH"), ("dʒʰ", "JH"), ("ɲ", "N"),
        ("ʈ", "T"), ("ʈʰ", "T"), ("ɖ", "D"), ("ɖʰ", "D"), ("ɳ", "N"),
        ("t̪", "T"), ("t̪ʰ", "T"), ("d̪", "D"), ("d̪ʰ", "D"), ("n", "N"),
        ("p", "P"), ("pʰ", "P"), ("b", "B"), ("bʰ", "B"), ("m", "M"),
        ("j", "Y"), ("r", "R"), ("l", "L"), ("v", "V"),
        ("ʃ", "SH"), ("ʂ", "SH"), ("s", "S"), ("h", "HH"), ("ɭ", "L"),
    ]
    .into_iter()
    .collect()
});

pub struct UnifiedPhonemeMapper;

impl UnifiedPhonemeMapper {
    pub fn unify(seq: &PhonemeSequence) -> UnifiedSequence {
        match seq.alphabet {
            Alphabet::Dictionary => seq.phonemes.iter().flat_map(Self::unify_dictionary).collect(),
            Alphabet::Ipa => seq.phonemes.iter().flat_map(Self::unify_ipa).collect(),
        }
    }

    fn unify_dictionary(p: &Phoneme) -> Vec<UnifiedSymbol> {
        // AW/AY retain a glide tail for better discrimination (spec.md §4.5).
        if p.symbol == "AW" {
            return vec![
                UnifiedSymbol { coarse: "A".into(), is_vowel: true, stress: p.stress },
                UnifiedSymbol { coarse: "W".into(), is_vowel: false, stress: None },
            ];
        }
        if p.symbol == "AY" {
            return vec![
                UnifiedSymbol { coarse: "A".into(), is_vowel: true, stress: p.stress },
                UnifiedSymbol { coarse: "Y".into(), is_vowel: false, stress: None },
            ];
        }

        let coarse = DICTIONARY_TO_COARSE
            .get(p.symbol.as_str())
            .copied()
            .unwrap_or(p.symbol.as_str());
        vec![UnifiedSymbol {
            coarse: coarse.to_string(),
            is_vowel: p.is_vowel(),
            stress: p.stress,
        }]
    }

    fn unify_ipa(p: &Phoneme) -> Vec<UnifiedSymbol> {
        // Strip combining nasalization (U+0303) — nasalization drops in the
        // coarse alphabet (spec.md §4.5).
        let stripped: String = p.symbol.chars().filter(|c| *c != '\u{0303}').collect();

        if stripped == "ai" {
            return vec![
                UnifiedSymbol { coarse: "A".into(), is_vowel: true, stress: p.stress },
                UnifiedSymbol { coarse: "Y".into(), is_vowel: false, stress: None },
            ];
        }
        if stripped == "au" {
            return vec![
                UnifiedSymbol { coarse: "A".into(), is_vowel: true, stress: p.stress },
                UnifiedSymbol { coarse: "W".into(), is_vowel: false, stress: None },
            ];
        }

        if p.is_vowel() {
            let coarse = IPA_VOWEL_TO_COARSE.get(stripped.as_str()).copied().unwrap_or("A");
            return vec![UnifiedSymbol {
                coarse: coarse.to_string(),
                is_vowel: true,
                stress: p.stress,
            }];
        }

        let coarse = IPA_CONSONANT_TO_COARSE
            .get(stripped.as_str())
            .copied()
            .unwrap_or(stripped.as_str());
        vec![UnifiedSymbol {
            coarse: coarse.to_string(),
            is_vowel: false,
            stress: None,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::phoneme::hindi::HindiPhonemeMapper;

    #[test]
    fn dictionary_vowels_collapse_to_five_classes() {
        let seq = PhonemeSequence::new(
            Alphabet::Dictionary,
            vec![Phoneme::vowel("AA", None), Phoneme::vowel("AE", Some(1))],
        );
        let unified = UnifiedPhonemeMapper::unify(&seq);
        assert_eq!(unified[0].coarse, "A");
        assert_eq!(unified[1].coarse, "A");
        assert_eq!(unified[1].stress, Some(1));
    }

    #[test]
    fn aw_ay_retain_glide_tail() {
        let seq = PhonemeSequence::new(Alphabet::Dictionary, vec![Phoneme::vowel("AY", Some(1))]);
        let unified = UnifiedPhonemeMapper::unify(&seq);
        assert_eq!(unified.len(), 2);
        assert_eq!(unified[0].coarse, "A");
        assert_eq!(unified[1].coarse, "Y");
        assert!(!unified[1].is_vowel);
    }

    #[test]
    fn ipa_aspiration_and_retroflexion_collapse() {
        let seq = HindiPhonemeMapper::map("धर्म");
        let unified = UnifiedPhonemeMapper::unify(&seq);
        let coarse: Vec<&str> = unified.iter().map(|u| u.coarse.as_str()).collect();
        assert_eq!(coarse, vec!["D", "A", "R", "M"]);
    }

    #[test]
    fn nasalization_drops_from_coarse_symbol() {
        let seq = PhonemeSequence::new(
            Alphabet::Ipa,
            vec![Phoneme::vowel("aː\u{0303}", None)],
        );
        let unified = UnifiedPhonemeMapper::unify(&seq);
        assert_eq!(unified[0].coarse, "A");
    }
}
