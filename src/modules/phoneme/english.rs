//! EnglishPhonemeMapper (spec.md §4.4): consults an injected dictionary,
//! falling back to a deterministic letter-based G2P rewriter on miss.

use super::{Alphabet, Phoneme, PhonemeSequence};
use crate::modules::dictionary::Dictionary;

/// Result of mapping an English token: the chosen pronunciation, whether it
/// came from the dictionary (`low_confidence = false`) or the
/// letter-fallback G2P (`low_confidence = true` — the latter is what
/// triggers oracle augmentation eligibility, spec.md §4.10), and whether an
/// *injected* dictionary actually failed its lookup rather than just
/// missing the word (`dictionary_failed`; spec.md §7's
/// `DictionaryUnavailable`).
pub struct EnglishMapping {
    pub sequence: PhonemeSequence,
    pub low_confidence: bool,
    pub dictionary_failed: bool,
}

pub struct EnglishPhonemeMapper;

impl EnglishPhonemeMapper {
    pub fn map(word: &str, dictionary: Option<&dyn Dictionary>) -> EnglishMapping {
        let lower = word.to_lowercase();

        if let Some(dict) = dictionary {
            match dict.lookup(&lower) {
                Ok(Some(mut pronunciations)) if !pronunciations.is_empty() => {
                    return EnglishMapping {
                        sequence: pronunciations.remove(0),
                        low_confidence: false,
                        dictionary_failed: false,
                    };
                }
                Ok(_) => {
                    // Consulted the dictionary, word just isn't in it.
                }
                Err(_) => {
                    return EnglishMapping {
                        sequence: letter_fallback_g2p(&lower),
                        low_confidence: true,
                        dictionary_failed: true,
                    };
                }
            }
        }

        EnglishMapping {
            sequence: letter_fallback_g2p(&lower),
            low_confidence: true,
            dictionary_failed: false,
        }
    }
}

/// Deterministic letter-fallback G2P (spec.md §4.4): vowel groups,
/// `sh/ch/th/ph/ng` digraphs, a silent-trailing-`e` heuristic, doubled-
/// consonant normalization, first vowel marked as primary stress.
fn letter_fallback_g2p(word: &str) -> PhonemeSequence {
    let letters: Vec<char> = word.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return PhonemeSequence::new(Alphabet::Dictionary, Vec::new());
    }

    // Doubled-consonant normalization: collapse any run of the same
    // non-vowel letter to one occurrence before scanning.
    let mut collapsed: Vec<char> = Vec::with_capacity(letters.len());
    for &ch in &letters {
        let is_doubled_consonant = !is_vowel_letter(ch)
            && collapsed.last() == Some(&ch);
        if !is_doubled_consonant {
            collapsed.push(ch);
        }
    }

    // Silent trailing `e`: drop it if preceded by a consonant and there's
    // another vowel earlier in the word.
    if collapsed.len() > 2 && collapsed[collapsed.len() - 1] == 'e' {
        let has_earlier_vowel = collapsed[..collapsed.len() - 1].iter().any(|c| is_vowel_letter(*c));
        let prev_is_consonant = !is_vowel_letter(collapsed[collapsed.len() - 2]);
        if has_earlier_vowel && prev_is_consonant {
            collapsed.pop();
        }
    }

    let mut out: Vec<Phoneme> = Vec::new();
    let mut i = 0;
    while i < collapsed.len() {
        let rest = &collapsed[i..];
        if let Some((len, symbol, is_vowel)) = match_digraph(rest) {
            if is_vowel {
                out.push(Phoneme::vowel(symbol, None));
            } else {
                out.push(Phoneme::consonant(symbol));
            }
            i += len;
            continue;
        }

        let ch = collapsed[i];
        if is_vowel_letter(ch) {
            out.push(Phoneme::vowel(single_vowel_symbol(ch), None));
        } else if ch == 'y' && i > 0 {
            // Word-medial/final `y` acts as a vowel (e.g. "mary", "happy");
            // word-initial `y` is a consonant (e.g. "yes").
            out.push(Phoneme::vowel("IY", None));
        } else {
            for sym in single_consonant_symbols(ch) {
                out.push(Phoneme::consonant(sym));
            }
        }
        i += 1;
    }

    // Mark the first vowel as primary stress (spec.md §4.4); all other
    // vowels carry no stress digit.
    if let Some(first_vowel) = out.iter_mut().find(|p| p.is_vowel()) {
        first_vowel.stress = Some(1);
    }

    PhonemeSequence::new(Alphabet::Dictionary, out)
}

fn is_vowel_letter(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Matches a known multi-letter vowel group or consonant digraph at the
/// start of `rest`, longest first. Returns `(letters_consumed, dictionary
/// symbol, is_vowel)`.
fn match_digraph(rest: &[char]) -> Option<(usize, &'static str, bool)> {
    const DIGRAPHS: &[(&str, &str, bool)] = &[
        ("igh", "AY", true),
        ("ai", "EY", true),
        ("ay", "EY", true),
        ("ee", "IY", true),
        ("ea", "IY", true),
        ("oo", "UW", true),
        ("ou", "AW", true),
        ("ow", "AW", true),
        ("oi", "OY", true),
        ("oy", "OY", true),
        ("sh", "SH", false),
        ("ch", "CH", false),
        ("th", "TH", false),
        ("ph", "F", false),
        ("ng", "NG", false),
        ("wh", "W", false),
        ("qu", "KW", false),
        ("ck", "K", false),
    ];

    let s: String = rest.iter().take(4).collect();
    for (pattern, symbol, is_vowel) in DIGRAPHS {
        if s.starts_with(pattern) {
            return Some((pattern.chars().count(), symbol, *is_vowel));
        }
    }
    None
}

fn single_vowel_symbol(ch: char) -> &'static str {
    match ch {
        'a' => "AE",
        'e' => "EH",
        'i' => "IH",
        'o' => "AA",
        'u' => "AH",
        _ => unreachable!("single_vowel_symbol called on non-vowel"),
    }
}

fn single_consonant_symbols(ch: char) -> Vec<&'static str> {
    match ch {
        'b' => vec!["B"],
        'c' => vec!["K"],
        'd' => vec!["D"],
        'f' => vec!["F"],
        'g' => vec!["G"],
        'h' => vec!["HH"],
        'j' => vec!["JH"],
        'k' => vec!["K"],
        'l' => vec!["L"],
        'm' => vec!["M"],
        'n' => vec!["N"],
        'p' => vec!["P"],
        'q' => vec!["K"],
        'r' => vec!["R"],
        's' => vec!["S"],
        't' => vec!["T"],
        'v' => vec!["V"],
        'w' => vec!["W"],
        'x' => vec!["K", "S"],
        'y' => vec!["Y"], // word-initial only; see call site.
        'z' => vec!["Z"],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::dictionary::{FailingDictionary, StaticDictionary};

    #[test]
    fn dictionary_hit_is_not_low_confidence() {
        let dict = StaticDictionary::new().with_entry("cat", &["K", "AE1", "T"]);
        let mapping = EnglishPhonemeMapper::map("cat", Some(&dict));
        assert!(!mapping.low_confidence);
        assert_eq!(mapping.sequence.phonemes.len(), 3);
    }

    #[test]
    fn dictionary_miss_falls_back_and_flags_low_confidence() {
        let dict = StaticDictionary::new().with_entry("cat", &["K", "AE1", "T"]);
        let mapping = EnglishPhonemeMapper::map("skrrt", Some(&dict));
        assert!(mapping.low_confidence);
        assert!(!mapping.sequence.is_empty());
    }

    #[test]
    fn no_dictionary_always_falls_back() {
        let mapping = EnglishPhonemeMapper::map("star", None);
        assert!(mapping.low_confidence);
        assert!(!mapping.dictionary_failed);
    }

    #[test]
    fn failing_dictionary_falls_back_and_flags_the_failure() {
        let dict = FailingDictionary;
        let mapping = EnglishPhonemeMapper::map("cat", Some(&dict));
        assert!(mapping.low_confidence);
        assert!(mapping.dictionary_failed);
        assert!(!mapping.sequence.is_empty());
    }

    #[test]
    fn fallback_marks_first_vowel_as_primary_stress() {
        let mapping = EnglishPhonemeMapper::map("bat", None);
        let stress_idx = mapping.sequence.primary_stress_index();
        assert!(stress_idx.is_some());
    }

    #[test]
    fn digraph_sh_produces_single_consonant_symbol() {
        let mapping = EnglishPhonemeMapper::map("fish", None);
        let symbols: Vec<&str> = mapping
            .sequence
            .phonemes
            .iter()
            .map(|p| p.symbol.as_str())
            .collect();
        assert!(symbols.contains(&"SH"));
    }

    #[test]
    fn never_panics_on_empty_or_non_alpha() {
        let mapping = EnglishPhonemeMapper::map("", None);
        assert!(mapping.sequence.is_empty());
        let mapping = EnglishPhonemeMapper::map("123", None);
        assert!(mapping.sequence.is_empty());
    }
}
