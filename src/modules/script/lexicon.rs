//! Fixed data tables for [`super::ScriptDetector`] and the Hinglish
//! transliterator. Pinned per spec.md §9 Open Questions: "treat the
//! specific contents as a configurable data file and pin the one shipped
//! with the source." Not claimed exhaustive — sized to spec.md's
//! "curated Hinglish lexicon of ≈40 common items".

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Common romanized Hinglish words, lowercase. Membership alone is
/// sufficient for [`super::ScriptDetector`] to classify a token as
/// Hinglish (spec.md §4.1).
pub static HINGLISH_LEXICON: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "tera", "mera", "tum", "hum", "kya", "kyun", "kaise", "kahan", "yaar",
        "bhai", "behan", "dost", "pyaar", "ishq", "dil", "jaan", "zindagi",
        "duniya", "khushi", "gham", "sapna", "raat", "din", "subah", "shaam",
        "chal", "chalo", "aaja", "aana", "jaana", "dekh", "dekho", "suno",
        "bolo", "nahi", "haan", "theek", "accha", "bura", "pyara", "sona",
        "paisa", "ghar", "shaadi", "pagal", "mast", "zara", "abhi", "phir",
    ]
    .into_iter()
    .collect()
});

/// Digraph/trigraph cues: a token containing at least two of these is
/// treated as Hinglish per spec.md §4.1.
pub static HINGLISH_CUES: &[&str] = &[
    "aa", "ee", "oo", "bh", "dh", "gh", "kh", "ph", "th", "ch", "sh", "yaa",
    "iya", "ji", "bhai", "yaar",
];

/// Suffixes that, on their own, mark a token as Hinglish per spec.md §4.1.
pub static HINGLISH_SUFFIXES: &[&str] =
    &["aa", "ee", "oo", "ai", "ya", "iya", "aan", "aar"];

/// Ordered longest-match-first digraph/trigraph → Devanagari table used by
/// [`crate::modules::transliterate::HinglishTransliterator`]. Order matters:
/// entries are matched longest-first via `aho_corasick`'s leftmost-longest
/// mode, so more specific multigraphs must be tried before their prefixes.
///
/// Consonant entries emit the *inherent* consonant cluster (bare consonant,
/// implicit schwa handled downstream by the Hindi phoneme mapper); vowel
/// entries emit the independent vowel letter. The transliterator itself
/// decides, based on whether the previous emitted unit was a consonant,
/// whether a vowel digraph should instead emit a dependent vowel sign.
pub static DIGRAPH_TABLE: &[(&str, &str)] = &[
    ("bh", "भ"),
    ("dh", "ध"),
    ("gh", "घ"),
    ("kh", "ख"),
    ("ph", "फ"),
    ("th", "थ"),
    ("ch", "च"),
    ("sh", "श"),
    ("ny", "ञ"),
    ("ng", "ङ"),
    ("aa", "आ"),
    ("ee", "ई"),
    ("oo", "ऊ"),
    ("ai", "ऐ"),
    ("au", "औ"),
    ("a", "अ"),
    ("i", "इ"),
    ("u", "उ"),
    ("e", "ए"),
    ("o", "ओ"),
    ("k", "क"),
    ("g", "ग"),
    ("c", "च"),
    ("j", "ज"),
    ("t", "त"),
    ("d", "द"),
    ("n", "न"),
    ("p", "प"),
    ("b", "ब"),
    ("m", "म"),
    ("y", "य"),
    ("r", "र"),
    ("l", "ल"),
    ("v", "व"),
    ("w", "व"),
    ("s", "स"),
    ("h", "ह"),
];

/// Dependent vowel-sign forms, used when a vowel digraph follows a
/// consonant instead of starting a fresh syllable.
pub static VOWEL_SIGN_TABLE: &[(&str, &str)] = &[
    ("aa", "ा"),
    ("ee", "ी"),
    ("oo", "ू"),
    ("ai", "ै"),
    ("au", "ौ"),
    ("i", "ि"),
    ("u", "ु"),
    ("e", "े"),
    ("o", "ो"),
];

/// Closed lexicon of common Hinglish → Devanagari forms, consulted before
/// the multigraph rewrite (spec.md §4.2).
pub static HINGLISH_TO_DEVANAGARI: Lazy<rustc_hash::FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| {
        [
            ("tera", "तेरा"),
            ("mera", "मेरा"),
            ("tum", "तुम"),
            ("hum", "हम"),
            ("kya", "क्या"),
            ("kyun", "क्यों"),
            ("kaise", "कैसे"),
            ("kahan", "कहाँ"),
            ("yaar", "यार"),
            ("bhai", "भाई"),
            ("behan", "बहन"),
            ("dost", "दोस्त"),
            ("pyaar", "प्यार"),
            ("ishq", "इश्क़"),
            ("dil", "दिल"),
            ("jaan", "जान"),
            ("zindagi", "ज़िंदगी"),
            ("duniya", "दुनिया"),
            ("khushi", "ख़ुशी"),
            ("gham", "ग़म"),
            ("sapna", "सपना"),
            ("raat", "रात"),
            ("din", "दिन"),
            ("subah", "सुबह"),
            ("shaam", "शाम"),
            ("chal", "चल"),
            ("chalo", "चलो"),
            ("aaja", "आजा"),
            ("aana", "आना"),
            ("jaana", "जाना"),
            ("dekh", "देख"),
            ("dekho", "देखो"),
            ("suno", "सुनो"),
            ("bolo", "बोलो"),
            ("nahi", "नहीं"),
            ("haan", "हाँ"),
            ("theek", "ठीक"),
            ("accha", "अच्छा"),
            ("bura", "बुरा"),
            ("pyara", "प्यारा"),
            ("sona", "सोना"),
            ("paisa", "पैसा"),
            ("ghar", "घर"),
            ("shaadi", "शादी"),
            ("pagal", "पागल"),
            ("mast", "मस्त"),
            ("zara", "ज़रा"),
            ("abhi", "अभी"),
            ("phir", "फिर"),
        ]
        .into_iter()
        .collect()
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_has_roughly_forty_entries() {
        assert!(HINGLISH_LEXICON.len() >= 30 && HINGLISH_LEXICON.len() <= 60);
    }

    #[test]
    fn lexicon_lookup_matches_closed_table() {
        for word in HINGLISH_LEXICON.iter() {
            assert!(
                HINGLISH_TO_DEVANAGARI.contains_key(word),
                "lexicon word {word} missing a Devanagari form"
            );
        }
    }
}
