//! ScriptDetector (spec.md §4.1): classifies a surface token as Devanagari,
//! Hinglish, or English so the pipeline can route it to the right phoneme
//! mapper.

pub mod lexicon;

use crate::modules::token::Script;
use lexicon::{HINGLISH_CUES, HINGLISH_LEXICON, HINGLISH_SUFFIXES};

/// Inclusive Devanagari Unicode block (spec.md §4.1).
const DEVANAGARI_START: u32 = 0x0900;
const DEVANAGARI_END: u32 = 0x097F;

pub struct ScriptDetector;

impl ScriptDetector {
    /// Classifies `surface` following the rule order in spec.md §4.1.
    /// Never fails; falls back to `English` when uncertain.
    pub fn detect(surface: &str) -> Script {
        if surface
            .chars()
            .any(|c| (DEVANAGARI_START..=DEVANAGARI_END).contains(&(c as u32)))
        {
            return Script::Devanagari;
        }

        if surface.chars().all(|c| c.is_ascii_alphabetic()) && Self::looks_hinglish(surface) {
            return Script::Hinglish;
        }

        Script::English
    }

    fn looks_hinglish(surface: &str) -> bool {
        let lower = surface.to_lowercase();

        if HINGLISH_LEXICON.contains(lower.as_str()) {
            return true;
        }

        let cue_hits = HINGLISH_CUES.iter().filter(|cue| lower.contains(*cue)).count();
        if cue_hits >= 2 {
            return true;
        }

        HINGLISH_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
    }
}
