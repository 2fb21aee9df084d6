//! Token type and the tokenization boundary contract (spec.md §3, §6).

use serde::{Deserialize, Serialize};

/// Which script-specific pipeline a token is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Devanagari,
    Hinglish,
    English,
}

/// An immutable, position-tagged token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original surface text, case preserved.
    pub surface: String,
    /// Zero-based position in tokenization order.
    pub index: usize,
    pub script: Script,
    /// Lowercased surface, used internally for lookups.
    pub normalized: String,
}

impl Token {
    pub fn new(surface: &str, index: usize, script: Script) -> Self {
        Self {
            surface: surface.to_string(),
            index,
            script,
            normalized: surface.to_lowercase(),
        }
    }
}

/// Splits `lyrics` on whitespace and punctuation, preserving surface case and
/// assigning `word_index` left-to-right starting at 0. Does not assign a
/// script — that's [`crate::modules::script::ScriptDetector`]'s job.
///
/// A "tokenizable character" is anything that is not whitespace and not
/// ASCII punctuation; Devanagari code points and combining marks are always
/// tokenizable so multilingual input survives this split.
pub fn tokenize(lyrics: &str) -> Vec<(String, usize)> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<(String, usize)>| {
        if !current.is_empty() {
            tokens.push((std::mem::take(current), tokens.len()));
        }
    };

    for ch in lyrics.chars() {
        if is_word_char(ch) {
            current.push(ch);
        } else {
            flush(&mut current, &mut tokens);
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn is_word_char(ch: char) -> bool {
    if ch.is_whitespace() {
        return false;
    }
    if ch.is_ascii_punctuation() {
        return false;
    }
    true
}
