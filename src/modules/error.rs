//! Per-module error enums. Each pipeline stage that can legitimately fail in
//! isolation gets its own `thiserror` enum; `analyze()` itself never fails
//! (spec.md §7) — these surface only at the collaborator boundaries that can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty token")]
    EmptyToken,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhonemeError {
    #[error("dictionary unavailable, degraded to letter-fallback G2P")]
    DictionaryUnavailable,
    #[error("no vowel in token, empty tail")]
    NoVowel,
}

#[derive(Error, Debug, Clone)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(String),
    #[error("cache serialization error: {0}")]
    Serialization(String),
    #[error("cache entry corrupted: {0}")]
    Corruption(String),
    #[error("cache schema version mismatch: entry has {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("oracle call exceeded its deadline")]
    Timeout,
    #[error("oracle call failed: {0}")]
    Failed(String),
    #[error("oracle returned a malformed response: {0}")]
    Malformed(String),
}
