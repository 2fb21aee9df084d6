//! OracleAugmentor (spec.md §4.10): an optional, injected collaborator that
//! resolves low-confidence or empty-tail tokens against an external model.
//! Never required; its absence or failure never changes the pipeline's
//! success/failure shape (spec.md §7).

use crate::modules::error::OracleError;
use crate::modules::phoneme::PhonemeSequence;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A cancellable deadline for an oracle call (spec.md §5: "the Oracle call
/// MUST be cancellable via an injected deadline").
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Self { at: Instant::now() + duration }
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// What the oracle resolved a word to: reassignment into an existing
/// rhyme class, or a best-effort phoneme guess that re-enters the
/// Unified→Tail→cluster pipeline (spec.md §4.10). Serializable so it can
/// be persisted in the oracle-output cache under its own key suffix,
/// separate from the whole-`AnalysisResult` cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OracleVerdict {
    ExistingClass(crate::modules::rhyme::RhymeClassId),
    PhonemeGuess(PhonemeSequence),
}

/// Interface the pipeline consumes for oracle augmentation. Implementations
/// must be safe to share across threads (spec.md §5).
pub trait Oracle: Send + Sync {
    /// Classifies a batch of unknown words against a summary of existing
    /// classes, subject to `deadline`. Returns `Err` on timeout, network
    /// failure, or malformed response — all treated identically by the
    /// caller (augmentation skipped, spec.md §7).
    fn classify(
        &self,
        unknown_words: &[String],
        existing_classes_summary: &str,
        deadline: Deadline,
    ) -> Result<FxHashMap<String, OracleVerdict>, OracleError>;
}

/// A no-op oracle: never augments. The default when `flags.oracle` is
/// enabled but no handle was injected.
pub struct NullOracle;

impl Oracle for NullOracle {
    fn classify(
        &self,
        _unknown_words: &[String],
        _existing_classes_summary: &str,
        _deadline: Deadline,
    ) -> Result<FxHashMap<String, OracleVerdict>, OracleError> {
        Ok(FxHashMap::default())
    }
}

/// A scripted oracle for tests: returns a fixed verdict map, optionally
/// simulating a timeout or failure.
pub struct MockOracle {
    pub verdicts: FxHashMap<String, OracleVerdict>,
    pub fail: bool,
}

impl MockOracle {
    pub fn new() -> Self {
        Self { verdicts: FxHashMap::default(), fail: false }
    }

    pub fn with_verdict(mut self, word: &str, verdict: OracleVerdict) -> Self {
        self.verdicts.insert(word.to_lowercase(), verdict);
        self
    }

    pub fn failing() -> Self {
        Self { verdicts: FxHashMap::default(), fail: true }
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for MockOracle {
    fn classify(
        &self,
        unknown_words: &[String],
        _existing_classes_summary: &str,
        deadline: Deadline,
    ) -> Result<FxHashMap<String, OracleVerdict>, OracleError> {
        if self.fail {
            return Err(OracleError::Failed("mock oracle configured to fail".into()));
        }
        if deadline.has_passed() {
            return Err(OracleError::Timeout);
        }
        let mut out = FxHashMap::default();
        for word in unknown_words {
            if let Some(verdict) = self.verdicts.get(&word.to_lowercase()) {
                out.insert(word.clone(), clone_verdict(verdict));
            }
        }
        Ok(out)
    }
}

fn clone_verdict(v: &OracleVerdict) -> OracleVerdict {
    match v {
        OracleVerdict::ExistingClass(id) => OracleVerdict::ExistingClass(*id),
        OracleVerdict::PhonemeGuess(seq) => OracleVerdict::PhonemeGuess(PhonemeSequence::new(
            seq.alphabet,
            seq.phonemes.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::rhyme::RhymeClassId;

    #[test]
    fn null_oracle_never_augments() {
        let oracle = NullOracle;
        let result = oracle
            .classify(&["skrrt".to_string()], "", Deadline::after(Duration::from_secs(1)))
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn mock_oracle_returns_scripted_verdicts() {
        let oracle = MockOracle::new().with_verdict("skrrt", OracleVerdict::ExistingClass(RhymeClassId(42)));
        let result = oracle
            .classify(&["skrrt".to_string()], "", Deadline::after(Duration::from_secs(1)))
            .unwrap();
        assert!(matches!(result.get("skrrt"), Some(OracleVerdict::ExistingClass(RhymeClassId(42)))));
    }

    #[test]
    fn failing_oracle_surfaces_an_error() {
        let oracle = MockOracle::failing();
        let result = oracle.classify(&["x".to_string()], "", Deadline::after(Duration::from_secs(1)));
        assert!(result.is_err());
    }

    #[test]
    fn expired_deadline_is_detected() {
        let deadline = Deadline::after(Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(deadline.has_passed());
    }
}
