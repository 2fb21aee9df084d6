//! # rhymecore: pronunciation-based rhyme detection core
//!
//! Converts heterogeneous lyric text — English, Devanagari Hindi, romanized
//! Hinglish — into a uniform coarse phoneme space and clusters tokens that
//! rhyme, stably across repeated analyses of the same input.
//!
//! ## Design philosophy
//!
//! - **Factual documentation**: technical decisions are explained with
//!   their reasons and trade-offs, without promotional language.
//! - **Determinism over cleverness**: given the same lyrics, flags,
//!   dictionary snapshot, and oracle snapshot, output is byte-identical.
//! - **Graceful degradation**: a failing collaborator (dictionary, oracle,
//!   cache) never fails the call; it only ever narrows the result and sets
//!   `degraded: true`.
//!
//! ## Quick start
//!
//! ```rust
//! use rhymecore::{analyze, AnalysisFlags};
//!
//! let result = analyze("cat sat on the mat", AnalysisFlags::default());
//! assert_eq!(result.clusters.len(), 1);
//! assert_eq!(result.clusters[0].members.len(), 3);
//! ```

pub mod modules;

use modules::cache;
use modules::dictionary::Dictionary;
use modules::phoneme::english::EnglishPhonemeMapper;
use modules::phoneme::hindi::HindiPhonemeMapper;
use modules::rhyme::basic::{BasicRhymeClusterer, TokenSequence};
use modules::rhyme::multisyllable::MultisyllableClusterer;
use modules::script::ScriptDetector;
use modules::token::{tokenize, Script, Token};
use modules::transliterate::HinglishTransliterator;
use modules::unify::UnifiedPhonemeMapper;

pub use modules::cache::{CacheStore, FilesystemCacheStore, MemoryCacheStore};
pub use modules::dictionary::{FailingDictionary, StaticDictionary};
pub use modules::error::{CacheError, OracleError, PhonemeError, ScriptError};
pub use modules::oracle::{Deadline, MockOracle, NullOracle, Oracle, OracleVerdict};
pub use modules::rhyme::{Cluster, RhymeClassId, WordClusterEntry};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recognized options and their effect (spec.md §6). The whole
/// configuration surface of the pipeline; the CLI mirrors this 1:1.
#[derive(Debug, Clone, Default)]
pub struct AnalysisFlags {
    /// Enable §4.8 multisyllable/multi-word rhyme detection.
    pub multisyllable: bool,
    /// Route Devanagari/Hinglish tokens through §4.1–4.3; when off, every
    /// token is treated as English.
    pub multilingual: bool,
    /// Consult/populate the result cache (§4.9).
    pub cache: bool,
    /// Enable oracle augmentation (§4.10); requires an injected oracle.
    pub oracle: bool,
}

impl AnalysisFlags {
    /// Canonical, order-stable encoding used as part of the cache key
    /// (spec.md §4.9).
    fn canonical_encoding(&self) -> String {
        format!(
            "multisyllable={}&multilingual={}&cache={}&oracle={}",
            self.multisyllable, self.multilingual, self.cache, self.oracle
        )
    }
}

/// The result of [`analyze`] (spec.md §6): token list plus rhyme clusters,
/// with a canonical field order so clients can content-hash it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tokens: Vec<Token>,
    pub clusters: Vec<Cluster>,
    /// Set when a collaborator (dictionary, oracle, cache) degraded rather
    /// than failed the call outright (spec.md §7).
    pub degraded: bool,
}

/// Optional collaborators the caller may inject (spec.md §6). All are
/// optional; absence only ever narrows capability, never breaks the call.
#[derive(Default)]
pub struct Collaborators<'a> {
    pub dictionary: Option<&'a dyn Dictionary>,
    pub cache_store: Option<&'a dyn CacheStore>,
    pub oracle: Option<&'a dyn Oracle>,
    pub oracle_deadline: Option<Duration>,
}

/// Entry point (spec.md §6): `analyze(lyrics, flags) -> AnalysisResult`.
/// Equivalent to `analyze_with(lyrics, flags, Collaborators::default())`.
pub fn analyze(lyrics: &str, flags: AnalysisFlags) -> AnalysisResult {
    analyze_with(lyrics, flags, Collaborators::default())
}

/// Full entry point accepting injected collaborators (spec.md §6).
pub fn analyze_with(lyrics: &str, flags: AnalysisFlags, collaborators: Collaborators<'_>) -> AnalysisResult {
    if lyrics.trim().is_empty() {
        return AnalysisResult { tokens: Vec::new(), clusters: Vec::new(), degraded: false };
    }

    let cache_key = flags
        .cache
        .then(|| cache::cache_key(lyrics, &flags.canonical_encoding(), modules::unify::SCHEMA_VERSION));

    if let (Some(store), Some(key)) = (collaborators.cache_store, cache_key.as_deref()) {
        if let Some(cached) = cache::load::<AnalysisResult>(store, key) {
            tracing::debug!(key, "cache hit");
            return cached;
        }
    }

    let mut degraded = false;
    let mut dictionary_failure_logged = false;

    let raw_tokens = tokenize(lyrics);
    let mut tokens: Vec<Token> = Vec::with_capacity(raw_tokens.len());
    let mut sequences: Vec<(Token, modules::unify::UnifiedSequence)> = Vec::with_capacity(raw_tokens.len());
    let mut low_confidence_words: Vec<String> = Vec::new();

    for (surface, index) in raw_tokens {
        let script = if flags.multilingual {
            ScriptDetector::detect(&surface)
        } else {
            Script::English
        };
        let token = Token::new(&surface, index, script);
        tracing::debug!(word = %surface, ?script, "routed token");

        let unified = match script {
            Script::Devanagari => UnifiedPhonemeMapper::unify(&HindiPhonemeMapper::map(&surface)),
            Script::Hinglish => {
                let deva = HinglishTransliterator::transliterate(&surface);
                UnifiedPhonemeMapper::unify(&HindiPhonemeMapper::map(&deva))
            }
            Script::English => {
                // An absent dictionary is the documented normal mode
                // (letter-fallback G2P); only a dictionary that *was*
                // injected and failed its lookup degrades (spec.md §7:
                // DictionaryUnavailable).
                let mapping = EnglishPhonemeMapper::map(&surface, collaborators.dictionary);
                if mapping.dictionary_failed {
                    degraded = true;
                    if !dictionary_failure_logged {
                        tracing::warn!("injected dictionary failed to load/lookup; degrading to letter-fallback G2P");
                        dictionary_failure_logged = true;
                    }
                }
                if mapping.low_confidence {
                    low_confidence_words.push(token.normalized.clone());
                }
                UnifiedPhonemeMapper::unify(&mapping.sequence)
            }
        };

        tokens.push(token.clone());
        sequences.push((token, unified));
    }

    // Oracle-eligible words (spec.md §4.10): low-confidence English
    // fallback, or an empty tail (pure-consonant/empty token) regardless
    // of script.
    let mut class_overrides: rustc_hash::FxHashMap<usize, modules::rhyme::RhymeClassId> =
        rustc_hash::FxHashMap::default();

    if flags.oracle {
        if let Some(oracle) = collaborators.oracle {
            let mut eligible: Vec<String> = low_confidence_words.clone();
            for (token, unified) in &sequences {
                let tail = modules::rhyme::extract_tail(unified);
                if modules::rhyme::hash_tail(tail) == modules::rhyme::EMPTY_TAIL_CLASS
                    && !eligible.contains(&token.normalized)
                {
                    eligible.push(token.normalized.clone());
                }
            }

            if !eligible.is_empty() {
                // Oracle outputs are cached under a key suffix separate
                // from the whole-result cache (spec.md §4.10), keyed per
                // word so two different lyrics sharing an out-of-
                // vocabulary word reuse the same answer.
                let mut verdicts: rustc_hash::FxHashMap<String, OracleVerdict> =
                    rustc_hash::FxHashMap::default();
                let mut to_query: Vec<String> = Vec::new();

                for word in &eligible {
                    let cached = collaborators.cache_store.and_then(|store| {
                        let key = cache::oracle_cache_key(word, modules::unify::SCHEMA_VERSION);
                        cache::load::<OracleVerdict>(store, &key)
                    });
                    match cached {
                        Some(verdict) => {
                            verdicts.insert(word.clone(), verdict);
                        }
                        None => to_query.push(word.clone()),
                    }
                }

                // Only a failing *live* call skips augmentation; words
                // already resolved from the oracle cache need no call at
                // all, so there's nothing to cancel or fail for them.
                let mut apply = true;
                if !to_query.is_empty() {
                    let deadline =
                        Deadline::after(collaborators.oracle_deadline.unwrap_or(Duration::from_secs(2)));
                    match oracle.classify(&to_query, "", deadline) {
                        Ok(fresh) => {
                            if let Some(store) = collaborators.cache_store {
                                for (word, verdict) in &fresh {
                                    let key = cache::oracle_cache_key(word, modules::unify::SCHEMA_VERSION);
                                    if let Err(err) = cache::store(store, &key, verdict) {
                                        tracing::warn!(%err, "oracle cache write failed");
                                    }
                                }
                            }
                            verdicts.extend(fresh);
                        }
                        Err(err) => {
                            tracing::warn!(%err, "oracle augmentation skipped");
                            degraded = true;
                            apply = false;
                        }
                    }
                }

                if apply {
                    for (token, unified) in sequences.iter_mut() {
                        match verdicts.get(&token.normalized) {
                            Some(OracleVerdict::PhonemeGuess(seq)) => {
                                let guessed = UnifiedPhonemeMapper::unify(seq);
                                let tail = modules::rhyme::extract_tail(&guessed);
                                class_overrides.insert(token.index, class_id_for_tail(tail));
                                *unified = guessed;
                            }
                            Some(OracleVerdict::ExistingClass(class_id)) => {
                                class_overrides.insert(token.index, *class_id);
                            }
                            None => {}
                        }
                    }
                }
            }
        }
    }

    let token_refs: Vec<(&Token, modules::unify::UnifiedSequence)> = sequences
        .iter()
        .map(|(t, u)| (t, u.clone()))
        .collect();

    let basic_inputs: Vec<TokenSequence> = sequences
        .iter()
        .map(|(t, u)| {
            let mut seq = TokenSequence::new(t, u.clone());
            seq.class_override = class_overrides.get(&t.index).copied();
            seq
        })
        .collect();
    let mut clusters = BasicRhymeClusterer::cluster(&basic_inputs);

    if flags.multisyllable {
        let multisyllable_clusters = MultisyllableClusterer::cluster(&token_refs);
        clusters.extend(multisyllable_clusters);
    }

    let result = AnalysisResult { tokens, clusters, degraded };

    if let (Some(store), Some(key)) = (collaborators.cache_store, cache_key.as_deref()) {
        if let Err(err) = cache::store(store, key, &result) {
            tracing::warn!(%err, "cache write failed");
        }
    }

    result
}

/// Derives the rhyme class id for a tail (spec.md §4.10: used when
/// re-entering an oracle phoneme guess into the Unified→Tail→cluster
/// pipeline).
pub fn class_id_for_tail(tail: &[modules::unify::UnifiedSymbol]) -> RhymeClassId {
    modules::rhyme::hash_tail(tail)
}
