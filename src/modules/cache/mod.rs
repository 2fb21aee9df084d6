//! ResultCache (spec.md §4.9): content-addressed key→blob cache. Keys mix
//! the lyrics, the canonical flag encoding, and the unify schema version so
//! a future table revision invalidates stale entries automatically.

use crate::modules::error::CacheError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Current on-disk schema version for cache entries (spec.md §6:
/// "Schema includes a `version` integer; on version mismatch, entries are
/// treated as missing").
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// A versioned envelope around the cached payload, as read back.
#[derive(Deserialize)]
struct CacheEntry<T> {
    version: u32,
    payload: T,
}

/// A versioned envelope around the cached payload, as written: borrows
/// rather than takes ownership, since writers usually just computed the
/// value and don't want to clone it to cache it.
#[derive(Serialize)]
struct CacheEntryRef<'a, T> {
    version: u32,
    payload: &'a T,
}

/// Derives the content-addressed cache key (spec.md §4.9): a hash of
/// `lyrics || "\x00" || feature_flags_canonical_encoding || "\x00" ||
/// schema_version`.
pub fn cache_key(lyrics: &str, flags_canonical: &str, schema_version: u32) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(lyrics.as_bytes());
    hasher.update(b"\x00");
    hasher.update(flags_canonical.as_bytes());
    hasher.update(b"\x00");
    hasher.update(&schema_version.to_le_bytes());
    hex::encode(hasher.finalize().as_bytes())
}

/// Derives the cache key for one word's oracle verdict (spec.md §4.10:
/// "Oracle outputs are cached with a separate key suffix to preserve
/// determinism across runs"). Namespaced with a distinct leading tag so it
/// can never collide with a [`cache_key`] entry in the same store, and
/// keyed only on the word (not the whole lyrics) so two different lyrics
/// sharing an out-of-vocabulary word reuse the same oracle answer.
pub fn oracle_cache_key(word: &str, schema_version: u32) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"oracle\x00");
    hasher.update(word.to_lowercase().as_bytes());
    hasher.update(b"\x00");
    hasher.update(&schema_version.to_le_bytes());
    hex::encode(hasher.finalize().as_bytes())
}

/// A simple key→blob mapping (spec.md §4.9). Implementations must be safe
/// to call concurrently (spec.md §5: "concurrent writes of the same key
/// MUST be safe").
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn put(&self, key: &str, blob: &[u8]) -> Result<(), CacheError>;
}

/// Reads a versioned, serialized value from `store`. A version mismatch or
/// corrupted entry is treated as a miss (spec.md §7: `CacheReadCorruption`
/// degrades to recompute, never an error).
pub fn load<T: DeserializeOwned>(store: &dyn CacheStore, key: &str) -> Option<T> {
    let blob = match store.get(key) {
        Ok(Some(blob)) => blob,
        _ => return None,
    };
    let entry: CacheEntry<T> = match serde_json::from_slice(&blob) {
        Ok(entry) => entry,
        Err(_) => return None,
    };
    if entry.version != CACHE_SCHEMA_VERSION {
        return None;
    }
    Some(entry.payload)
}

/// Writes a versioned, serialized value to `store`. Failures are logged by
/// the caller (spec.md §7: `CacheWriteFailure` never fails the overall
/// call) and otherwise ignored here.
pub fn store<T: Serialize>(store: &dyn CacheStore, key: &str, payload: &T) -> Result<(), CacheError> {
    let entry = CacheEntryRef {
        version: CACHE_SCHEMA_VERSION,
        payload,
    };
    let blob = serde_json::to_vec(&entry)?;
    store.put(key, &blob)
}

/// Filesystem-backed cache store: one file per key, named `<hex_key>.json`,
/// written atomically via write-temp-then-rename.
pub struct FilesystemCacheStore {
    dir: PathBuf,
}

impl FilesystemCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the default cache directory: `$XDG_CACHE_HOME/rhymecore`,
    /// falling back to `$HOME/.cache/rhymecore`, falling back to
    /// `%APPDATA%\rhymecore` on platforms that set it.
    pub fn default_dir() -> PathBuf {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            if !xdg.is_empty() {
                return Path::new(&xdg).join("rhymecore");
            }
        }
        if let Ok(home) = std::env::var("HOME") {
            if !home.is_empty() {
                return Path::new(&home).join(".cache").join("rhymecore");
            }
        }
        if let Ok(appdata) = std::env::var("APPDATA") {
            if !appdata.is_empty() {
                return Path::new(&appdata).join("rhymecore");
            }
        }
        PathBuf::from(".rhymecore-cache")
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for FilesystemCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key);
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, blob: &[u8]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        std::io::Write::write_all(&mut tmp, blob)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| CacheError::Io(e.to_string()))?;
        Ok(())
    }
}

/// In-memory cache store: for tests and callers with no filesystem.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, blob: &[u8]) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Dummy {
        n: u32,
    }

    #[test]
    fn key_is_deterministic_and_order_sensitive() {
        let a = cache_key("hello world", "multisyllable=false", 1);
        let b = cache_key("hello world", "multisyllable=false", 1);
        let c = cache_key("hello world", "multisyllable=true", 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn oracle_cache_key_is_namespaced_apart_from_the_result_cache_key() {
        let result_key = cache_key("skrrt", "oracle=true", 1);
        let oracle_key = oracle_cache_key("skrrt", 1);
        assert_ne!(result_key, oracle_key);
    }

    #[test]
    fn oracle_cache_key_is_word_scoped_not_lyrics_scoped() {
        // Two different lyrics sharing an out-of-vocabulary word must
        // derive the same oracle cache key for that word.
        assert_eq!(oracle_cache_key("skrrt", 1), oracle_cache_key("SKRRT", 1));
    }

    #[test]
    fn memory_store_roundtrips() {
        let cache_store = MemoryCacheStore::new();
        let key = cache_key("lyrics", "flags", 1);
        assert!(load::<Dummy>(&cache_store, &key).is_none());
        store(&cache_store, &key, &Dummy { n: 7 }).unwrap();
        let loaded: Dummy = load(&cache_store, &key).unwrap();
        assert_eq!(loaded, Dummy { n: 7 });
    }

    #[test]
    fn version_mismatch_is_treated_as_miss() {
        let cache_store = MemoryCacheStore::new();
        let key = "k".to_string();
        let blob = serde_json::to_vec(&serde_json::json!({ "version": 999, "payload": { "n": 1 } })).unwrap();
        cache_store.put(&key, &blob).unwrap();
        assert!(load::<Dummy>(&cache_store, &key).is_none());
    }

    #[test]
    fn filesystem_store_roundtrips_atomically() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let cache_store = FilesystemCacheStore::new(tmp_dir.path());
        let key = cache_key("lyrics", "flags", 1);
        store(&cache_store, &key, &Dummy { n: 42 }).unwrap();
        let loaded: Dummy = load(&cache_store, &key).unwrap();
        assert_eq!(loaded, Dummy { n: 42 });
    }
}
