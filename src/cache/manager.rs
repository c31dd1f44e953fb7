//! Cache store for persisting raw response payloads to disk
//!
//! Provides a `CacheStore` that writes opaque text payloads to one file per key
//! and reports freshness from the file's modification time.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Freshness window for cache entries in minutes
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Prefix for every cache file name
const CACHE_FILE_PREFIX: &str = "pinterest_";

/// Suffix for every cache file name
const CACHE_FILE_SUFFIX: &str = ".cache";

/// Errors raised by the cache store
///
/// A missing entry is never an error; it is reported as [`CacheLookup::Absent`].
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading, writing or inspecting a cache file failed
    #[error("cache I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of looking up a key in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The entry exists and is within the freshness window
    Fresh(String),
    /// The entry exists but is older than the freshness window
    Stale,
    /// No entry has ever been written for the key
    Absent,
}

impl CacheLookup {
    /// Returns the payload for a fresh entry, `None` otherwise
    pub fn into_fresh(self) -> Option<String> {
        match self {
            CacheLookup::Fresh(payload) => Some(payload),
            CacheLookup::Stale | CacheLookup::Absent => None,
        }
    }
}

/// Replaces path separators so every key maps into one flat directory
pub fn sanitize_key(key: &str) -> String {
    key.replace('/', "-")
}

/// Reads and writes cached payloads on disk
///
/// Each entry lives in `<cache_dir>/pinterest_<sanitized key>.cache`. The
/// directory is created on the first write.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// How long an entry is considered fresh after its last write
    ttl: Duration,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "pinfetch")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf()))
    }

    /// Creates a new CacheStore with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    /// Overrides the freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Directory holding the cache files
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given logical key
    pub fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!(
            "{}{}{}",
            CACHE_FILE_PREFIX,
            sanitize_key(key),
            CACHE_FILE_SUFFIX
        ))
    }

    /// Looks up an entry
    ///
    /// # Returns
    /// * `Ok(CacheLookup::Fresh)` with the payload if the file is younger than the TTL
    /// * `Ok(CacheLookup::Stale)` if the file exists but is too old (it is not deleted)
    /// * `Ok(CacheLookup::Absent)` if no file exists
    /// * `Err(CacheError)` for any other I/O failure
    pub async fn get(&self, key: &str) -> Result<CacheLookup, CacheError> {
        let path = self.cache_path(key);

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key, "cache miss");
                return Ok(CacheLookup::Absent);
            }
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let modified = match metadata.modified() {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        if Utc::now() - modified > self.ttl {
            tracing::debug!(key, %modified, "cache entry is stale");
            return Ok(CacheLookup::Stale);
        }

        match fs::read_to_string(&path).await {
            Ok(payload) => {
                tracing::debug!(key, "cache hit");
                Ok(CacheLookup::Fresh(payload))
            }
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }

    /// Writes an entry, replacing any previous payload for the key
    pub async fn put(&self, key: &str, payload: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|source| CacheError::Io {
                path: self.cache_dir.clone(),
                source,
            })?;

        let path = self.cache_path(key);
        fs::write(&path, payload)
            .await
            .map_err(|source| CacheError::Io { path, source })?;

        tracing::debug!(key, bytes = payload.len(), "cache entry written");
        Ok(())
    }
}
