//! Cache module for storing raw API responses to disk
//!
//! This module provides a flat, file-per-key cache for response payloads. Entries
//! are judged fresh or stale by the age of their file; stale entries are left on
//! disk until the next write for the same key overwrites them.

mod manager;

pub use manager::{sanitize_key, CacheError, CacheLookup, CacheStore, DEFAULT_TTL_MINUTES};
