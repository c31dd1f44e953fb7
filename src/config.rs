//! Client configuration: endpoints, cache location and pagination

use chrono::Duration;
use std::path::PathBuf;

use crate::cache::{CacheStore, DEFAULT_TTL_MINUTES};
use crate::paginate::Pagination;

/// Fallback cache directory when no platform cache directory exists
const FALLBACK_CACHE_DIR: &str = "cache";

/// Base URLs of the endpoints the client reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Host serving the per-user boards listing
    pub boards_base: String,
    /// Host serving board pins and bulk pin info
    pub api_base: String,
    /// Host serving the per-board RSS feeds
    pub site_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            boards_base: "http://pinterestapi.co.uk".to_string(),
            api_base: "https://api.pinterest.com".to_string(),
            site_base: "http://www.pinterest.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at one host, e.g. a mock server
    pub fn all_at(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            boards_base: base.clone(),
            api_base: base.clone(),
            site_base: base,
        }
    }

    pub fn boards_url(&self, username: &str) -> String {
        format!("{}/{}/boards", self.boards_base, username)
    }

    pub fn board_pins_url(&self, username: &str, board: &str) -> String {
        format!(
            "{}/v3/pidgets/boards/{}/{}/pins/",
            self.api_base,
            username,
            strip_board_marker(board)
        )
    }

    pub fn board_feed_url(&self, username: &str, board: &str) -> String {
        format!(
            "{}/{}/{}.rss",
            self.site_base,
            username,
            strip_board_marker(board)
        )
    }

    /// Bulk info URL for a comma-joined list of pin ids
    pub fn pin_info_url(&self, joined_ids: &str) -> String {
        format!("{}/v3/pidgets/pins/info/?pin_ids={}", self.api_base, joined_ids)
    }
}

/// Board handles may carry `#`, which the endpoints do not accept
fn strip_board_marker(board: &str) -> String {
    board.replace('#', "")
}

/// Everything needed to build a [`crate::PinClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User whose boards and pins are read
    pub username: String,
    /// Directory holding cached responses
    pub cache_dir: PathBuf,
    /// Freshness window for cached responses
    pub cache_ttl: Duration,
    pub endpoints: Endpoints,
    /// Initial pagination settings
    pub pagination: Pagination,
}

impl ClientConfig {
    /// Default configuration for a user
    ///
    /// Uses the platform cache directory (`~/.cache/pinfetch/` on Linux), or
    /// `./cache` when it cannot be determined.
    pub fn new(username: impl Into<String>) -> Self {
        let cache_dir = CacheStore::new()
            .map(|store| store.cache_dir().clone())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR));

        Self {
            username: username.into(),
            cache_dir,
            cache_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
            endpoints: Endpoints::default(),
            pagination: Pagination::default(),
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = cache_dir;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Builds the cache store described by this configuration
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::with_dir(self.cache_dir.clone()).with_ttl(self.cache_ttl)
    }
}
