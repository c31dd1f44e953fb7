//! Board RSS feed reader that maps pin ids to publish dates
//!
//! The pins endpoint does not report when a pin was created, but the public
//! board feed does. Feeds are unavailable for some boards (names with escaped
//! characters get an HTML page instead), so an unreadable feed resolves to an
//! empty map rather than an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::cache::CacheStore;
use crate::client::ClientError;
use crate::config::Endpoints;
use crate::fetch::FetchGateway;

/// Pin id to publish date
pub type PinDateMap = HashMap<String, DateTime<Utc>>;

/// Marker preceding the pin id in a feed item's permalink
const PIN_URL_MARKER: &str = "pin/";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    guid: Option<Guid>,
}

#[derive(Debug, Deserialize)]
struct Guid {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Extracts the pin id from a permalink such as `https://www.pinterest.com/pin/123/`
///
/// The id runs from just after the first `pin/` to the next `/`, or to the end
/// of the string. Returns `None` when the marker is missing or the id is empty.
pub fn pin_id_from_url(pin_url: &str) -> Option<&str> {
    let start = pin_url.find(PIN_URL_MARKER)? + PIN_URL_MARKER.len();
    let rest = &pin_url[start..];
    let id = match rest.find('/') {
        Some(end) => &rest[..end],
        None => rest,
    };
    (!id.is_empty()).then_some(id)
}

/// Parses a board feed into a pin date map
///
/// Items without a recognizable permalink or date are skipped.
pub fn parse_feed(document: &str) -> Result<PinDateMap, quick_xml::de::DeError> {
    let rss: Rss = quick_xml::de::from_str(document)?;

    let mut dates = PinDateMap::with_capacity(rss.channel.items.len());
    for item in rss.channel.items {
        let Some(guid) = item.guid else { continue };
        let Some(pin_id) = pin_id_from_url(guid.value.trim()) else {
            tracing::debug!(guid = %guid.value, "feed item without a pin permalink");
            continue;
        };
        let Some(pub_date) = item.pub_date else { continue };
        match DateTime::parse_from_rfc2822(pub_date.trim()) {
            Ok(date) => {
                dates.insert(pin_id.to_string(), date.with_timezone(&Utc));
            }
            Err(e) => tracing::debug!(pin_id, %pub_date, error = %e, "unparseable feed date"),
        }
    }
    Ok(dates)
}

/// Resolves publish dates for the pins on a board from its RSS feed
#[derive(Debug, Clone)]
pub struct FeedDateResolver {
    cache: CacheStore,
    gateway: FetchGateway,
    endpoints: Endpoints,
}

impl FeedDateResolver {
    pub fn new(cache: CacheStore, gateway: FetchGateway, endpoints: Endpoints) -> Self {
        Self {
            cache,
            gateway,
            endpoints,
        }
    }

    /// Cache key for a board's feed, scoped to its owner
    fn cache_key(username: &str, board: &str) -> String {
        format!("{}/{}_RSS", username, board)
    }

    /// Returns the pin date map for a board
    ///
    /// # Returns
    /// * `Ok(PinDateMap)` - mapped dates, empty when the feed cannot be parsed
    /// * `Err(ClientError)` - if the cache or the HTTP request fails
    pub async fn resolve_dates(
        &self,
        username: &str,
        board: &str,
    ) -> Result<PinDateMap, ClientError> {
        let key = Self::cache_key(username, board);

        let document = match self.cache.get(&key).await?.into_fresh() {
            Some(document) => document,
            None => {
                let url = self.endpoints.board_feed_url(username, board);
                let document = self.gateway.get_text(&url).await?;
                self.cache.put(&key, &document).await?;
                document
            }
        };

        match parse_feed(&document) {
            Ok(dates) => Ok(dates),
            Err(e) => {
                tracing::warn!(
                    board,
                    error = %e,
                    "unable to read RSS feed for board, publish dates unavailable; expected when the board name contains an escaped character"
                );
                Ok(PinDateMap::new())
            }
        }
    }
}
