//! Pinterest client combining the cache, the HTTP gateway and the feed reader
//!
//! Every list operation checks the cache first, falls back to the network on a
//! miss or stale entry, writes the response through to the cache, then shapes
//! the result with the client's pagination settings.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::cache::{CacheError, CacheStore};
use crate::config::{ClientConfig, Endpoints};
use crate::data::{Board, BoardPinsResponse, BoardsResponse, Pin, PinInfo, PinInfoResponse};
use crate::feed::{FeedDateResolver, PinDateMap};
use crate::fetch::{FetchError, FetchGateway};
use crate::paginate::{PaginatedResponse, Pagination};

/// Most pin ids the bulk info endpoint accepts per request
pub const PIN_IDS_PER_REQUEST: usize = 10;

/// Most bulk info requests in flight at once
pub const MAX_CONCURRENT_PIN_REQUESTS: usize = 50;

/// Errors that abort a client operation
#[derive(Debug, Error)]
pub enum ClientError {
    /// Reading or writing the response cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The HTTP request failed or returned a non-success status
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A response did not have the expected shape
    #[error("Unexpected response shape for {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A list result, either as returned or wrapped in a paginated envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Raw(Vec<T>),
    Paginated(PaginatedResponse<T>),
}

impl<T> Listing<T> {
    /// The items of the listing; for a paginated listing, the current page
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Raw(items) => items,
            Listing::Paginated(page) => page.data,
        }
    }
}

/// Reads boards and pins for one user
///
/// Each client owns its pagination settings, so separate clients can page
/// through results independently.
#[derive(Debug, Clone)]
pub struct PinClient {
    username: String,
    cache: CacheStore,
    gateway: FetchGateway,
    endpoints: Endpoints,
    dates: FeedDateResolver,
    pagination: Pagination,
}

impl PinClient {
    /// Creates a client from a configuration
    pub fn new(config: ClientConfig) -> Self {
        Self::with_gateway(config, FetchGateway::new())
    }

    /// Creates a client with a custom HTTP gateway
    pub fn with_gateway(config: ClientConfig, gateway: FetchGateway) -> Self {
        let cache = config.cache_store();
        let dates = FeedDateResolver::new(cache.clone(), gateway.clone(), config.endpoints.clone());
        Self {
            username: config.username,
            cache,
            gateway,
            endpoints: config.endpoints,
            dates,
            pagination: config.pagination,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn items_per_page(&self) -> Option<usize> {
        self.pagination.items_per_page()
    }

    /// Sets the page size; `None` returns everything on one page
    pub fn set_items_per_page(&mut self, items_per_page: Option<usize>) {
        self.pagination.set_items_per_page(items_per_page);
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn set_current_page(&mut self, current_page: usize) {
        self.pagination.set_current_page(current_page);
    }

    /// Returns a cached JSON response, or fetches and caches it
    ///
    /// A cached payload that no longer decodes is treated as a miss.
    async fn cached_json<T: DeserializeOwned>(
        &self,
        key: &str,
        url: &str,
    ) -> Result<T, ClientError> {
        if let Some(payload) = self.cache.get(key).await?.into_fresh() {
            match serde_json::from_str(&payload) {
                Ok(value) => return Ok(value),
                Err(e) => tracing::warn!(key, error = %e, "discarding undecodable cache entry"),
            }
        }

        let response = self.gateway.get_json(url).await?;
        let payload = response.to_string();
        self.cache.put(key, &payload).await?;

        serde_json::from_value(response).map_err(|source| ClientError::Decode {
            key: key.to_string(),
            source,
        })
    }

    /// Applies the pagination settings when requested
    fn shape<T>(&self, items: Vec<T>, paginate: bool) -> Listing<T> {
        if paginate {
            Listing::Paginated(self.pagination.paginate(items))
        } else {
            Listing::Raw(items)
        }
    }

    /// Lists the user's boards
    pub async fn get_boards(&self, paginate: bool) -> Result<Listing<Board>, ClientError> {
        let boards = self.fetch_boards().await?;
        Ok(self.shape(boards, paginate))
    }

    async fn fetch_boards(&self) -> Result<Vec<Board>, ClientError> {
        let key = format!("boards_{}", self.username);
        let url = self.endpoints.boards_url(&self.username);
        let response: BoardsResponse = self.cached_json(&key, &url).await?;
        Ok(response.body)
    }

    /// Lists the pins on one board, each stamped with its publish date
    pub async fn get_pins_from_board(
        &self,
        board: &str,
        paginate: bool,
    ) -> Result<Listing<Pin>, ClientError> {
        let pins = self.dated_board_pins(board).await?;
        Ok(self.shape(pins, paginate))
    }

    /// Fetches a board's pins and its feed dates concurrently, then merges them
    async fn dated_board_pins(&self, board: &str) -> Result<Vec<Pin>, ClientError> {
        let (mut pins, dates) = tokio::try_join!(
            self.fetch_board_pins(board),
            self.dates.resolve_dates(&self.username, board),
        )?;

        stamp_created_at(&mut pins, &dates);
        Ok(pins)
    }

    async fn fetch_board_pins(&self, board: &str) -> Result<Vec<Pin>, ClientError> {
        // Board names are only unique per user
        let key = format!("{}/{}", self.username, board);
        let url = self.endpoints.board_pins_url(&self.username, board);
        let response: BoardPinsResponse = self.cached_json(&key, &url).await?;
        Ok(response.data.pins)
    }

    /// Lists the pins from every board the user owns
    ///
    /// Boards listed for the user but owned by someone else are skipped. Pins
    /// are concatenated in board order.
    pub async fn get_pins(&self) -> Result<PaginatedResponse<Pin>, ClientError> {
        let boards = self.fetch_boards().await?;

        let owned: Vec<&str> = boards
            .iter()
            .filter_map(|board| board.handle_for(&self.username))
            .collect();
        tracing::debug!(
            listed = boards.len(),
            owned = owned.len(),
            "fetching pins for owned boards"
        );

        let per_board =
            futures::future::try_join_all(owned.into_iter().map(|handle| self.dated_board_pins(handle)))
                .await?;

        let all_pins: Vec<Pin> = per_board.into_iter().flatten().collect();
        Ok(self.pagination.paginate(all_pins))
    }

    /// Fetches bulk metadata for arbitrary pin ids
    ///
    /// Ids are sent in groups of [`PIN_IDS_PER_REQUEST`], with at most
    /// [`MAX_CONCURRENT_PIN_REQUESTS`] groups in flight. Results are collected
    /// in the order the groups complete.
    pub async fn get_data_for_pins<S: AsRef<str>>(
        &self,
        pin_ids: &[S],
    ) -> Result<PaginatedResponse<PinInfo>, ClientError> {
        let groups: Vec<String> = pin_ids
            .chunks(PIN_IDS_PER_REQUEST)
            .map(|group| {
                group
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        tracing::debug!(ids = pin_ids.len(), groups = groups.len(), "fetching pin data");

        let results: Vec<Vec<PinInfo>> = stream::iter(groups)
            .map(|joined_ids| async move { self.fetch_pin_group(&joined_ids).await })
            .buffer_unordered(MAX_CONCURRENT_PIN_REQUESTS)
            .try_collect()
            .await?;

        let all_data: Vec<PinInfo> = results.into_iter().flatten().collect();
        Ok(self.pagination.paginate(all_data))
    }

    async fn fetch_pin_group(&self, joined_ids: &str) -> Result<Vec<PinInfo>, ClientError> {
        let url = self.endpoints.pin_info_url(joined_ids);
        let response: PinInfoResponse = self.cached_json(joined_ids, &url).await?;
        Ok(response.data)
    }
}

/// Sets each pin's `created_at` from the date map, or to empty when unmapped
fn stamp_created_at(pins: &mut [Pin], dates: &PinDateMap) {
    for pin in pins {
        pin.created_at = dates
            .get(&pin.id)
            .map(|date| date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            .unwrap_or_default();
    }
}
