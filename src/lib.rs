//! pinfetch library
//!
//! Reads a user's boards and pins from public Pinterest endpoints, caching raw
//! responses on disk and paginating results per client.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod data;
pub mod feed;
pub mod fetch;
pub mod paginate;
pub mod time_ago;

pub use client::{ClientError, Listing, PinClient};
pub use config::{ClientConfig, Endpoints};
pub use paginate::{PaginatedResponse, Pagination};
