//! Command-line interface parsing for pinfetch
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the client configuration used by the binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::paginate::Pagination;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// `--page` was given without `--page-size`
    #[error("--page requires --page-size; without a page size every result is on page 1")]
    PageWithoutSize,
}

/// pinfetch - read Pinterest boards and pins with an on-disk response cache
#[derive(Parser, Debug)]
#[command(name = "pinfetch")]
#[command(about = "Fetch Pinterest boards and pins through a local response cache")]
#[command(version)]
pub struct Cli {
    /// Directory for cached responses (defaults to the platform cache directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Number of results per page; omit to return everything on one page
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,

    /// Page to return, starting at 1
    #[arg(long, global = true, value_name = "N")]
    pub page: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the binary
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List a user's boards
    Boards {
        username: String,
        /// Wrap the result in a paginated envelope
        #[arg(long)]
        paginate: bool,
    },
    /// List the pins on one of a user's boards
    BoardPins {
        username: String,
        board: String,
        /// Wrap the result in a paginated envelope
        #[arg(long)]
        paginate: bool,
    },
    /// List the pins from every board a user owns
    Pins { username: String },
    /// Fetch metadata for pin ids
    PinData {
        #[arg(value_name = "ID", required = true)]
        pin_ids: Vec<String>,
    },
    /// Earliest date a label like "3 weeks ago" can refer to
    Since { text: String },
}

impl Cli {
    /// Pagination settings from the global flags
    ///
    /// # Returns
    /// * `Ok(Pagination)` with the requested page size and page
    /// * `Err(CliError::PageWithoutSize)` if a page was given without a size
    pub fn pagination(&self) -> Result<Pagination, CliError> {
        if self.page.is_some() && self.page_size.is_none() {
            return Err(CliError::PageWithoutSize);
        }
        Ok(Pagination::new(self.page_size, self.page.unwrap_or(1)))
    }

    /// Builds the client configuration for a user
    pub fn client_config(&self, username: &str) -> Result<ClientConfig, CliError> {
        let mut config = ClientConfig::new(username).with_pagination(self.pagination()?);
        if let Some(cache_dir) = &self.cache_dir {
            config = config.with_cache_dir(cache_dir.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boards() {
        let cli = Cli::parse_from(["pinfetch", "boards", "alice"]);
        assert_eq!(
            cli.command,
            Command::Boards {
                username: "alice".to_string(),
                paginate: false
            }
        );
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_parse_board_pins_with_paginate() {
        let cli = Cli::parse_from(["pinfetch", "board-pins", "alice", "recipes", "--paginate"]);
        assert_eq!(
            cli.command,
            Command::BoardPins {
                username: "alice".to_string(),
                board: "recipes".to_string(),
                paginate: true
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pinfetch", "pins", "alice", "--page-size", "25", "--page", "2"]);
        let pagination = cli.pagination().unwrap();
        assert_eq!(pagination.items_per_page(), Some(25));
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn test_parse_pin_data_ids() {
        let cli = Cli::parse_from(["pinfetch", "pin-data", "1", "2", "3"]);
        assert_eq!(
            cli.command,
            Command::PinData {
                pin_ids: vec!["1".to_string(), "2".to_string(), "3".to_string()]
            }
        );
    }

    #[test]
    fn test_default_pagination_is_unbounded() {
        let cli = Cli::parse_from(["pinfetch", "boards", "alice"]);
        assert_eq!(cli.pagination().unwrap(), Pagination::default());
    }

    #[test]
    fn test_page_without_size_is_rejected() {
        let cli = Cli::parse_from(["pinfetch", "boards", "alice", "--page", "2"]);
        let err = cli.pagination().unwrap_err();
        assert!(err.to_string().contains("--page-size"));
    }

    #[test]
    fn test_client_config_uses_cache_dir_flag() {
        let cli = Cli::parse_from(["pinfetch", "--cache-dir", "/tmp/pf", "boards", "alice"]);
        let config = cli.client_config("alice").unwrap();
        assert_eq!(config.username, "alice");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/pf"));
    }
}
