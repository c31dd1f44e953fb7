//! pinfetch - read Pinterest boards and pins from the command line
//!
//! Prints results as JSON on stdout. Logs go to stderr and are controlled with
//! `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pinfetch::cli::{Cli, Command};
use pinfetch::time_ago::earliest_date_from_time_ago_text;
use pinfetch::PinClient;

/// Installs the stderr log subscriber
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Boards { username, paginate } => {
            let client = PinClient::new(cli.client_config(username)?);
            print_json(&client.get_boards(*paginate).await?)
        }
        Command::BoardPins {
            username,
            board,
            paginate,
        } => {
            let client = PinClient::new(cli.client_config(username)?);
            print_json(&client.get_pins_from_board(board, *paginate).await?)
        }
        Command::Pins { username } => {
            let client = PinClient::new(cli.client_config(username)?);
            print_json(&client.get_pins().await?)
        }
        Command::PinData { pin_ids } => {
            // Bulk pin data is not tied to a user
            let client = PinClient::new(cli.client_config("")?);
            print_json(&client.get_data_for_pins(pin_ids.as_slice()).await?)
        }
        Command::Since { text } => {
            let date = earliest_date_from_time_ago_text(text, Utc::now())?;
            print_json(&date)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
