//! # Headlines
//!
//! A terminal news reader for The Guardian Open Platform. It browses
//! sections, runs free-text searches, and pages through results, rendering
//! each article as a text card.
//!
//! ## Usage
//!
//! ```sh
//! headlines                         # interactive session
//! headlines --section technology    # one page, then exit
//! headlines --query "climate"       # one page of search results, then exit
//! ```
//!
//! ## Architecture
//!
//! One fetch-and-render cycle per user action:
//! 1. **Input**: a command (section name, search text, `more`) mutates the
//!    query state through a named transition
//! 2. **Request**: the state is turned into a search URL and fetched
//! 3. **Mapping**: each raw result becomes a render-ready article record
//! 4. **Render**: records are drawn through the `FeedView` trait; the
//!    terminal adapter is the only piece that touches stdout

use clap::Parser;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

mod api;
mod cli;
mod feed;
mod models;
mod query;
mod render;
mod utils;

use api::GuardianClient;
use cli::Cli;
use feed::FeedController;
use query::{GENERAL, NAV_CATEGORIES};
use render::TerminalView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("headlines starting up");

    let args = Cli::parse();
    debug!(endpoint = %args.endpoint, page_size = args.page_size, "Parsed CLI arguments");

    let endpoint = Url::parse(&args.endpoint)?;
    let client = GuardianClient::new(endpoint, args.api_key.clone());
    let mut feed = FeedController::new(client, TerminalView::new(), args.page_size);

    // One-shot modes: a single reset load, then exit.
    if let Some(section) = args.section {
        feed.select_category(&section).await;
        return Ok(());
    }
    if let Some(text) = args.query {
        feed.submit_search(&text).await;
        return Ok(());
    }

    // Interactive session: front page first, then the command loop.
    feed.select_category(GENERAL).await;
    println!(
        "commands: a section name or '/s <section>', '/q <text>' or free text to search, 'more', 'quit'"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::More => {
                if feed.view().load_more_visible() {
                    feed.load_more().await;
                } else {
                    println!("No more pages to load.");
                }
            }
            Command::Section(id) => feed.select_category(&id).await,
            Command::Search(text) => feed.submit_search(&text).await,
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Session ended");
    Ok(())
}

/// One parsed line of interactive input.
#[derive(Debug, PartialEq)]
enum Command {
    Empty,
    Quit,
    More,
    Section(String),
    Search(String),
}

/// Map a line of input onto a command.
///
/// `/s <section>` and `/q <text>` are explicit; a bare nav category name
/// (case-insensitive) selects that category, and any other text is a search.
fn parse_command(line: &str) -> Command {
    let input = line.trim();
    match input {
        "" => Command::Empty,
        "quit" | "exit" => Command::Quit,
        "more" => Command::More,
        _ => {
            if let Some(section) = input.strip_prefix("/s ") {
                Command::Section(section.trim().to_string())
            } else if let Some(text) = input.strip_prefix("/q ") {
                Command::Search(text.trim().to_string())
            } else if NAV_CATEGORIES.contains(&input.to_lowercase().as_str()) {
                Command::Section(input.to_lowercase())
            } else {
                Command::Search(input.to_string())
            }
        }
    }
}
