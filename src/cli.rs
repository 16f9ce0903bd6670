//! Command-line interface definitions.
//!
//! All options have working defaults: running the binary with no arguments
//! starts an interactive session against the Guardian's public `test` key.

use clap::Parser;

use crate::query::{DEFAULT_API_KEY, DEFAULT_ENDPOINT, PAGE_SIZE};

/// Command-line arguments for the headlines reader.
///
/// # Examples
///
/// ```sh
/// # Interactive session with the public development key
/// headlines
///
/// # One page of technology headlines, then exit
/// headlines --section technology
///
/// # One page of search results, then exit
/// headlines --query "climate change"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Guardian Open Platform API key
    #[arg(long, env = "GUARDIAN_API_KEY", default_value = DEFAULT_API_KEY)]
    pub api_key: String,

    /// Search endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Results requested per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: u32,

    /// Load one page of this nav category and exit
    #[arg(long, conflicts_with = "query")]
    pub section: Option<String>,

    /// Load one page of results for this search text and exit
    #[arg(long)]
    pub query: Option<String>,
}
