use clap::{Parser, Subcommand};

use crate::data_models::{RefinementToggle, SearchState};
use crate::location::split_url;
use crate::search_params;

#[derive(Parser, Debug)]
#[command(name = "storefront-search", about = "Product listing search parameter codec")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a query string or URL and print the search state as JSON.
    Decode { query: String },
    /// Encode a JSON search state as a query string.
    Encode {
        /// Search state as JSON.
        state: String,
        /// Prefix the output with this path.
        #[arg(long)]
        path: Option<String>,
        /// Refinement to toggle before encoding, as `attribute=value` or `attribute`.
        #[arg(long)]
        toggle: Option<String>,
    },
    /// Toggle one refinement value on a URL and print the resulting URL.
    Toggle {
        url: String,
        attribute: String,
        value: Option<String>,
    },
    /// Serve the HTTP API.
    Serve,
}

/// `attribute=value` toggles one value; a bare `attribute` toggles presence.
pub fn parse_toggle(raw: &str) -> RefinementToggle {
    match raw.split_once('=') {
        Some((attribute, value)) => RefinementToggle::new(attribute, value),
        None => RefinementToggle::presence(raw),
    }
}

/// Decodes either a full URL (`/path?query`) or a bare query string.
pub fn decode_argument(arg: &str) -> SearchState {
    if arg.contains('?') {
        let (_, query) = split_url(arg);
        search_params::decode(query)
    } else {
        search_params::decode(arg)
    }
}
