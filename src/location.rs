use crate::config::Config;
use crate::data_models::{RefinementToggle, SearchState};
use crate::search_params::{self, EncodeOptions};

/// Read/write access to the current URL (`pathname[?query]`).
pub trait Location {
    fn read(&self) -> String;
    fn write(&mut self, url: &str);
}

/// Splits a URL into its pathname and query (without the `?`). Any `#hash`
/// is discarded.
pub fn split_url(url: &str) -> (&str, &str) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    match url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (url, ""),
    }
}

/// A `Location` kept in memory, recording every navigation.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    current: String,
    history: Vec<String>,
}

impl MemoryLocation {
    pub fn new(url: impl Into<String>) -> Self {
        MemoryLocation {
            current: url.into(),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Location for MemoryLocation {
    fn read(&self) -> String {
        self.current.clone()
    }

    fn write(&mut self, url: &str) {
        self.history.push(url.to_string());
        self.current = url.to_string();
    }
}

/// The product-list search parameters of the current location, layered over
/// a set of defaults.
pub struct SearchParams<L: Location> {
    location: L,
    defaults: SearchState,
}

impl<L: Location> SearchParams<L> {
    pub fn new(location: L, defaults: SearchState) -> Self {
        Self { location, defaults }
    }

    pub fn from_config(location: L, config: &Config) -> Self {
        Self::new(location, config.default_search_state())
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    pub fn defaults(&self) -> &SearchState {
        &self.defaults
    }

    pub fn pathname(&self) -> String {
        let url = self.location.read();
        split_url(&url).0.to_string()
    }

    pub fn current(&self) -> SearchState {
        let url = self.location.read();
        let (_, query) = split_url(&url);
        search_params::decode_onto(self.defaults.clone(), query)
    }

    pub fn stringify(&self, state: &SearchState, options: &EncodeOptions) -> String {
        search_params::encode(state, options, &self.pathname())
    }

    /// Navigates to the current state with one refinement value flipped and
    /// returns the URL navigated to.
    pub fn toggle(&mut self, toggle: RefinementToggle) -> String {
        let url = self.stringify(&self.current(), &EncodeOptions::with_path().toggling(toggle));
        log::info!("navigating to {url}");
        self.location.write(&url);
        url
    }

    /// Drops every parameter, keeping only the pathname.
    pub fn reset(&mut self) -> String {
        let url = self.pathname();
        log::info!("clearing search params, navigating to {url}");
        self.location.write(&url);
        url
    }
}

#[test]
fn test_split_url() {
    assert_eq!(split_url("/category/womens?limit=25#top"), ("/category/womens", "limit=25"));
    assert_eq!(split_url("/search"), ("/search", ""));
    assert_eq!(split_url("?q=shoes"), ("", "q=shoes"));
}
