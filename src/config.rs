use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::SocketAddr;

use crate::data_models::SearchState;
use crate::error::{Error, Result};

pub static CONFIG: Lazy<Result<Config>> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub default_limit: u32,
    pub default_sort: Option<String>,
    pub static_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn get() -> Result<&'static Config> {
        CONFIG.as_ref().map_err(Clone::clone)
    }

    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = get_or_default(&lookup, "STOREFRONT_BIND_ADDR", "127.0.0.1:3000")
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config {
                key: "STOREFRONT_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let default_limit = get_or_default(&lookup, "STOREFRONT_DEFAULT_LIMIT", "25")
            .parse::<u32>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| Error::Config {
                key: "STOREFRONT_DEFAULT_LIMIT",
                reason: "expected a positive integer".to_string(),
            })?;

        // An empty value disables the default sort.
        let default_sort = match lookup("STOREFRONT_DEFAULT_SORT") {
            Some(sort) if sort.trim().is_empty() => None,
            Some(sort) => Some(sort),
            None => Some("best-matches".to_string()),
        };

        let log_level = get_or_default(&lookup, "STOREFRONT_LOG_LEVEL", "info")
            .parse::<tracing::Level>()
            .map_err(|e| Error::Config {
                key: "STOREFRONT_LOG_LEVEL",
                reason: e.to_string(),
            })?;

        Ok(Config {
            bind_addr,
            default_limit,
            default_sort,
            static_dir: get_or_default(&lookup, "STOREFRONT_STATIC_DIR", "static"),
            log_level,
        })
    }
}

impl Config {
    /// Search parameters applied before the current location's query.
    pub fn default_search_state(&self) -> SearchState {
        SearchState {
            limit: self.default_limit,
            sort: self.default_sort.clone(),
            ..SearchState::default()
        }
    }
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
