pub mod api;
pub mod cli;
pub mod config;
pub mod data_models;
pub mod error;
pub mod location;
pub mod query_string;
pub mod refinements;
pub mod search_params;

pub use data_models::{RefinementToggle, RefinementValue, SearchState};
pub use error::{Error, Result};
pub use search_params::{EncodeOptions, decode, encode};
