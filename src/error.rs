use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }
}
