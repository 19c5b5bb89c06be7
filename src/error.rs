use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Bid policy errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("bid deadline {valid_until} is not after current time {now}")]
    DeadlineNotInFuture { valid_until: u64, now: u64 },

    #[error("bid deadline overflows")]
    DeadlineOverflow,

    #[error("{0}")]
    Rejected(String),
}

/// Bid signing errors.
#[derive(Error, Debug)]
pub enum SigningError {
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("bid expired before signing: valid until {valid_until}, now {now}")]
    Expired { valid_until: u64, now: u64 },

    #[error("failed to sign bid: {0}")]
    Signature(String),
}

/// Errors reported by the relay for a request.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    Rejected(String),

    #[error("request {method} timed out after {timeout:?}")]
    Timeout {
        method: &'static str,
        timeout: Duration,
    },

    #[error("unexpected response to {method}: {reason}")]
    UnexpectedResponse { method: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid agent state: expected {expected}, found {found}")]
    InvalidState {
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}
