//! Error types surfaced by the fetch and filter pipeline

use thiserror::Error;

/// A retrieved document body could not be turned into a calendar.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse iCal data: {0}")]
    Syntax(String),
    #[error("no calendar found in the document")]
    NoCalendar,
}

/// A calendar could not be produced for a target.
///
/// There is no retry and no partial result: the first failure propagates to
/// the caller, and the cache keeps whatever entry it already had.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unknown calendar target: {0}")]
    UnknownTarget(String),
    #[error("failed to send calendar request: {0}")]
    Request(#[from] reqwest::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The configuration file could not be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(&'static str),
}
