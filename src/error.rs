//! The error type shared across the crate

use std::path::PathBuf;

/// Shorthand for results produced by this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when configuring, storing or reporting events.
///
/// Callers can tell a missing row ([`Error::NotFound`]) apart from an actual
/// storage failure ([`Error::Database`]) and react differently to each
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("no event with id {id}")]
    NotFound { id: i64 },

    #[error("unknown event status {0:?}")]
    InvalidStatus(String),

    #[error("invalid configuration file {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
