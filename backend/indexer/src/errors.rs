//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The RPC answered with something we cannot turn into events.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A client asked for an event kind the contract never emits.
    #[error("Unknown event kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
