//! Error types for the engine and its host ports.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("module already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("module not loaded: {0}")]
    NotLoaded(String),

    #[error("subscription lost: module '{module}' held a handle the event source did not recognise")]
    SubscriptionLost { module: String },

    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by a host port.
///
/// Port failures never escape the creation pipeline; they degrade an
/// observation field or mark a single enforcement action as failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("entity handle is stale or invalid")]
    StaleHandle,

    #[error("host service unavailable: {0}")]
    Unavailable(String),

    #[error("host rejected request: {0}")]
    Rejected(String),
}
