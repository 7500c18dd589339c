//! Error types for the session context: configuration and log directory discovery

use std::path::PathBuf;
use thiserror::Error;

/// Errors while indexing or watching the log directory
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to list log directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start watching {path}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The directory exists but holds no `combat_*.txt` file yet
    #[error("no combat logs in {path}")]
    NoLogFiles { path: PathBuf },
}

/// Errors while loading, storing or checking the engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to locate the configuration file")]
    Locate(#[source] confy::ConfyError),

    #[error("failed to store configuration")]
    Store(#[source] confy::ConfyError),

    #[error("malformed configuration")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render configuration")]
    Render(#[from] toml::ser::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
