//! Error types for combat building

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Nothing timestamped to start a combat from yet. Callers retry with the next batch.
    #[error("no events to start a combat from")]
    EmptyBootstrap,
}
