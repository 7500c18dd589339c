use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A line that could not be turned into a `CombatEvent`.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Fewer than five bracketed fields, usually a line the game is still writing
    #[error("line {line_number}: fewer than five bracketed fields")]
    IncompleteLine { line_number: u64 },

    #[error("line {line_number}: bad timestamp {segment:?}")]
    InvalidTimestamp { line_number: u64, segment: String },

    #[error("line {line_number}: unrecognised value {detail:?}")]
    InvalidValue { line_number: u64, detail: String },
}

/// File operation that failed while reading or tailing a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOp {
    Open,
    Map,
    Seek,
    Read,
    Stat,
}

impl fmt::Display for LogOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogOp::Open => "open",
            LogOp::Map => "memory map",
            LogOp::Seek => "seek in",
            LogOp::Read => "read",
            LogOp::Stat => "stat",
        })
    }
}

/// Monitoring halts on any of these.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("could not {op} {path}")]
    Io {
        op: LogOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log file name {path} does not carry a session date")]
    SessionDate { path: PathBuf },
}

impl StreamError {
    /// `map_err` adapter for an io failure on `path`.
    pub(crate) fn io(op: LogOp, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        move |source| StreamError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}
