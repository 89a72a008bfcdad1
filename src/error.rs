//! Typed failures of the parsing and analysis core.
//!
//! The core only returns these values, presenting them is left to the caller.

use std::io;

use thiserror::Error;


#[derive(Error, Debug)]
pub enum Error {
    /// Header or positional record could not be read. `line` counts from 1.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput {
        line: usize,
        reason: String,
    },

    #[error("Inconsistent datasets: {0}")]
    InconsistentDataset(String),

    #[error("Degenerate analysis: {0}")]
    DegenerateAnalysis(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}


impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput { line, reason: reason.into() }
    }
}


pub type Result<T> = std::result::Result<T, Error>;
