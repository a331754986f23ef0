/*!
 * Error types for the subcheck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing an SRT file into subtitle entries
#[derive(Error, Debug)]
pub enum ParseError {
    /// A block does not start with an integer index line
    #[error("block {block} does not start with an entry index: {snippet:?}")]
    MissingIndex {
        /// 1-based ordinal of the offending block
        block: usize,
        /// First line of the block, for diagnostics
        snippet: String,
    },

    /// A block's second line is not a valid timestamp range
    #[error("block {block} (entry {index}) has an invalid timestamp line: {snippet:?}")]
    InvalidTimestampLine {
        /// 1-based ordinal of the offending block
        block: usize,
        /// Index declared on the block's first line
        index: usize,
        /// The line that failed to match `HH:MM:SS,mmm --> HH:MM:SS,mmm`
        snippet: String,
    },

    /// A block is too short to carry an index and a timestamp line
    #[error("block {block} is truncated (expected index and timestamp lines): {snippet:?}")]
    TruncatedBlock {
        /// 1-based ordinal of the offending block
        block: usize,
        /// The block content, for diagnostics
        snippet: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Path of the file being read or written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A file did not parse as SRT; no partial parse is used downstream
    #[error("malformed subtitle file {path:?}: {source}")]
    MalformedInput {
        /// Path of the file that failed to parse
        path: PathBuf,
        /// The parse failure for the first offending block
        source: ParseError,
    },

    /// Any other error
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
