//! # Persistence Error Types
//!
//! Everything that can go wrong between the change buffer and disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by flush and load.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A snapshot line failed to parse. Fatal for the operation in
    /// progress; an operator must inspect or remove the named file.
    #[error("corrupt snapshot {file} at line {line}: {reason}")]
    Corrupt {
        /// The snapshot that failed to parse.
        file: PathBuf,
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// An underlying filesystem operation failed.
    #[error("snapshot i/o failed at {path}: {source}")]
    Io {
        /// The path the operation touched.
        path: PathBuf,
        /// The raw error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
