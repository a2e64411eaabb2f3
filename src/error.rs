//! Error types for readalong

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the tracker
///
/// Every variant is caught where it occurs, logged, and turned into a
/// user-visible banner; none of them takes the process down.
#[derive(Error, Debug)]
pub enum Error {
    /// Credential loading or sheet service authorization failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Remote read failure
    #[error("Load error: {0}")]
    Load(String),

    /// Remote write failure
    #[error("Save error: {0}")]
    Save(String),

    /// Selected member missing from the roster (unreachable from the UI,
    /// which populates the select from the roster)
    #[error("Member not found in roster: {0}")]
    Lookup(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
