//! Error types for the Tidecast library.
//!
//! Classification itself never fails; errors come from loading weight tables
//! and answer sets, from invalid analyzer configuration, and from the exact
//! enumerator when a table is too large to enumerate.
//!
//! # Examples
//!
//! ```
//! use tidecast::error::{Result, TidecastError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TidecastError::invalid_argument("trials must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Tidecast operations.
#[derive(Error, Debug)]
pub enum TidecastError {
    /// I/O errors (reading weight tables, answer sets, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed input records
    #[error("Parse error: {0}")]
    Parse(String),

    /// Weight table or analyzer configuration problems
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis could not be carried out
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Thread pool construction errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TidecastError.
pub type Result<T> = std::result::Result<T, TidecastError>;

impl TidecastError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TidecastError::Parse(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TidecastError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TidecastError::Analysis(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TidecastError::InvalidArgument(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        TidecastError::ThreadPool(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TidecastError::Other(msg.into())
    }
}
