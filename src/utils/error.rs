//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and parsing a profile document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON. Please check the format of your profile output. ({0})")]
    MalformedInput(String),

    #[error("Unexpected value for key: '{key}' (expected {expected})")]
    UnexpectedStructure { key: String, expected: &'static str },

    #[error("Failed to read profile input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Build a structure error for a key path
    pub fn unexpected(key: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedStructure {
            key: key.into(),
            expected,
        }
    }
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No shard data to chart")]
    EmptyShards,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
