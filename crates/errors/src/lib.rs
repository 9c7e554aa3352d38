#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the retrofit support-configuration service
//!
//! This crate provides fine-grained error types organized by domain.
//! Nothing here is fatal: every failure in the configuration service
//! degrades to "keep the last-known-good manifest" or "feature not
//! configured", so these types exist for logging and event payloads
//! rather than user-facing reporting.

use thiserror::Error;

pub mod config;
pub mod network;

// Re-export all error types at the root
pub use config::ConfigError;
pub use network::NetworkError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<plist::Error> for Error {
    fn from(err: plist::Error) -> Self {
        Self::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

/// Result type alias for retrofit operations
pub type Result<T> = std::result::Result<T, Error>;
