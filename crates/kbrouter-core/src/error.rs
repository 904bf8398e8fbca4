//! Error types for kbrouter

use thiserror::Error;

/// Result type alias using KbRouterError
pub type Result<T> = std::result::Result<T, KbRouterError>;

/// Error type alias for convenience
pub type Error = KbRouterError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_INPUT: i32 = 3;
}

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of a remote capability call (transport, auth, throttling, model).
///
/// Components catch these at their boundary; they never reach the caller of
/// [`crate::Router::handle`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Response missing field: {0}")]
    MissingField(&'static str),
}

impl ServiceError {
    pub fn request(operation: &'static str, message: impl ToString) -> Self {
        Self::Request {
            operation,
            message: message.to_string(),
        }
    }
}

/// Main error type for kbrouter
#[derive(Debug, Error)]
pub enum KbRouterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl KbRouterError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidInput(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
