//! Error types for pgdeck
//!
//! This module defines the crate-level error type used by server setup and
//! lifecycle paths. Failures of individual backend calls are a separate
//! concern and live in [`crate::client::ClientError`]: they are always
//! converted to a displayed string at the call site rather than propagated.

use thiserror::Error;

/// Result type alias for pgdeck operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for pgdeck
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Create a configuration error with setting context
    ///
    /// # Example
    /// ```ignore
    /// ConsoleError::config("listen_addr", "invalid socket address")
    /// // produces: "Configuration error: listen_addr: invalid socket address"
    /// ```
    pub fn config(setting: &str, reason: impl Into<String>) -> Self {
        ConsoleError::Config(format!("{}: {}", setting, reason.into()))
    }

    /// Create a server error with operation context
    pub fn server(operation: &str, detail: impl Into<String>) -> Self {
        ConsoleError::Server(format!("{}: {}", operation, detail.into()))
    }

    /// Create a server error for bind failures
    pub fn bind_failed(address: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        ConsoleError::Server(format!("bind failed on {}: {}", address, reason.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: ConsoleError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConsoleError::config("listen_addr", "invalid socket address");
        assert_eq!(
            err.to_string(),
            "Configuration error: listen_addr: invalid socket address"
        );
    }

    #[test]
    fn test_server_error_display() {
        let err = ConsoleError::server("serve", "connection reset");
        assert_eq!(err.to_string(), "Server error: serve: connection reset");
    }

    #[test]
    fn test_bind_failed_display() {
        let err = ConsoleError::bind_failed("127.0.0.1:7070", "address in use");
        assert_eq!(
            err.to_string(),
            "Server error: bind failed on 127.0.0.1:7070: address in use"
        );
    }

    #[test]
    fn test_error_is_debug() {
        let err = ConsoleError::Server("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Server"));
    }
}
