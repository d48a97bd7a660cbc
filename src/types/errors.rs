//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

use crate::mcp::protocol::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the Mealie MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors (map to JSON-RPC INVALID_PARAMS).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found (map to JSON-RPC METHOD_NOT_FOUND).
    #[error("not found: {0}")]
    NotFound(String),

    /// Mealie answered with a non-success status.
    #[error("API error for {method} {path}: {detail} (Status Code: {status})")]
    Api {
        status: u16,
        method: String,
        path: String,
        detail: String,
    },

    /// Request did not complete within the configured timeout.
    #[error("request timeout for {0}")]
    Timeout(String),

    /// Mealie could not be reached.
    #[error("connection error for {0}")]
    Connection(String),

    /// Other HTTP client errors.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors (map to JSON-RPC INTERNAL_ERROR).
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert to a JSON-RPC error code.
    pub fn to_jsonrpc_code(&self) -> i32 {
        match self {
            Error::Validation(_) => INVALID_PARAMS,
            Error::NotFound(_) => METHOD_NOT_FOUND,
            Error::Serialization(_) => PARSE_ERROR,
            Error::Api { .. }
            | Error::Timeout(_)
            | Error::Connection(_)
            | Error::Http(_)
            | Error::Io(_)
            | Error::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Render the error and every `source()` below it, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }
        chain
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
