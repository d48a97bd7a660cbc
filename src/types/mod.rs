//! Core types for the Mealie MCP server.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration for the Mealie connection, server and logging

mod config;
mod errors;

pub use config::{
    Config, MealieConfig, ObservabilityConfig, ServerConfig, ENV_API_KEY, ENV_BASE_URL,
    ENV_LOG_FILE, ENV_LOG_FORMAT, ENV_REQUEST_TIMEOUT,
};
pub use errors::{Error, Result};
