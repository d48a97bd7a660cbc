//! # Mealie MCP - Meal Plan Tools for MCP Clients
//!
//! Rust implementation of a Model Context Protocol server exposing a Mealie
//! instance's meal plans:
//! - Meal plan tools (list, create, bulk create, today, by id, random, rules)
//! - Uniform text envelopes: backend JSON on success, error object on failure
//! - Typed tool arguments with JSON Schema validation
//! - A weekly meal planning prompt
//! - JSON-RPC 2.0 over newline-delimited stdio
//!
//! ## Architecture
//!
//! ```text
//!   MCP client (stdio)
//!          │
//!   ┌──────▼──────┐    ┌──────────────┐    ┌───────────────┐
//!   │  McpServer  │ →  │  McpRouter   │ →  │ ToolRegistry  │
//!   │ (line loop) │    │ (by method)  │    │ MealPlanTools │
//!   └─────────────┘    └──────────────┘    └───────┬───────┘
//!                                                  │ MealPlanFetcher
//!                                          ┌───────▼───────┐
//!                                          │ MealieClient  │ → Mealie REST API
//!                                          └───────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod mcp;
pub mod mealie;
pub mod models;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
