//! MCP transport layer.
//!
//! JSON-RPC 2.0 over newline-delimited stdio, as spoken by MCP clients.
//! Requests are handled strictly one at a time.

pub mod codec;
pub mod prompts;
pub mod protocol;
pub mod router;
pub mod server;

pub use router::McpRouter;
pub use server::McpServer;
