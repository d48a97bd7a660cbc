//! MCP stdio server: read loop and per-message handler.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;

use crate::mcp::codec::{read_message, write_message};
use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, JSONRPC_VERSION, PARSE_ERROR,
};
use crate::mcp::router::McpRouter;

/// MCP server wrapping the router.
#[derive(Debug)]
pub struct McpServer {
    router: McpRouter,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(router: McpRouter) -> Self {
        Self {
            router,
            cancel: CancellationToken::new(),
        }
    }

    /// Serve the process stdin/stdout until EOF or shutdown.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        tracing::info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve_io(stdin, stdout).await
    }

    /// Serve messages from `reader`, answering on `writer`.
    ///
    /// One message is handled to completion before the next is read.
    pub async fn serve_io<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let max_message_bytes = self.router.config().max_message_bytes;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                message = read_message(&mut reader, max_message_bytes) => {
                    let response = match message {
                        Ok(Some(line)) => self.handle_message(&line).await,
                        Ok(None) => {
                            tracing::info!("MCP client closed stdin");
                            break;
                        }
                        // Undecodable line; the codec already skipped past it.
                        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                            tracing::warn!("Rejected MCP message: {}", e);
                            Some(JsonRpcResponse::error(
                                Value::Null,
                                PARSE_ERROR,
                                format!("Parse error: {}", e),
                            ))
                        }
                        Err(e) => return Err(e),
                    };

                    if let Some(response) = response {
                        write_message(&mut writer, &response).await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Token that stops the read loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Decode and dispatch one message. Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Failed to parse MCP message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = raw.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        if request.is_notification() {
            self.router.route_notification(&request.method);
            return None;
        }

        tracing::debug!("MCP request {} ({})", request.method, id);
        let params = request.params.unwrap_or(Value::Null);
        let response = match self.router.route_request(&request.method, params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                tracing::warn!("MCP request {} failed: {}", request.method, e);
                JsonRpcResponse::error(id, e.to_jsonrpc_code(), e.to_string())
            }
        };
        Some(response)
    }
}
