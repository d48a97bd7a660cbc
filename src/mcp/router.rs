//! Top-level MCP router: routes by method, delegates to tools and prompts.

use serde_json::{json, Value};

use crate::mcp::prompts;
use crate::tools::ToolRegistry;
use crate::types::{Error, Result, ServerConfig};

/// Routes MCP methods to their handlers.
#[derive(Debug)]
pub struct McpRouter {
    config: ServerConfig,
    tools: ToolRegistry,
}

impl McpRouter {
    pub fn new(config: ServerConfig, tools: ToolRegistry) -> Self {
        Self { config, tools }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle a request and produce its `result`.
    pub async fn route_request(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params).await,
            "prompts/list" => Ok(prompts::list_prompts()),
            "prompts/get" => {
                let name = str_field(&params, "name")?;
                let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
                prompts::get_prompt(&name, &arguments)
            }
            _ => Err(Error::not_found(format!("Method not found: {}", method))),
        }
    }

    /// Handle a notification. Notifications never produce a response.
    pub fn route_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => tracing::info!("MCP client initialized"),
            "notifications/cancelled" => {
                tracing::debug!("Cancellation notice ignored: requests run to completion")
            }
            other => tracing::debug!("Ignoring notification: {}", other),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        if let Some(client) = params.get("clientInfo") {
            tracing::info!(
                client = %client,
                requested_version = ?params.get("protocolVersion").and_then(|v| v.as_str()),
                "MCP initialize"
            );
        }
        json!({
            "protocolVersion": self.config.protocol_version,
            "capabilities": {
                "tools": {"listChanged": false},
                "prompts": {"listChanged": false},
            },
            "serverInfo": {
                "name": self.config.name,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .catalog()
            .list_entries()
            .iter()
            .filter_map(|entry| serde_json::to_value(*entry).ok())
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value) -> Result<Value> {
        let name = str_field(&params, "name")?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let output = self.tools.call(&name, arguments).await;

        Ok(json!({
            "content": [{"type": "text", "text": output.text}],
            "isError": output.is_error,
        }))
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

pub fn str_field(body: &Value, key: &str) -> Result<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::validation(format!("Missing required field: {}", key)))
}
