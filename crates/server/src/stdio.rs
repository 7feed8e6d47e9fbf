//! Line-delimited JSON-RPC host loop.
//!
//! Exposes the mounted registry to a calling agent over stdin/stdout: one
//! JSON object per line, JSON-RPC 2.0 framing. Tool failures are carried
//! inside successful responses (`is_error` content), so a misbehaving tool
//! can never drop the host connection; only EOF ends the loop.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::registry::{ToolRegistry, ToolResponse};

const JSONRPC_VERSION: &str = "2.0";
const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// An incoming JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// Absent for notifications, which expect no response.
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// An outgoing JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl JsonRpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(json!({"code": code, "message": message})),
        }
    }
}

/// Serve the registry until stdin reaches EOF.
///
/// # Errors
///
/// Returns an error only when stdio itself fails; per-request problems are
/// reported as JSON-RPC error responses.
pub async fn serve(registry: &ToolRegistry) -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
            Ok(request) => {
                let Some(response) = handle(registry, request).await else {
                    continue; // notification
                };
                response
            }
            Err(e) => JsonRpcResponse::error(Value::Null, PARSE_ERROR, &format!("parse error: {e}")),
        };

        write_response(&mut stdout, &response).await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut body = serde_json::to_string(response).unwrap_or_else(|_| {
        // A response we built ourselves always serializes; fall back anyway.
        r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"internal error"}}"#
            .to_string()
    });
    body.push('\n');
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await
}

/// Handle one request. Returns `None` for notifications.
async fn handle(registry: &ToolRegistry, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = request.id?;

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::result(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": "shoptools-server",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),
        "tools/list" => JsonRpcResponse::result(id, list_tools(registry)),
        "tools/call" => call_tool(registry, id, &request.params).await,
        "ping" => JsonRpcResponse::result(id, json!({})),
        other => JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            &format!("unknown method: {other}"),
        ),
    };

    Some(response)
}

fn list_tools(registry: &ToolRegistry) -> Value {
    let tools: Vec<Value> = registry
        .definitions()
        .iter()
        .map(|d| {
            json!({
                "name": d.name,
                "description": d.description,
                "inputSchema": d.input_schema,
            })
        })
        .collect();
    json!({"tools": tools})
}

async fn call_tool(registry: &ToolRegistry, id: Value, params: &Value) -> JsonRpcResponse {
    let Some(name) = params["name"].as_str() else {
        return JsonRpcResponse::error(id, INVALID_PARAMS, "missing tool name");
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    tracing::info!(tool = %name, "tool call");
    let response = registry.call(name, arguments).await;

    let is_error = response.is_error();
    JsonRpcResponse::result(
        id,
        json!({
            "content": [{"type": "text", "text": response.content()}],
            "isError": is_error,
        }),
    )
}
