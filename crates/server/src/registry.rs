//! Tool registry: the server handle module registrars mount tools onto.
//!
//! The registry is built once at startup by dispatch and is read-only while
//! serving. It performs no validation of what a registrar mounts; a tool
//! registered under an already-taken name silently replaces the earlier
//! entry.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// Descriptive metadata for one mounted tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// What the tool does, shown to the calling agent.
    pub description: String,
    /// Access scope the remote API requires for this operation.
    pub required_scope: String,
    /// Category the tool is documented under.
    pub category: String,
    /// JSON Schema for the tool's input.
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Convenience constructor used by registrar modules.
    #[must_use]
    pub fn new(
        name: &str,
        description: &str,
        required_scope: &str,
        category: &str,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required_scope: required_scope.to_string(),
            category: category.to_string(),
            input_schema,
        }
    }
}

/// Content payload returned to the host from one tool invocation.
///
/// Either a formatted success JSON blob or a formatted error string, never
/// an unhandled error propagated to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResponse {
    /// Formatted JSON result.
    Success(String),
    /// Human-readable error text.
    Error(String),
}

impl ToolResponse {
    /// Whether this response reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The payload text, success or error.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Success(s) | Self::Error(s) => s,
        }
    }
}

type BoxedHandler =
    Arc<dyn Fn(Value) -> Pin<Box<dyn Future<Output = ToolResponse> + Send>> + Send + Sync>;

struct Entry {
    definition: ToolDefinition,
    handler: BoxedHandler,
}

/// Insertion-ordered table of mounted tools.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a tool.
    ///
    /// Registering a name twice replaces the earlier entry in place:
    /// last registration wins, no error raised.
    pub fn register<F, Fut>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResponse> + Send + 'static,
    {
        let handler: BoxedHandler = Arc::new(move |input| Box::pin(handler(input)));
        let name = definition.name.clone();
        let entry = Entry {
            definition,
            handler,
        };

        if let Some(&slot) = self.index.get(&name) {
            if let Some(existing) = self.entries.get_mut(slot) {
                *existing = entry;
                return;
            }
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(entry);
    }

    /// Definitions of all mounted tools, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.entries.iter().map(|e| &e.definition).collect()
    }

    /// Number of mounted tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke a tool by name.
    ///
    /// Unknown names yield a formatted error response rather than an error,
    /// so a stale tool list on the host side cannot crash the connection.
    pub async fn call(&self, name: &str, input: Value) -> ToolResponse {
        let Some(entry) = self.index.get(name).and_then(|&i| self.entries.get(i)) else {
            return ToolResponse::Error(format!("Unknown tool: {name}"));
        };
        (entry.handler)(input).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn definition(name: &str) -> ToolDefinition {
        ToolDefinition::new(name, "test tool", "read_shop", "essential", json!({"type": "object"}))
    }

    fn echo(tag: &'static str) -> impl Fn(Value) -> std::future::Ready<ToolResponse> {
        move |input| std::future::ready(ToolResponse::Success(format!("{tag}:{input}")))
    }

    #[tokio::test]
    async fn test_register_and_call() {
        let mut registry = ToolRegistry::new();
        registry.register(definition("get_shop"), echo("a"));

        let response = registry.call("get_shop", json!({"x": 1})).await;
        assert_eq!(response, ToolResponse::Success("a:{\"x\":1}".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_response() {
        let registry = ToolRegistry::new();
        let response = registry.call("missing", json!({})).await;
        assert!(response.is_error());
        assert!(response.content().contains("missing"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_overwrites_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(definition("get_shop"), echo("first"));
        registry.register(definition("get_orders"), echo("orders"));
        registry.register(definition("get_shop"), echo("second"));

        assert_eq!(registry.len(), 2);
        let names: Vec<&str> = registry
            .definitions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["get_shop", "get_orders"]);

        let response = registry.call("get_shop", json!(null)).await;
        assert_eq!(response, ToolResponse::Success("second:null".to_string()));
    }

    #[test]
    fn test_definitions_preserve_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["c", "a", "b"] {
            registry.register(definition(name), echo("x"));
        }
        let names: Vec<&str> = registry
            .definitions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
