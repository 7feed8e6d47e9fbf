//! Tool registrar modules, organized by resource area.
//!
//! Every module follows the same contract: `register(registry, client)`
//! mounts zero or more named tools as a side effect. Each handler extracts
//! its inputs from the JSON value, builds the operation text and variables,
//! calls the shared execution client, and formats the outcome. Transport
//! failures are converted to error responses here; nothing from a single
//! tool invocation may escape to the host.

pub mod cart;
pub mod collections;
pub mod customers;
pub mod discounts;
pub mod draft_orders;
pub mod fulfillment;
pub mod gift_cards;
pub mod inventory;
pub mod locations;
pub mod metafields;
pub mod orders;
pub mod payouts;
pub mod products;
pub mod reports;
pub mod search;
pub mod segments;
pub mod shop;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::{Client, ClientError, Outcome, format_remote_errors};

/// Mount one tool whose handler is an `async fn(Arc<Client>, Value)`.
pub(crate) fn mount<F, Fut>(
    registry: &mut ToolRegistry,
    client: &Arc<Client>,
    definition: ToolDefinition,
    run: F,
) where
    F: Fn(Arc<Client>, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResponse> + Send + 'static,
{
    let client = Arc::clone(client);
    registry.register(definition, move |input| run(Arc::clone(&client), input));
}

/// Format an execution outcome into the tool-facing contract.
///
/// Remote error lists and transport failures both become formatted error
/// strings; only a clean envelope becomes a success blob.
pub(crate) fn respond(result: Result<Outcome, ClientError>) -> ToolResponse {
    match result {
        Ok(Outcome::Data(envelope)) => match serde_json::to_string_pretty(&envelope) {
            Ok(body) => ToolResponse::Success(body),
            Err(e) => ToolResponse::Error(format!("Failed to serialize response: {e}")),
        },
        Ok(Outcome::Errors(errors)) => {
            ToolResponse::Error(format!("API errors: {}", format_remote_errors(&errors)))
        }
        Err(e) => ToolResponse::Error(format!("Request failed: {e}")),
    }
}

/// Error response for a missing required input field.
pub(crate) fn missing(field: &str) -> ToolResponse {
    ToolResponse::Error(format!("Missing required field: {field}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::shopify::RemoteError;

    use super::*;

    #[test]
    fn test_respond_success_is_pretty_json() {
        let outcome = Outcome::Data(json!({"data": {"shop": {"name": "Test"}}}));
        let response = respond(Ok(outcome));
        assert!(!response.is_error());
        assert!(response.content().contains("\"name\": \"Test\""));
    }

    #[test]
    fn test_respond_remote_errors_become_error_text() {
        let outcome = Outcome::Errors(vec![RemoteError {
            message: "Throttled".to_string(),
            extensions: None,
        }]);
        let response = respond(Ok(outcome));
        assert!(response.is_error());
        assert!(response.content().contains("Throttled"));
    }

    #[test]
    fn test_respond_transport_failure_becomes_error_text() {
        let response = respond(Err(ClientError::EmptyOperation));
        assert!(response.is_error());
        assert!(response.content().contains("Request failed"));
    }
}
