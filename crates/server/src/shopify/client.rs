//! Execution client: operation text + variables in, data-or-errors out.

use serde_json::{Value, json};
use tracing::instrument;

use crate::config::StorefrontConfig;

use super::{ClientError, CurlTransport, Outcome, RemoteError, Transport};

/// Authenticated single-shot executor for storefront GraphQL operations.
///
/// Holds the connection configuration resolved once at startup and is
/// shared by reference across every module registrar. The configuration is
/// read-only after construction, so concurrent `execute` calls are safe
/// without locks.
pub struct Client {
    config: StorefrontConfig,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client with the production `curl` transport.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let transport = Box::new(CurlTransport::new(&config));
        Self { config, transport }
    }

    /// Create a client with a custom transport (used by tests).
    #[must_use]
    pub fn with_transport(config: StorefrontConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The store base URL this client was configured with.
    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.config.store_url
    }

    /// Execute one operation against the configured endpoint.
    ///
    /// Omitted `variables` are sent as an empty object. A response envelope
    /// carrying an `errors` field yields [`Outcome::Errors`], even when a
    /// sibling `data` field is present; otherwise the full envelope is
    /// returned as [`Outcome::Data`].
    ///
    /// # Errors
    ///
    /// `ClientError::EmptyOperation` if `operation` is blank (no request is
    /// issued); `ClientError::Transport` / `ClientError::Parse` when the
    /// round trip fails or the body is not JSON.
    #[instrument(skip(self, operation, variables))]
    pub async fn execute(
        &self,
        operation: &str,
        variables: Option<Value>,
    ) -> Result<Outcome, ClientError> {
        if operation.trim().is_empty() {
            return Err(ClientError::EmptyOperation);
        }

        let body = json!({
            "query": operation,
            "variables": variables.unwrap_or_else(|| json!({})),
        });

        let raw = self.transport.post(&body.to_string()).await?;
        normalize_response(&raw)
    }
}

/// Normalize a raw response body into data-or-errors.
fn normalize_response(raw: &str) -> Result<Outcome, ClientError> {
    let envelope: Value = serde_json::from_str(raw)?;

    if let Some(errors) = envelope.get("errors") {
        let errors: Vec<RemoteError> = serde_json::from_value(errors.clone())?;
        return Ok(Outcome::Errors(errors));
    }

    Ok(Outcome::Data(envelope))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;

    use crate::config::Environment;
    use crate::shopify::TransportError;

    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig::from_environment(&Environment::from_pairs([
            ("SHOPIFY_ACCESS_TOKEN", "shpat_test"),
            ("SHOPIFY_STORE_URL", "https://s.myshopify.com"),
            ("SHOPIFY_API_URL", "https://s.myshopify.com/api/graphql"),
        ]))
        .unwrap()
    }

    type SentBodies = std::sync::Arc<std::sync::Mutex<Vec<String>>>;

    /// Transport that returns a canned body and records each request.
    struct Scripted {
        response: Result<String, ()>,
        sent: SentBodies,
    }

    impl Scripted {
        fn ok(body: &str) -> (Self, SentBodies) {
            let sent = SentBodies::default();
            (
                Self {
                    response: Ok(body.to_string()),
                    sent: sent.clone(),
                },
                sent,
            )
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                sent: SentBodies::default(),
            }
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn post(&self, body: &str) -> Result<String, TransportError> {
            self.sent.lock().unwrap().push(body.to_string());
            self.response.clone().map_err(|()| TransportError::Failed {
                status: 7,
                stderr: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_operation_is_rejected_before_transport() {
        let (transport, sent) = Scripted::ok("{}");
        let client = Client::with_transport(test_config(), Box::new(transport));
        let err = client.execute("   ", None).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyOperation));
        assert!(sent.lock().unwrap().is_empty(), "no request may be issued");
    }

    #[tokio::test]
    async fn test_omitted_variables_become_empty_object() {
        let (transport, sent) = Scripted::ok(r#"{"data":{}}"#);
        let client = Client::with_transport(test_config(), Box::new(transport));
        client.execute("{ shop { name } }", None).await.unwrap();

        let bodies = sent.lock().unwrap();
        let body: Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(body["variables"], json!({}));
    }

    #[tokio::test]
    async fn test_body_pairs_query_and_variables() {
        let (transport, sent) = Scripted::ok(r#"{"data":{}}"#);
        let client = Client::with_transport(test_config(), Box::new(transport));
        client
            .execute("query Q { shop { name } }", Some(json!({"first": 3})))
            .await
            .unwrap();

        let bodies = sent.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        let body: Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(body["query"], "query Q { shop { name } }");
        assert_eq!(body["variables"]["first"], 3);
    }

    #[tokio::test]
    async fn test_errors_win_over_sibling_data() {
        let body = r#"{
            "data": {"shop": {"name": "Test"}},
            "errors": [{"message": "Throttled", "extensions": {"code": "THROTTLED"}}]
        }"#;
        let (transport, _sent) = Scripted::ok(body);
        let client = Client::with_transport(test_config(), Box::new(transport));

        let outcome = client.execute("{ shop { name } }", None).await.unwrap();
        match outcome {
            Outcome::Errors(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Throttled");
                assert_eq!(errors[0].extensions.as_ref().unwrap()["code"], "THROTTLED");
            }
            Outcome::Data(_) => panic!("errors must shadow data"),
        }
    }

    #[tokio::test]
    async fn test_envelope_without_errors_is_returned_whole() {
        let body = r#"{"data":{"shop":{"name":"Test"}},"extensions":{"cost":1}}"#;
        let (transport, _sent) = Scripted::ok(body);
        let client = Client::with_transport(test_config(), Box::new(transport));

        let outcome = client.execute("{ shop { name } }", None).await.unwrap();
        match outcome {
            Outcome::Data(envelope) => {
                assert_eq!(envelope["data"]["shop"]["name"], "Test");
                assert_eq!(envelope["extensions"]["cost"], 1);
            }
            Outcome::Errors(_) => panic!("no errors expected"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_raised() {
        let client = Client::with_transport(test_config(), Box::new(Scripted::failing()));
        let err = client.execute("{ shop { name } }", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_raised() {
        let (transport, _sent) = Scripted::ok("<html>502");
        let client = Client::with_transport(test_config(), Box::new(transport));
        let err = client.execute("{ shop { name } }", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn test_normalize_empty_errors_list_is_still_errors() {
        let outcome = normalize_response(r#"{"data":{},"errors":[]}"#).unwrap();
        assert!(matches!(outcome, Outcome::Errors(ref e) if e.is_empty()));
    }
}
