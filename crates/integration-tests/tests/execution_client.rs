//! Integration tests for the execution client and a full tool round trip.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use shoptools_server::config::{ConfigError, Environment, StorefrontConfig};
use shoptools_server::dispatch;
use shoptools_server::registry::ToolRegistry;
use shoptools_server::shopify::{Client, Transport, TransportError, quote_for_shell};

type SentBodies = Arc<Mutex<Vec<String>>>;

/// Transport that replays a canned response and records every body.
struct Scripted {
    response: String,
    sent: SentBodies,
}

impl Scripted {
    fn new(response: &str) -> (Self, SentBodies) {
        let sent = SentBodies::default();
        (
            Self {
                response: response.to_string(),
                sent: sent.clone(),
            },
            sent,
        )
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn post(&self, body: &str) -> Result<String, TransportError> {
        self.sent
            .lock()
            .expect("sent bodies lock")
            .push(body.to_string());
        Ok(self.response.clone())
    }
}

fn full_env() -> Environment {
    Environment::from_pairs([
        ("SHOPIFY_ACCESS_TOKEN", "shpat_integration"),
        ("SHOPIFY_STORE_URL", "https://test-store.myshopify.com"),
        ("SHOPIFY_API_URL", "https://test-store.myshopify.com/api/graphql"),
    ])
}

fn client_with(response: &str) -> (Arc<Client>, SentBodies) {
    let (transport, sent) = Scripted::new(response);
    let config = StorefrontConfig::from_environment(&full_env()).expect("config");
    (
        Arc::new(Client::with_transport(config, Box::new(transport))),
        sent,
    )
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_missing_any_credential_fails_before_any_network_attempt() {
    let required = ["SHOPIFY_ACCESS_TOKEN", "SHOPIFY_STORE_URL", "SHOPIFY_API_URL"];
    for omitted in required {
        let pairs: Vec<(&str, &str)> = [
            ("SHOPIFY_ACCESS_TOKEN", "shpat_integration"),
            ("SHOPIFY_STORE_URL", "https://test-store.myshopify.com"),
            ("SHOPIFY_API_URL", "https://test-store.myshopify.com/api/graphql"),
        ]
        .into_iter()
        .filter(|(k, _)| *k != omitted)
        .collect();

        let err = StorefrontConfig::from_environment(&Environment::from_pairs(pairs))
            .expect_err("construction must fail");
        assert!(
            matches!(err, ConfigError::MissingEnvVar(ref k) if k == omitted),
            "expected missing {omitted}, got {err}"
        );
    }
}

// =============================================================================
// Escaping
// =============================================================================

#[tokio::test]
async fn test_single_quote_payload_reconstructs_byte_for_byte() {
    let (client, sent) = client_with(r#"{"data":{}}"#);
    client
        .execute(
            "mutation M($title: String!) { productUpdate }",
            Some(json!({"title": "Bob's \"Best\" Board — café ☕ \\ end"})),
        )
        .await
        .expect("execute");

    let bodies = sent.lock().expect("lock");
    let transmitted = &bodies[0];

    // What the shell hands curl after de-quoting the single-quoted word
    // must equal the serialized body exactly.
    let quoted = quote_for_shell(transmitted);
    let dequoted = quoted
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .expect("quoted word")
        .replace("'\\''", "'");
    assert_eq!(&dequoted, transmitted);

    let body: Value = serde_json::from_str(&dequoted).expect("valid JSON after de-quoting");
    assert_eq!(body["variables"]["title"], "Bob's \"Best\" Board — café ☕ \\ end");
}

// =============================================================================
// Full tool round trip
// =============================================================================

#[tokio::test]
async fn test_mounted_tool_formats_data_envelope() {
    let (client, sent) = client_with(r#"{"data":{"shop":{"name":"Integration Test Shop"}}}"#);
    let mut registry = ToolRegistry::new();
    dispatch::mount_enabled(&mut registry, &client, &["essential".to_string()]);

    let response = registry.call("get_shop", json!({})).await;
    assert!(!response.is_error());
    assert!(response.content().contains("Integration Test Shop"));

    let bodies = sent.lock().expect("lock");
    let body: Value = serde_json::from_str(&bodies[0]).expect("body is JSON");
    assert!(body["query"].as_str().expect("query").contains("shop"));
    assert_eq!(body["variables"], json!({}));
}

#[tokio::test]
async fn test_mounted_tool_surfaces_remote_errors_as_error_response() {
    let both = r#"{
        "data": {"shop": {"name": "Should Not Appear"}},
        "errors": [{"message": "Access denied", "extensions": {"code": "ACCESS_DENIED"}}]
    }"#;
    let (client, _sent) = client_with(both);
    let mut registry = ToolRegistry::new();
    dispatch::mount_enabled(&mut registry, &client, &["essential".to_string()]);

    let response = registry.call("get_shop", json!({})).await;
    assert!(response.is_error(), "errors must win over sibling data");
    assert!(response.content().contains("Access denied"));
    assert!(!response.content().contains("Should Not Appear"));
}

#[tokio::test]
async fn test_missing_required_input_never_reaches_transport() {
    let (client, sent) = client_with(r#"{"data":{}}"#);
    let mut registry = ToolRegistry::new();
    dispatch::mount_enabled(&mut registry, &client, &["commerce".to_string()]);

    let response = registry.call("get_order", json!({})).await;
    assert!(response.is_error());
    assert!(response.content().contains("id"));
    assert!(sent.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_transport_failure_becomes_error_response_not_panic() {
    struct Failing;

    #[async_trait]
    impl Transport for Failing {
        async fn post(&self, _body: &str) -> Result<String, TransportError> {
            Err(TransportError::Failed {
                status: 6,
                stderr: "could not resolve host".to_string(),
            })
        }
    }

    let config = StorefrontConfig::from_environment(&full_env()).expect("config");
    let client = Arc::new(Client::with_transport(config, Box::new(Failing)));
    let mut registry = ToolRegistry::new();
    dispatch::mount_enabled(&mut registry, &client, &["essential".to_string()]);

    let response = registry.call("get_shop", json!({})).await;
    assert!(response.is_error());
    assert!(response.content().contains("could not resolve host"));
}
