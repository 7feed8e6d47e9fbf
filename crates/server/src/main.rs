//! Shoptools server binary.
//!
//! Serves the mounted tool registry over stdio. Which categories are
//! mounted is decided once at startup from the environment; changing the
//! selection requires a restart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use shoptools_server::config::{Environment, StorefrontConfig};
use shoptools_server::registry::ToolRegistry;
use shoptools_server::shopify::Client;
use shoptools_server::{catalog, dispatch, resolver, stdio};

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let env = Environment::from_process();

    // Fatal without credentials: no degraded mode exists.
    let config = StorefrontConfig::from_environment(&env).expect("Failed to load configuration");
    let client = Arc::new(Client::new(config));

    let enabled = resolver::resolve(&env);
    let declared = catalog::total_declared_tool_count(enabled.iter().map(String::as_str));

    let mut registry = ToolRegistry::new();
    dispatch::mount_enabled(&mut registry, &client, &enabled);

    tracing::info!(
        categories = ?enabled,
        declared_tools = declared,
        mounted_tools = registry.len(),
        "serving on stdio"
    );

    stdio::serve(&registry).await.expect("stdio loop failed");
}

/// Initialize tracing with EnvFilter.
///
/// Logs go to stderr so stdout stays reserved for the JSON-RPC stream.
/// `LOG_FORMAT=json` switches to structured output for log collectors.
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoptools_server=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
