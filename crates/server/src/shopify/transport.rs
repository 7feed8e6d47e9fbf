//! Command-line transport for the execution client.
//!
//! Requests are delivered by a `curl` child process launched through
//! `sh -c`. The serialized request body is embedded in the command string
//! as a single-quoted shell word, so every single quote inside the payload
//! must be rewritten as `'\''`; otherwise the quote would terminate the
//! word and the endpoint would receive a corrupted body. That escaping is
//! correctness-critical, not cosmetic: variable values routinely carry
//! apostrophes.

use async_trait::async_trait;
use tokio::process::Command;

use thiserror::Error;

use crate::config::StorefrontConfig;

/// Errors from the outbound call itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The child process could not be spawned.
    #[error("Failed to launch transport process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The child process exited unsuccessfully.
    #[error("Transport process failed (status {status}): {stderr}")]
    Failed {
        /// Exit status code, or -1 when terminated by signal.
        status: i32,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The response bytes were not valid UTF-8.
    #[error("Transport returned non-UTF-8 output")]
    InvalidUtf8,
}

/// One-shot delivery of a serialized request body.
///
/// The production implementation is [`CurlTransport`]; tests substitute a
/// scripted implementation to exercise response normalization offline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the body to the configured endpoint and return the raw
    /// response body.
    async fn post(&self, body: &str) -> Result<String, TransportError>;
}

/// Delivers requests via `curl` run through `sh -c`.
pub struct CurlTransport {
    api_url: String,
    bearer_token: String,
}

impl CurlTransport {
    /// Build a transport from resolved connection configuration.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            bearer_token: config.token().to_string(),
        }
    }

    /// Assemble the full shell command for one request.
    fn command_line(&self, body: &str) -> String {
        let auth = format!("Authorization: Bearer {}", self.bearer_token);
        format!(
            "curl -sS -X POST -H {} -H {} -d {} {}",
            quote_for_shell("Content-Type: application/json"),
            quote_for_shell(&auth),
            quote_for_shell(body),
            quote_for_shell(&self.api_url),
        )
    }
}

#[async_trait]
impl Transport for CurlTransport {
    async fn post(&self, body: &str) -> Result<String, TransportError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(self.command_line(body))
            .output()
            .await?;

        if !output.status.success() {
            return Err(TransportError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| TransportError::InvalidUtf8)
    }
}

/// Wrap a string as a single-quoted shell word.
///
/// Inside single quotes the shell treats every byte literally except the
/// closing quote, so the only rewrite needed is `'` -> `'\''` (close the
/// word, emit an escaped quote, reopen the word). Backslashes and multibyte
/// sequences pass through untouched and the receiving process reconstructs
/// the original payload byte-for-byte.
#[must_use]
pub fn quote_for_shell(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reverse [`quote_for_shell`]: what a POSIX shell hands the child
    /// process for a single argument built from one quoted word.
    fn shell_unquote(quoted: &str) -> String {
        let inner = quoted
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .expect("quoted word");
        inner.replace("'\\''", "'")
    }

    #[test]
    fn test_plain_payload_round_trips() {
        let body = r#"{"query":"{ shop { name } }","variables":{}}"#;
        assert_eq!(shell_unquote(&quote_for_shell(body)), body);
    }

    #[test]
    fn test_single_quote_round_trips() {
        let body = r#"{"query":"mutation","variables":{"title":"Bob's Board"}}"#;
        let quoted = quote_for_shell(body);
        assert!(quoted.contains(r"'\''"));
        assert_eq!(shell_unquote(&quoted), body);
    }

    #[test]
    fn test_backslashes_round_trip() {
        let body = r#"{"variables":{"note":"C:\\store\\inbox \"quoted\""}}"#;
        assert_eq!(shell_unquote(&quote_for_shell(body)), body);
    }

    #[test]
    fn test_unicode_round_trips() {
        let body = r#"{"variables":{"title":"café ☕ — 店舗"}}"#;
        assert_eq!(shell_unquote(&quote_for_shell(body)), body);
    }

    #[test]
    fn test_consecutive_quotes_round_trip() {
        let body = "it''s";
        assert_eq!(shell_unquote(&quote_for_shell(body)), body);
    }

    #[test]
    fn test_command_line_carries_bearer_header_and_endpoint() {
        let config = crate::config::StorefrontConfig::from_environment(
            &crate::config::Environment::from_pairs([
                ("SHOPIFY_ACCESS_TOKEN", "shpat_abc123"),
                ("SHOPIFY_STORE_URL", "https://s.myshopify.com"),
                ("SHOPIFY_API_URL", "https://s.myshopify.com/api/graphql"),
            ]),
        )
        .expect("config");
        let transport = CurlTransport::new(&config);

        let line = transport.command_line("{}");
        assert!(line.starts_with("curl -sS -X POST"));
        assert!(line.contains("'Authorization: Bearer shpat_abc123'"));
        assert!(line.contains("'Content-Type: application/json'"));
        assert!(line.ends_with("'https://s.myshopify.com/api/graphql'"));
    }
}
