//! Storefront API execution client.
//!
//! One shared client instance performs single-shot authenticated GraphQL
//! submissions for every mounted tool. A call maps to exactly one outbound
//! request: no retries, no timeout, no connection reuse, no caching.
//!
//! Error model:
//! - A well-formed remote error list is *data* ([`Outcome::Errors`]), not a
//!   Rust error; registrars format it into a normal tool response.
//! - A failed round trip (process failure, unparseable body) is a
//!   [`ClientError`] returned from `execute`; registrars catch it and turn
//!   it into an error response rather than letting it escalate.

mod client;
mod transport;

pub use client::Client;
pub use transport::{CurlTransport, Transport, TransportError, quote_for_shell};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by [`Client::execute`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The operation text was empty; no request was issued.
    #[error("Empty operation text")]
    EmptyOperation,

    /// The outbound call itself failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not valid JSON.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A single error returned by the remote endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    /// Error message.
    pub message: String,
    /// Optional structured error detail (error codes, costs, etc.).
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// Normalized result of a successful round trip.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The full parsed response envelope.
    Data(serde_json::Value),
    /// The remote endpoint returned an error list. When both `errors` and
    /// `data` are present, only the errors are surfaced.
    Errors(Vec<RemoteError>),
}

/// Join remote error messages for display in a tool response.
#[must_use]
pub fn format_remote_errors(errors: &[RemoteError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
