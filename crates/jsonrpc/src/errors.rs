//! Transport-level error types.
//!
//! [`TransportError`] covers every way an exchange can fail *before* a
//! well-formed envelope is in hand. A structured error carried inside a valid
//! envelope is not a transport failure; it is surfaced as
//! [`crate::RpcError`] through [`crate::Response::content`].

use thiserror::Error;

/// Errors produced while building, sending, or decoding a JSON-RPC exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The client, its cookie store, or a header could not be configured.
    ///
    /// Produced by: HTTP client construction, base URL parsing when reading or
    /// writing cookies, invalid caller-supplied header names or values.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The request could not be encoded as JSON.
    ///
    /// Produced by: [`crate::Request::to_bytes`] when raw params are not valid
    /// JSON, or [`crate::Params::try_add`] when a value has no JSON form.
    #[error("Failed to serialize request: {source}")]
    Serialization {
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP exchange itself failed (DNS, connect, TLS, timeout, body read).
    #[error("Request to {url} failed: {source}")]
    Network {
        /// Endpoint the request was sent to.
        url: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not a well-formed JSON-RPC envelope.
    #[error("Malformed response from {url} (HTTP {status}): {source}")]
    Decoding {
        /// Endpoint the response came from.
        url: String,
        /// HTTP status code of the response.
        status: u16,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
