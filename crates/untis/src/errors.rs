//! Error type for WebUntis operations.
//!
//! Every variant that can arise from a call carries the JSON-RPC method name
//! (`operation`) so failures read as "which call, what went wrong".
//! Transport-level kinds (configuration, serialization, network, decoding)
//! stay in the wrapped [`TransportError`].

use jsonrpc::{RpcError, TransportError};
use thiserror::Error;

/// Errors returned by [`crate::search_schools`] and [`crate::Session`].
#[derive(Debug, Error)]
pub enum UntisError {
    /// The exchange failed below the envelope level.
    #[error("{operation}: {source}")]
    Transport {
        /// JSON-RPC method being called.
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The server answered with a structured error.
    ///
    /// The wrapped [`RpcError`] displays as `"message (code)"`.
    #[error("{operation} failed: {error}")]
    Protocol {
        /// JSON-RPC method being called.
        operation: &'static str,
        /// Error carried in the response envelope.
        error: RpcError,
    },

    /// The call succeeded but its result did not have the expected shape.
    ///
    /// Decoding is strict: one malformed record fails the whole call.
    #[error("{operation}: unexpected response shape: {message}")]
    ResponseShape {
        /// JSON-RPC method being called.
        operation: &'static str,
        /// Which field or structure was missing or mistyped.
        message: String,
    },

    /// `authenticate` succeeded at the transport level but returned no session id.
    #[error("{operation} failed: server did not return a session id")]
    Authentication {
        /// JSON-RPC method being called.
        operation: &'static str,
    },

    /// The operation needs an authenticated session, and this one is either
    /// anonymous or logged out.
    #[error("{operation} requires an active session")]
    NotLoggedIn {
        /// Operation that was refused.
        operation: &'static str,
    },

    /// `authenticate` was called on a session that is already authenticated.
    #[error("Session is already authenticated")]
    AlreadyAuthenticated,
}

impl UntisError {
    /// Returns the server's structured error, if this is a protocol failure.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::Protocol { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the operation this error is tagged with, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Transport { operation, .. }
            | Self::Protocol { operation, .. }
            | Self::ResponseShape { operation, .. }
            | Self::Authentication { operation }
            | Self::NotLoggedIn { operation } => Some(*operation),
            Self::AlreadyAuthenticated => None,
        }
    }

    pub(crate) fn shape(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseShape {
            operation,
            message: message.into(),
        }
    }
}
