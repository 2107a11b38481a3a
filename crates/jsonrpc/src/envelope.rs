//! JSON-RPC 2.0 request and response envelopes.
//!
//! Parameters and results stay untyped ([`serde_json::Value`]) at this layer;
//! callers decode results into their own types per method.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use thiserror::Error;

use crate::{Params, TransportError};

/// Protocol version tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id used for every call.
///
/// Calls are sequential per client, so responses are never correlated by id.
pub const REQUEST_ID: &str = "0";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Parameters of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestParams {
    /// A keyed JSON object.
    Named(Value),
    /// Pre-formatted JSON text, embedded verbatim (e.g. a positional array).
    ///
    /// Validity is checked when the request is serialized. The text is not
    /// kept on decode: a serialized raw request reads back as [`Self::Named`]
    /// holding the equivalent JSON value.
    Raw(String),
}

impl Serialize for RequestParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(value) => value.serialize(serializer),
            Self::Raw(text) => {
                let raw: &RawValue = serde_json::from_str(text).map_err(S::Error::custom)?;
                raw.serialize(serializer)
            }
        }
    }
}

/// Always yields [`RequestParams::Named`]; the wire form does not record
/// whether params were built as raw text.
impl<'de> Deserialize<'de> for RequestParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Named)
    }
}

/// A JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation id; always [`REQUEST_ID`] for requests built here.
    pub id: String,
    /// Remote method name.
    pub method: String,
    /// Method parameters.
    pub params: RequestParams,
    /// Protocol version tag.
    pub jsonrpc: String,
}

impl Request {
    /// Builds a request whose params are a keyed object.
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self::with_params(method, RequestParams::Named(params.into_value()))
    }

    /// Builds a request whose params are pre-formatted JSON text.
    ///
    /// Use this when the method expects something other than a keyed object,
    /// such as a positional array:
    ///
    /// ```
    /// use jsonrpc::Request;
    ///
    /// let request = Request::raw("searchSchool", r#"[{"search":"example"}]"#);
    /// let body = String::from_utf8(request.to_bytes().unwrap()).unwrap();
    /// assert!(body.contains(r#""params":[{"search":"example"}]"#));
    /// ```
    pub fn raw(method: impl Into<String>, params: impl Into<String>) -> Self {
        Self::with_params(method, RequestParams::Raw(params.into()))
    }

    fn with_params(method: impl Into<String>, params: RequestParams) -> Self {
        Self {
            id: REQUEST_ID.to_string(),
            method: method.into(),
            params,
            jsonrpc: JSONRPC_VERSION.to_string(),
        }
    }

    /// Encodes the request as a JSON body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransportError> {
        serde_json::to_vec(self).map_err(|source| TransportError::Serialization { source })
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Structured error carried inside a response envelope.
///
/// Displays as `"message (code)"`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct RpcError {
    /// Numeric error code.
    pub code: i64,
    /// Human-readable description.
    pub message: String,
}

/// A JSON-RPC response envelope.
///
/// Servers are not consistent about echoing `id` and `jsonrpc`, so both are
/// optional. A missing `result` decodes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Echoed correlation id.
    #[serde(default)]
    pub id: Option<String>,
    /// Untyped call result.
    #[serde(default)]
    pub result: Value,
    /// Structured error, if the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    /// Protocol version tag.
    #[serde(default)]
    pub jsonrpc: Option<String>,
}

impl Response {
    /// Extracts the outcome of the call.
    ///
    /// A present error always wins, even if a result is also present.
    /// Otherwise the result is returned as-is, whatever its JSON shape
    /// (including `null`).
    pub fn content(self) -> Result<Value, RpcError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}
