//! Builders for named request parameters and extra HTTP headers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::TransportError;

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

/// Named parameters for a JSON-RPC call, serialized as a JSON object.
///
/// Built up with chained [`add`](Self::add) calls. Once moved into a
/// [`crate::Request`] the collection can no longer be changed.
///
/// ```
/// use jsonrpc::Params;
///
/// let params = Params::new().add("user", "alice").add("client", "untis-rs");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty parameter collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds a parameter from any serializable value.
    ///
    /// Fails with [`TransportError::Serialization`] if `value` has no JSON
    /// representation (e.g. a map with non-string keys).
    pub fn try_add<V: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &V,
    ) -> Result<Self, TransportError> {
        let value =
            serde_json::to_value(value).map_err(|source| TransportError::Serialization { source })?;
        self.0.insert(key.into(), value);
        Ok(self)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Extra HTTP headers merged into an outgoing request.
///
/// Names and values are validated only when the request is sent; an invalid
/// entry then fails the send with [`TransportError::Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a header.
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if no headers have been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
