//! Newtype domain identifiers.
//!
//! Server-assigned identities are wrapped in distinct newtypes so that, for
//! example, a [`SchoolId`] cannot be passed where a [`PersonId`] is expected
//! even though both are `i64` on the wire.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for i64-wrapped newtypes (server-assigned integers).
// Generates: struct (Copy, serde-transparent), new(), as_i64(), Display.
// ---------------------------------------------------------------------------
macro_rules! i64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — server-assigned integers
// ---------------------------------------------------------------------------

i64_id! {
    /// Numeric id of a school in the discovery directory.
    SchoolId
}

i64_id! {
    /// Id of the person (student, teacher, ...) a session is logged in as.
    PersonId
}

i64_id! {
    /// Kind of person a session belongs to, as reported by `authenticate`.
    ///
    /// Kept as the raw server code; the mapping to roles differs between
    /// server versions.
    PersonType
}

// ---------------------------------------------------------------------------
// Session token
// ---------------------------------------------------------------------------

/// Opaque server-side session token returned by `authenticate`.
///
/// Echoed back as the `JSESSIONID` cookie on every authenticated call. Never
/// empty, including when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a token, or `None` when the server sent an empty one.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = &'static str;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token).ok_or("session id must not be empty")
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
