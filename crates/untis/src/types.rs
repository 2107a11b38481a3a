//! Domain value types decoded from untyped call results.
//!
//! Field names follow the server's camelCase JSON so the same types can be
//! decoded from results and re-emitted (e.g. by the CLI) without a mapping
//! layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PersonId, PersonType, SchoolId, SessionId};

/// Path of the JSON-RPC endpoint on a school server.
const API_PATH: &str = "/WebUntis/jsonrpc.do";

// ---------------------------------------------------------------------------
// Schools
// ---------------------------------------------------------------------------

/// A school entry returned by the discovery directory.
///
/// Every field is required; see [`crate::search_schools`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// Host name of the server that hosts this school (e.g. `"s1.webuntis.com"`).
    pub server: String,
    /// Postal address.
    pub address: String,
    /// Human-readable school name.
    pub display_name: String,
    /// Short name used to select the school on its server.
    pub login_name: String,
    /// Directory id of the school.
    pub school_id: SchoolId,
    /// Base URL of the hosting server.
    pub server_url: String,
}

impl School {
    /// Returns the JSON-RPC endpoint for this school:
    /// `https://<server>/WebUntis/jsonrpc.do?school=<loginName>`.
    pub fn api_url(&self) -> String {
        Self::endpoint(&self.server, &self.login_name)
    }

    /// Builds the JSON-RPC endpoint for a school from its server host and
    /// login name, without a directory lookup.
    pub fn endpoint(server: &str, login_name: &str) -> String {
        format!("https://{server}{API_PATH}?school={login_name}")
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Details of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Server-issued session token.
    pub session_id: SessionId,
    /// Kind of person logged in.
    pub person_type: PersonType,
    /// Id of the person logged in.
    pub person_id: PersonId,
    /// When `authenticate` succeeded.
    pub authenticated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// When a session was established, in UTC. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub(crate) fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}
