//! Client configuration for WebUntis access.

use jsonrpc::ClientConfig;
use serde::{Deserialize, Serialize};

/// Public school discovery endpoint.
pub const DEFAULT_DISCOVERY_URL: &str = "https://mobile.webuntis.com/ms/schoolquery2";

/// Client identifier sent with `authenticate`.
pub const DEFAULT_CLIENT_NAME: &str = "untis-rs";

/// Settings shared by discovery and session clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UntisConfig {
    /// Endpoint used by [`crate::search_schools`].
    pub discovery_url: String,
    /// Value of the `client` parameter sent with `authenticate`.
    pub client_name: String,
    /// HTTP settings applied to every client built from this configuration.
    pub transport: ClientConfig,
}

impl Default for UntisConfig {
    fn default() -> Self {
        Self {
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            transport: ClientConfig::default(),
        }
    }
}
