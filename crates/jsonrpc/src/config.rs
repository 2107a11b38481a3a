//! HTTP transport configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("untis-rs/", env!("CARGO_PKG_VERSION"));

/// Settings applied to the HTTP client behind a [`crate::Client`].
///
/// Timeouts are unset by default, in which case the HTTP stack's own defaults
/// apply. Set them explicitly for anything long-running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Total time allowed for one exchange, in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Time allowed to establish a connection, in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            connect_timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Sets the per-exchange timeout.
    ///
    /// Stored at millisecond resolution; a sub-millisecond remainder rounds
    /// up so a non-zero duration never becomes zero.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(millis_rounded_up(timeout));
        self
    }

    /// Sets the connect timeout. Rounds like [`with_timeout`](Self::with_timeout).
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(millis_rounded_up(timeout));
        self
    }

    /// Returns the per-exchange timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the connect timeout, if configured.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }
}

fn millis_rounded_up(duration: Duration) -> u64 {
    let partial = u128::from(duration.subsec_nanos() % 1_000_000 != 0);
    u64::try_from(duration.as_millis() + partial).unwrap_or(u64::MAX)
}
