//! School discovery.

use jsonrpc::{Client, Request, TransportError};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::rpc::{self, SEARCH_SCHOOL};
use crate::{School, Session, UntisConfig, UntisError};

#[derive(Deserialize)]
struct SearchResult {
    schools: Vec<School>,
}

/// Searches the discovery directory for schools matching `query`.
///
/// The call is anonymous. The result must be an object with a `schools`
/// array; every element must carry all [`School`] fields with the right JSON
/// types, otherwise the whole call fails with
/// [`UntisError::ResponseShape`].
#[instrument(skip(config), fields(url = %config.discovery_url))]
pub async fn search_schools(config: &UntisConfig, query: &str) -> Result<Vec<School>, UntisError> {
    let client = Client::with_config(config.discovery_url.as_str(), &config.transport).map_err(|source| {
        UntisError::Transport {
            operation: SEARCH_SCHOOL,
            source,
        }
    })?;

    // The directory expects a positional array, not a keyed object.
    let params = serde_json::to_string(&json!([{ "search": query }])).map_err(|source| {
        UntisError::Transport {
            operation: SEARCH_SCHOOL,
            source: TransportError::Serialization { source },
        }
    })?;

    let result = rpc::call(&client, SEARCH_SCHOOL, &Request::raw(SEARCH_SCHOOL, params)).await?;
    let schools = rpc::decode::<SearchResult>(SEARCH_SCHOOL, result)?.schools;

    debug!(count = schools.len(), "Schools found");
    Ok(schools)
}

impl School {
    /// Logs in to this school's endpoint (see [`School::api_url`]).
    pub async fn login(
        &self,
        config: &UntisConfig,
        username: &str,
        password: &str,
    ) -> Result<Session, UntisError> {
        Session::login(&self.api_url(), config, username, password).await
    }
}
