//! Authenticated sessions against a school endpoint.
//!
//! A [`Session`] moves through three states:
//!
//! ```text
//! Anonymous --authenticate--> Authenticated --logout--> LoggedOut
//! ```
//!
//! `LoggedOut` is terminal. Every authenticated operation on an anonymous or
//! logged-out session fails with [`UntisError::NotLoggedIn`] before any
//! request is sent; a new session must be created to log in again.

use jsonrpc::{Client, Cookie, Params, Request};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::rpc::{self, AUTHENTICATE, GET_SUBJECTS, GET_TEACHERS, LOGOUT};
use crate::{PersonId, PersonType, SessionId, SessionInfo, Timestamp, UntisConfig, UntisError};

/// Cookie that carries the session id on authenticated calls.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Created but never authenticated.
    Anonymous,
    /// Logged in; authenticated operations are allowed.
    Authenticated(SessionInfo),
    /// Logged out. No further operations are possible.
    LoggedOut,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    person_type: PersonType,
    person_id: PersonId,
}

/// A client session against one school endpoint.
///
/// The session exclusively owns its [`Client`] and cookie store. State
/// changes take `&mut self`; use one session per task when working
/// concurrently.
#[derive(Debug)]
pub struct Session {
    client: Client,
    state: SessionState,
}

impl Session {
    /// Wraps `client` in an anonymous session.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: SessionState::Anonymous,
        }
    }

    /// Creates a client for `endpoint` and authenticates with the given
    /// credentials, using `config` for transport settings and client name.
    pub async fn login(
        endpoint: &str,
        config: &UntisConfig,
        username: &str,
        password: &str,
    ) -> Result<Self, UntisError> {
        let client = Client::with_config(endpoint, &config.transport).map_err(|source| {
            UntisError::Transport {
                operation: AUTHENTICATE,
                source,
            }
        })?;

        let mut session = Self::new(client);
        session
            .authenticate(username, password, &config.client_name)
            .await?;
        Ok(session)
    }

    /// Sends `authenticate` and, on success, attaches the session cookie.
    ///
    /// The result must be an object with a string `sessionId` (otherwise
    /// [`UntisError::Authentication`]) and integer `personType` and `personId`
    /// (otherwise [`UntisError::ResponseShape`]).
    #[instrument(skip(self, password, client_name), fields(url = %self.client.url()))]
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
        client_name: &str,
    ) -> Result<(), UntisError> {
        match self.state {
            SessionState::Anonymous => {}
            SessionState::Authenticated(_) => return Err(UntisError::AlreadyAuthenticated),
            SessionState::LoggedOut => {
                return Err(UntisError::NotLoggedIn {
                    operation: AUTHENTICATE,
                })
            }
        }

        let params = Params::new()
            .add("user", username)
            .add("password", password)
            .add("client", client_name);
        let result = rpc::call(&self.client, AUTHENTICATE, &Request::new(AUTHENTICATE, params)).await?;

        if !result.is_object() {
            return Err(UntisError::shape(AUTHENTICATE, "result is not an object"));
        }
        let session_id = result
            .get("sessionId")
            .and_then(Value::as_str)
            .and_then(SessionId::new)
            .ok_or(UntisError::Authentication {
                operation: AUTHENTICATE,
            })?;
        let person: Person = rpc::decode(AUTHENTICATE, result)?;

        self.client
            .add_cookie(&Cookie::new(SESSION_COOKIE, session_id.as_str()))
            .map_err(|source| UntisError::Transport {
                operation: AUTHENTICATE,
                source,
            })?;

        info!(person_id = %person.person_id, person_type = %person.person_type, "Session established");

        self.state = SessionState::Authenticated(SessionInfo {
            session_id,
            person_type: person.person_type,
            person_id: person.person_id,
            authenticated_at: Timestamp::now(),
        });
        Ok(())
    }

    /// Ends the session on the server.
    ///
    /// On success the session becomes [`SessionState::LoggedOut`] for good.
    /// If the call fails the session stays authenticated.
    #[instrument(skip(self), fields(url = %self.client.url()))]
    pub async fn logout(&mut self) -> Result<(), UntisError> {
        self.require_login(LOGOUT)?;

        rpc::call(&self.client, LOGOUT, &Request::new(LOGOUT, Params::new())).await?;

        self.state = SessionState::LoggedOut;
        info!("Session closed");
        Ok(())
    }

    /// Lists teachers. May require extra permissions on the server.
    ///
    /// The result is returned untyped.
    pub async fn teachers(&self) -> Result<Value, UntisError> {
        self.authenticated_call(GET_TEACHERS).await
    }

    /// Lists subjects. The result is returned untyped.
    pub async fn subjects(&self) -> Result<Value, UntisError> {
        self.authenticated_call(GET_SUBJECTS).await
    }

    /// Returns `true` while the session is authenticated.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Returns the session details while authenticated.
    pub fn info(&self) -> Option<&SessionInfo> {
        match &self.state {
            SessionState::Authenticated(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the underlying transport client.
    pub fn transport(&self) -> &Client {
        &self.client
    }

    #[instrument(skip(self), fields(url = %self.client.url()))]
    async fn authenticated_call(&self, operation: &'static str) -> Result<Value, UntisError> {
        self.require_login(operation)?;
        rpc::call(&self.client, operation, &Request::new(operation, Params::new())).await
    }

    fn require_login(&self, operation: &'static str) -> Result<(), UntisError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(UntisError::NotLoggedIn { operation })
        }
    }
}
