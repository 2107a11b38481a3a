//! WebUntis client: school discovery, session login, and authenticated queries.
//!
//! All calls go through the [`jsonrpc`] transport. Results arrive untyped and
//! are decoded here, per call, into the domain types below; a result that does
//! not match fails with [`UntisError::ResponseShape`] rather than panicking.
//!
//! ## Architectural Layer
//!
//! **Domain.** This crate maps documented method names onto typed operations.
//! It never inspects envelope fields directly; every outcome is taken from
//! [`jsonrpc::Response::content`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype ids (`SchoolId`, `PersonId`, `SessionId`, ...) |
//! | [`types`] | `School`, `SessionInfo`, `Timestamp` |
//! | [`schools`] | `search_schools`, `School::login` |
//! | [`session`] | `Session` and its lifecycle |
//! | [`config`] | `UntisConfig` |
//! | [`errors`] | `UntisError` |
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> Result<(), untis::UntisError> {
//! use untis::{search_schools, UntisConfig};
//!
//! let config = UntisConfig::default();
//! let schools = search_schools(&config, "example").await?;
//! if let Some(school) = schools.first() {
//!     let mut session = school.login(&config, "student", "secret").await?;
//!     let subjects = session.subjects().await?;
//!     println!("{subjects}");
//!     session.logout().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod schools;
pub mod session;
pub mod types;

mod rpc;

pub use config::{UntisConfig, DEFAULT_CLIENT_NAME, DEFAULT_DISCOVERY_URL};
pub use errors::UntisError;
pub use identifiers::{PersonId, PersonType, SchoolId, SessionId};
pub use schools::search_schools;
pub use session::{Session, SessionState, SESSION_COOKIE};
pub use types::{School, SessionInfo, Timestamp};
