//! JSON-RPC 2.0 transport over HTTP.
//!
//! Builds request envelopes, posts them to a single endpoint, keeps a
//! per-client cookie store, and hands back parsed response envelopes. Results
//! stay untyped ([`serde_json::Value`]); callers decode them per method.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, envelope framing, and cookie handling
//! live here. Domain crates see only [`Client`], [`Request`], and
//! [`Response::content`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`envelope`] | `Request`, `Response`, `RpcError` |
//! | [`params`] | `Params` and `Headers` builders |
//! | [`client`] | `Client` and `Cookie` |
//! | [`config`] | `ClientConfig` (timeouts, user agent) |
//! | [`errors`] | `TransportError` |
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use jsonrpc::{Client, Params, Request};
//!
//! let client = Client::new("https://example.com/jsonrpc")?;
//! let response = client.send(&Request::new("getStatus", Params::new())).await?;
//! match response.content() {
//!     Ok(result) => println!("{result}"),
//!     Err(error) => eprintln!("call failed: {error}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod params;

pub use client::{Client, Cookie};
pub use config::ClientConfig;
pub use envelope::{Request, RequestParams, Response, RpcError, JSONRPC_VERSION, REQUEST_ID};
pub use errors::TransportError;
pub use params::{Headers, Params};
