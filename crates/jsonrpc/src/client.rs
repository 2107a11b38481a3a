//! Cookie-aware JSON-RPC client over HTTP POST.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, warn};

use crate::{ClientConfig, Headers, Request, Response, TransportError};

// ---------------------------------------------------------------------------
// Cookie
// ---------------------------------------------------------------------------

/// A named cookie held in a [`Client`]'s store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cookie {
    /// Cookie name (e.g. `JSESSIONID`).
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl Cookie {
    /// Creates a cookie from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Checks the name against the RFC 6265 token grammar and the value
    /// against cookie-octets, so the pair survives storage unchanged.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.name.is_empty() || !self.name.bytes().all(is_token_byte) {
            return Err(TransportError::configuration(format!(
                "Invalid cookie name '{}'",
                self.name
            )));
        }
        if !self.value.bytes().all(is_cookie_octet) {
            return Err(TransportError::configuration(format!(
                "Invalid value for cookie '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

impl std::fmt::Display for Cookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A JSON-RPC client bound to one endpoint.
///
/// Each client owns its cookie store. Cookies set by the server are retained
/// automatically and every request carries the cookies visible for the base
/// URL. Manual cookie changes go through [`add_cookie`](Self::add_cookie),
/// which takes `&mut self`: sharing one client between tasks requires external
/// synchronization.
///
/// Requests are sent one at a time with the fixed id `"0"`; there is no
/// support for several in-flight calls on the same client.
pub struct Client {
    url: String,
    http: reqwest::Client,
    cookies: Arc<Jar>,
}

impl Client {
    /// Creates a client for `url` with default transport settings.
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_config(url, &ClientConfig::default())
    }

    /// Creates a client for `url` with the given transport settings.
    pub fn with_config(url: impl Into<String>, config: &ClientConfig) -> Result<Self, TransportError> {
        let cookies = Arc::new(Jar::default());

        let mut builder = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| TransportError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
            cookies,
        })
    }

    /// Returns the endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `request` without extra headers.
    pub async fn send(&self, request: &Request) -> Result<Response, TransportError> {
        self.send_with_headers(request, &Headers::new()).await
    }

    /// Sends `request`, merging `headers` into the outgoing header set.
    ///
    /// The response body is read in full before decoding, whether or not it
    /// turns out to be a valid envelope. The HTTP status is not interpreted:
    /// servers report failures inside the envelope.
    #[tracing::instrument(level = "debug", skip_all, fields(url = %self.url, method = %request.method))]
    pub async fn send_with_headers(
        &self,
        request: &Request,
        headers: &Headers,
    ) -> Result<Response, TransportError> {
        let body = request.to_bytes()?;
        let extra = header_map(headers)?;

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .headers(extra)
            .body(body)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Network {
                url: self.url.clone(),
                source,
            })?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "JSON-RPC exchange completed");

        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(status = status.as_u16(), error = %source, "Response is not a JSON-RPC envelope");
            TransportError::Decoding {
                url: self.url.clone(),
                status: status.as_u16(),
                source,
            }
        })
    }

    /// Stores `cookie` against this client's base URL.
    ///
    /// Fails with [`TransportError::Configuration`] if the name or value is
    /// not valid cookie syntax, or if the store does not hold the pair
    /// afterwards.
    pub fn add_cookie(&mut self, cookie: &Cookie) -> Result<(), TransportError> {
        cookie.validate()?;
        let url = self.parsed_url("adding cookie")?;
        self.cookies.add_cookie_str(&cookie.to_string(), &url);
        if !self.cookies()?.contains(cookie) {
            return Err(TransportError::configuration(format!(
                "Cookie '{}' was not accepted for {}",
                cookie.name, self.url
            )));
        }
        debug!(url = %self.url, name = %cookie.name, "Cookie added");
        Ok(())
    }

    /// Returns the cookies that would be sent to this client's base URL.
    pub fn cookies(&self) -> Result<Vec<Cookie>, TransportError> {
        let url = self.parsed_url("getting cookies")?;
        let Some(header) = self.cookies.cookies(&url) else {
            return Ok(Vec::new());
        };
        let header = header
            .to_str()
            .map_err(|e| TransportError::configuration(format!("Failed getting cookies: {e}")))?;

        Ok(header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .map(|(name, value)| Cookie::new(name, value))
            .collect())
    }

    fn parsed_url(&self, action: &str) -> Result<Url, TransportError> {
        Url::parse(&self.url).map_err(|e| {
            TransportError::configuration(format!("Failed {action}: invalid URL '{}': {e}", self.url))
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("url", &self.url).finish_non_exhaustive()
    }
}

fn header_map(headers: &Headers) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers.iter() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::configuration(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::configuration(format!("Invalid value for header '{name}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_displays_as_name_value_pair() {
        assert_eq!(Cookie::new("JSESSIONID", "abc123").to_string(), "JSESSIONID=abc123");
    }

    #[test]
    fn added_cookie_is_visible_for_base_url() {
        let mut client = Client::new("https://s1.example.com/WebUntis/jsonrpc.do?school=demo").unwrap();
        assert!(client.cookies().unwrap().is_empty());

        client.add_cookie(&Cookie::new("JSESSIONID", "abc123")).unwrap();
        assert_eq!(client.cookies().unwrap(), vec![Cookie::new("JSESSIONID", "abc123")]);
    }

    #[test]
    fn adding_a_cookie_twice_replaces_the_value() {
        let mut client = Client::new("https://s1.example.com/").unwrap();
        client.add_cookie(&Cookie::new("JSESSIONID", "old")).unwrap();
        client.add_cookie(&Cookie::new("JSESSIONID", "new")).unwrap();

        assert_eq!(client.cookies().unwrap(), vec![Cookie::new("JSESSIONID", "new")]);
    }

    #[test]
    fn cookies_are_isolated_per_client() {
        let mut first = Client::new("https://s1.example.com/").unwrap();
        let second = Client::new("https://s1.example.com/").unwrap();
        first.add_cookie(&Cookie::new("JSESSIONID", "abc123")).unwrap();

        assert!(second.cookies().unwrap().is_empty());
    }

    #[test]
    fn cookie_with_attribute_separator_is_rejected() {
        let mut client = Client::new("https://s1.example.com/").unwrap();

        let err = client
            .add_cookie(&Cookie::new("JSESSIONID", "abc; Path=/elsewhere"))
            .unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));
        assert!(client.cookies().unwrap().is_empty());
    }

    #[test]
    fn cookie_with_empty_or_invalid_name_is_rejected() {
        let mut client = Client::new("https://s1.example.com/").unwrap();

        for name in ["", "JSESSION ID", "a=b"] {
            let err = client.add_cookie(&Cookie::new(name, "abc")).unwrap_err();
            assert!(matches!(err, TransportError::Configuration { .. }), "{name:?}");
        }
        assert!(client.cookies().unwrap().is_empty());
    }

    #[test]
    fn cookie_values_outside_cookie_octets_are_rejected() {
        for value in ["a b", "a,b", "a\"b", "a\\b", "caf\u{e9}"] {
            assert!(Cookie::new("JSESSIONID", value).validate().is_err(), "{value:?}");
        }
        assert!(Cookie::new("JSESSIONID", "0A1B-2c_3.d").validate().is_ok());
        assert!(Cookie::new("JSESSIONID", "").validate().is_ok());
    }

    #[test]
    fn unparseable_base_url_fails_cookie_operations() {
        let mut client = Client::new("not a url").unwrap();

        let err = client.add_cookie(&Cookie::new("JSESSIONID", "x")).unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));

        let err = client.cookies().unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn invalid_header_name_is_a_configuration_error() {
        let err = header_map(&Headers::new().add("bad header", "x")).unwrap_err();
        assert!(matches!(err, TransportError::Configuration { .. }));
    }

    #[test]
    fn header_map_keeps_all_entries() {
        let map = header_map(&Headers::new().add("X-One", "1").add("X-Two", "2")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["x-one"], "1");
    }
}
