//! Composed requests and per-call options.
//!
//! A [`Request`] is the immutable description of one outgoing call: it owns a
//! snapshot of the headers it was composed with, so nothing that happens to the
//! client afterwards can change it.
//!
//! # Example
//!
//! ```
//! use fetchler_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com/users?page=1")
//!     .header("Accept", "application/json")
//!     .build();
//!
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use std::time::Duration;

use bytes::Bytes;

use crate::{HeaderStore, Method};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: HeaderStore,
    body: Option<Bytes>,
    timeout: Option<Duration>,
    disable_auth: bool,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Fully resolved URL, query included.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Single header value by name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Timeout for this call, overriding the transport default.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the `Authorization` header was suppressed for this call.
    #[must_use]
    pub const fn disable_auth(&self) -> bool {
        self.disable_auth
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, HeaderStore, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            request: Request {
                method,
                url: url.into(),
                headers: HeaderStore::new(),
                body: None,
                timeout: None,
                disable_auth: false,
            },
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.set(name, value);
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderStore) -> Self {
        self.request.headers = headers;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request.timeout = timeout;
        self
    }

    /// Records that auth was suppressed.
    #[must_use]
    pub const fn disable_auth(mut self, disable_auth: bool) -> Self {
        self.request.disable_auth = disable_auth;
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}

/// Request-init options layered under or over a single call.
///
/// A client holds one set as its defaults; each call may pass another. Headers
/// from the per-call set win over the client's headers, which win over the
/// defaults. A per-call timeout wins over the default timeout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: HeaderStore,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Empty options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headers: HeaderStore::new(),
            timeout: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Adds several headers in order.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(headers);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header overrides.
    #[must_use]
    pub const fn header_overrides(&self) -> &HeaderStore {
        &self.headers
    }

    /// Timeout override.
    #[must_use]
    pub const fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, "https://api.example.com/users")
            .header("Accept", "application/json")
            .build();

        check!(request.method() == Method::Get);
        check!(request.url() == "https://api.example.com/users");
        check!(request.header("ACCEPT") == Some("application/json"));
        check!(request.body().is_none());
        check!(request.timeout().is_none());
        check!(!request.disable_auth());
    }

    #[test]
    fn request_builder_with_body_and_timeout() {
        let request = Request::builder(Method::Post, "/users")
            .body(r#"{"name":"test"}"#)
            .timeout(Some(Duration::from_secs(2)))
            .disable_auth(true)
            .build();

        check!(request.body() == Some(&Bytes::from_static(br#"{"name":"test"}"#)));
        check!(request.timeout() == Some(Duration::from_secs(2)));
        check!(request.disable_auth());
    }

    #[test]
    fn options_collect_headers() {
        let options = RequestOptions::new()
            .header("X-One", "1")
            .headers([("X-Two", "2"), ("x-one", "uno")])
            .timeout(Duration::from_millis(250));

        check!(options.header_overrides().len() == 2);
        check!(options.header_overrides().get("X-ONE") == Some("uno"));
        check!(options.timeout_override() == Some(Duration::from_millis(250)));
    }
}
