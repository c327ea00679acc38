//! Request composition.
//!
//! [`RequestComposer`] turns one call's arguments into a [`Request`] against a
//! borrowed view of the client's state. It only reads that state: every
//! header set it produces is a fresh copy.

use fetchler_core::{
    Body, ContentType, HeaderStore, Method, Query, Request, RequestOptions, Result,
    append_query,
    headers::{AUTHORIZATION, CONTENT_TYPE},
};

/// Arguments of a single call, before composition.
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    query: Option<Query>,
    body: Option<Body>,
    options: Option<RequestOptions>,
    disable_auth: bool,
}

impl Call {
    /// Call to `path` (appended to the client's base URL).
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            options: None,
            disable_auth: false,
        }
    }

    /// Query to append to the URL.
    #[must_use]
    pub fn query(mut self, query: Option<Query>) -> Self {
        self.query = query;
        self
    }

    /// Payload. Ignored for GET and HEAD.
    #[must_use]
    pub fn body(mut self, body: Option<Body>) -> Self {
        self.body = body;
        self
    }

    /// Per-call overrides.
    #[must_use]
    pub fn options(mut self, options: Option<RequestOptions>) -> Self {
        self.options = options;
        self
    }

    /// Suppress the `Authorization` header for this call.
    #[must_use]
    pub const fn disable_auth(mut self, disable_auth: bool) -> Self {
        self.disable_auth = disable_auth;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }
}

/// Builds requests from the client's base URL, headers and default options.
#[derive(Debug, Clone, Copy)]
pub struct RequestComposer<'a> {
    base_url: &'a str,
    headers: &'a HeaderStore,
    defaults: &'a RequestOptions,
}

impl<'a> RequestComposer<'a> {
    /// Composer over a view of client state.
    #[must_use]
    pub const fn new(
        base_url: &'a str,
        headers: &'a HeaderStore,
        defaults: &'a RequestOptions,
    ) -> Self {
        Self {
            base_url,
            headers,
            defaults,
        }
    }

    /// Resolves the URL: base URL, then path, then query.
    #[must_use]
    pub fn url(&self, path: &str, query: Option<&Query>) -> String {
        append_query(&format!("{}{path}", self.base_url), query)
    }

    /// Merges default-option headers, client headers, then per-call headers,
    /// dropping `Authorization` when `disable_auth` is set.
    #[must_use]
    pub fn headers(&self, overrides: Option<&RequestOptions>, disable_auth: bool) -> HeaderStore {
        let mut headers = self.defaults.header_overrides().clone();
        headers.merge(self.headers);
        if let Some(overrides) = overrides {
            headers.merge(overrides.header_overrides());
        }
        if disable_auth {
            headers.remove(AUTHORIZATION);
        }
        headers
    }

    /// Composes the full request for `call`.
    ///
    /// Methods other than GET and HEAD get a `Content-Type` when none was
    /// set: the form's multipart type for a [`Body::Form`], `application/json`
    /// otherwise. Fails only if the body cannot be serialized.
    pub fn compose(&self, call: Call) -> Result<Request> {
        let Call {
            method,
            path,
            query,
            body,
            options,
            disable_auth,
        } = call;

        let url = self.url(&path, query.as_ref());
        let mut headers = self.headers(options.as_ref(), disable_auth);

        let encoded = match body {
            Some(body) if method.carries_body() => Some(body.encode()?),
            _ => None,
        };

        if method.carries_body() && !headers.contains(CONTENT_TYPE) {
            let content_type = encoded
                .as_ref()
                .map_or(ContentType::Json.as_str(), |encoded| {
                    encoded.content_type.as_str()
                });
            headers.set(CONTENT_TYPE, content_type);
        }

        let timeout = options
            .as_ref()
            .and_then(RequestOptions::timeout_override)
            .or_else(|| self.defaults.timeout_override());

        let mut builder = Request::builder(method, url)
            .headers(headers)
            .timeout(timeout)
            .disable_auth(disable_auth);
        if let Some(encoded) = encoded {
            builder = builder.body(encoded.bytes);
        }
        Ok(builder.build())
    }
}
