//! HTTP response handling.
//!
//! [`Response`] provides access to status, headers, and body. The body stays
//! as received until [`Response::json`] or [`Response::text`] decodes it.

use bytes::Bytes;

use crate::{HeaderStore, headers::CONTENT_TYPE};

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: HeaderStore,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderStore, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Single header value by name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The `Content-Type` header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Decode the body as UTF-8 text.
    pub fn text(&self) -> crate::Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn json_headers() -> HeaderStore {
        [("content-type", "application/json")].into_iter().collect()
    }

    #[test]
    fn response_basic() {
        let response = Response::new(200, json_headers(), r#"{"id":1}"#);

        check!(response.status() == 200);
        check!(response.content_type() == Some("application/json"));
        check!(response.header("Content-Type") == Some("application/json"));
        check!(response.is_success());
        check!(!response.is_client_error());
    }

    #[test]
    fn response_status_ranges() {
        check!(!Response::new(199, HeaderStore::new(), "").is_success());
        check!(Response::new(299, HeaderStore::new(), "").is_success());
        check!(!Response::new(300, HeaderStore::new(), "").is_success());
        check!(Response::new(404, HeaderStore::new(), "").is_client_error());
        check!(Response::new(503, HeaderStore::new(), "").is_server_error());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let response = Response::new(200, json_headers(), r#"{"id":1,"name":"test"}"#);
        let user: User = response.json().expect("deserialize");
        check!(
            user == User {
                id: 1,
                name: "test".to_string()
            }
        );
    }

    #[test]
    fn response_text_rejects_invalid_utf8() {
        let response = Response::new(200, HeaderStore::new(), vec![0xff_u8, 0xfe]);
        let_assert!(Err(crate::Error::InvalidText(_)) = response.text());

        let response = Response::new(200, HeaderStore::new(), "Hello, World!");
        check!(response.text().expect("utf8") == "Hello, World!");
    }
}
