//! Error types for fetchler.

use derive_more::{Display, Error, From};

/// Message carried by [`Error::Http`] when a failed status reaches no handler.
pub const UNHANDLED_MESSAGE: &str = "Error in fetch request";

/// Main error type for fetchler operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Non-2xx status that no registered handler accepted.
    ///
    /// `message` is [`UNHANDLED_MESSAGE`]; `body` holds the response body
    /// unless it was empty.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// A `text/*` response body that is not valid UTF-8.
    #[display("invalid text body: {_0}")]
    #[from]
    InvalidText(std::string::FromUtf8Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error for a failed `status` that no handler accepted.
    #[must_use]
    pub fn unhandled(status: u16, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: UNHANDLED_MESSAGE.to_string(),
            body: (!body.is_empty()).then_some(body),
        }
    }

    /// Connection-level failure.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// TLS handshake or certificate failure.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Request that cannot be built or sent as described.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Body that does not match the expected JSON shape at `path`.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Status of an unhandled failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether no response was obtained at all. These errors never reach
    /// the status handlers.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Tls(_) | Self::Timeout | Self::InvalidUrl(_)
        )
    }

    /// Whether the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Whether the connection failed.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Unhandled 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Unhandled 403.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    /// Body of an unhandled failure, if it had one.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Decodes the body of an unhandled failure as JSON.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use bytes::Bytes;

    use super::*;

    #[test]
    fn unhandled_failure() {
        let error = Error::unhandled(401, Bytes::new());

        check!(error.to_string() == "HTTP error 401: Error in fetch request");
        check!(error.status() == Some(401));
        check!(error.is_unauthorized());
        check!(!error.is_forbidden());
        check!(!error.is_transport());
        check!(error.body().is_none());
    }

    #[test]
    fn unhandled_failure_keeps_non_empty_body() {
        let error = Error::unhandled(403, Bytes::from_static(b"nope"));

        check!(error.is_forbidden());
        check!(error.body() == Some(&Bytes::from_static(b"nope")));
    }

    #[test]
    fn transport_errors() {
        for error in [
            Error::Timeout,
            Error::connection("refused"),
            Error::tls("bad certificate"),
            Error::InvalidUrl(url::ParseError::RelativeUrlWithoutBase),
        ] {
            check!(error.is_transport());
            check!(error.status().is_none());
        }

        check!(Error::Timeout.is_timeout());
        check!(Error::connection("refused").is_connection());
        check!(!Error::invalid_request("bad header").is_transport());
    }

    #[test]
    fn display() {
        check!(Error::connection("refused").to_string() == "connection error: refused");
        check!(
            Error::json_deserialization("user.address.city", "missing field `city`").to_string()
                == "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn decode_body_as_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Problem {
            error: String,
        }

        let error = Error::unhandled(422, Bytes::from(r#"{"error": "invalid email"}"#));
        let_assert!(Some(Ok(problem)) = error.decode_body::<Problem>());
        check!(problem.error == "invalid email");

        check!(Error::unhandled(500, Bytes::new()).decode_body::<Problem>().is_none());
        check!(Error::Timeout.decode_body::<Problem>().is_none());
    }
}
