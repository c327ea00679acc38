//! Request payloads and JSON helpers.
//!
//! [`Body`] is the closed set of payloads POST/PUT/DELETE accept. Shaping a
//! body into bytes also decides the `Content-Type` the composer falls back to
//! when the caller has not set one.

use bytes::Bytes;
use serde::Serialize;

use crate::{Form, Result};

/// Content types the client negotiates or recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`.
    Json,
    /// `multipart/form-data`.
    Multipart,
    /// `text/plain`.
    PlainText,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
            Self::PlainText => "text/plain",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request payload for methods that carry a body.
#[derive(Debug, Clone)]
pub enum Body {
    /// A JSON value, serialized on send.
    Json(serde_json::Value),
    /// A multipart form, encoded with its boundary on send.
    Form(Form),
    /// A preformatted string, sent unchanged.
    Text(String),
}

/// A body after shaping: the bytes to send and the content type they imply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// `Content-Type` to use when none was set explicitly.
    pub content_type: String,
    /// Encoded payload.
    pub bytes: Bytes,
}

impl Body {
    /// JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Returns `true` for a multipart payload.
    #[must_use]
    pub const fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }

    /// Shapes the payload into bytes.
    ///
    /// Strings pass through untouched and still default to JSON, as does every
    /// non-multipart payload.
    pub fn encode(self) -> Result<EncodedBody> {
        match self {
            Self::Json(value) => Ok(EncodedBody {
                content_type: ContentType::Json.to_string(),
                bytes: to_json(&value)?,
            }),
            Self::Form(form) => {
                let (content_type, bytes) = form.into_body();
                Ok(EncodedBody {
                    content_type,
                    bytes,
                })
            }
            Self::Text(text) => Ok(EncodedBody {
                content_type: ContentType::Json.to_string(),
                bytes: Bytes::from(text),
            }),
        }
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Form> for Body {
    fn from(form: Form) -> Self {
        Self::Form(form)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use fetchler_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Failures name the field that did not match (e.g. `user.address.city`).
///
/// # Example
///
/// ```
/// use fetchler_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
