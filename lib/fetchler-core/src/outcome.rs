//! Classified result of one dispatched call.

use crate::Response;

/// What a call produced once its status and `Content-Type` were classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx with a `json` content type, parsed.
    Json(serde_json::Value),
    /// 2xx with a `text` content type, decoded.
    Text(String),
    /// 204 No Content, or any 2xx answer to HEAD. Always `true`.
    Bool(bool),
    /// 2xx with any other content type; the body is left to the caller.
    Raw(Response),
    /// A non-2xx status was routed to a registered handler, which returned
    /// this value.
    Handled(Option<serde_json::Value>),
}

impl Outcome {
    /// The parsed JSON value, if this is [`Outcome::Json`].
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Deserializes a JSON outcome into `T`.
    ///
    /// Returns `None` for every other variant.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Option<crate::Result<T>> {
        match self {
            Self::Json(value) => Some(serde_path_to_error::deserialize(value).map_err(|e| {
                crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
            })),
            _ => None,
        }
    }

    /// The decoded text, if this is [`Outcome::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The flag, if this is [`Outcome::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The unread response, if this is [`Outcome::Raw`].
    #[must_use]
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Raw(response) => Some(response),
            _ => None,
        }
    }

    /// Returns `true` if a handler took over the call.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn accessors_match_their_variant() {
        check!(Outcome::Bool(true).as_bool() == Some(true));
        check!(Outcome::Text("hi".to_string()).as_text() == Some("hi"));
        check!(Outcome::Json(json!({"a": 1})).as_json() == Some(&json!({"a": 1})));
        check!(Outcome::Handled(None).is_handled());

        check!(Outcome::Bool(true).as_json().is_none());
        check!(Outcome::Handled(None).into_response().is_none());
    }

    #[test]
    fn decode_json_outcome() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Item {
            id: u32,
        }

        let_assert!(Some(Ok(item)) = Outcome::Json(json!({"id": 7})).decode::<Item>());
        check!(item == Item { id: 7 });

        check!(Outcome::Text("x".to_string()).decode::<Item>().is_none());
    }

    #[test]
    fn decode_error_names_the_field_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct User {
            #[allow(dead_code)]
            address: Address,
        }

        let outcome = Outcome::Json(json!({ "address": { "city": 5 } }));
        let_assert!(Some(Err(error)) = outcome.decode::<User>());
        let_assert!(crate::Error::JsonDeserialization { path, message } = &error);
        check!(path == "address.city");
        check!(message.contains("invalid type: integer `5`"));
        check!(error.to_string().starts_with("JSON deserialization error at 'address.city'"));
    }
}
