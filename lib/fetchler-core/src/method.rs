//! HTTP method types.

use derive_more::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    Head,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` if requests with this method carry a body.
    ///
    /// GET and HEAD never do; their parameters go into the query string.
    #[must_use]
    pub const fn carries_body(&self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }

    /// Returns `true` if the response body is never read for this method.
    #[must_use]
    pub const fn skips_response_body(&self) -> bool {
        matches!(self, Self::Head)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Head => Self::HEAD,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::HEAD => Ok(Self::Head),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            other => Err(crate::Error::InvalidRequest(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Head.to_string(), "HEAD");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn method_carries_body() {
        assert!(!Method::Get.carries_body());
        assert!(!Method::Head.carries_body());
        assert!(Method::Post.carries_body());
        assert!(Method::Put.carries_body());
        assert!(Method::Delete.carries_body());
    }

    #[test]
    fn only_head_skips_response_body() {
        assert!(Method::Head.skips_response_body());
        assert!(!Method::Get.skips_response_body());
        assert!(!Method::Delete.skips_response_body());
    }

    #[test]
    fn method_http_conversions() {
        assert_eq!(http::Method::from(Method::Head), http::Method::HEAD);
        assert_eq!(
            Method::try_from(http::Method::DELETE).expect("DELETE"),
            Method::Delete
        );
        assert!(Method::try_from(http::Method::PATCH).is_err());
    }
}
