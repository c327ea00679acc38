//! Dispatch and outcome classification.

use fetchler_core::{Error, Method, Outcome, Request, Response, Result, Transport};
use tracing::{debug, warn};

use crate::handlers::{ErrorHandler, HandlerCategory};

/// Sends `request` and classifies the response.
///
/// `resolve` is asked for a handler only after the transport has answered with
/// a non-2xx status, so it sees the registry as it is at that moment. The
/// returned handler runs without any client lock held.
pub(crate) async fn dispatch<T, R>(transport: &T, request: Request, resolve: R) -> Result<Outcome>
where
    T: Transport,
    R: FnOnce(u16) -> Option<(HandlerCategory, ErrorHandler)>,
{
    let method = request.method();
    let response = transport.send(request).await?;

    if response.is_success() {
        classify(method, response)
    } else {
        let resolved = resolve(response.status());
        route_failure(response, resolved)
    }
}

/// Maps a 2xx response to its [`Outcome`].
pub(crate) fn classify(method: Method, response: Response) -> Result<Outcome> {
    if response.status() == 204 || method.skips_response_body() {
        return Ok(Outcome::Bool(true));
    }

    let content_type = response
        .content_type()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if content_type.contains("json") {
        response.json().map(Outcome::Json)
    } else if content_type.contains("text") {
        response.text().map(Outcome::Text)
    } else {
        Ok(Outcome::Raw(response))
    }
}

fn route_failure(
    response: Response,
    resolved: Option<(HandlerCategory, ErrorHandler)>,
) -> Result<Outcome> {
    let status = response.status();
    match resolved {
        Some((category, handler)) => {
            debug!(status, %category, "routing failed response to handler");
            handler(&response).map(Outcome::Handled)
        }
        None => {
            warn!(status, "request failed and no handler is registered");
            Err(Error::unhandled(status, response.into_body()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert2::{check, let_assert};
    use fetchler_core::{HeaderStore, UNHANDLED_MESSAGE};
    use serde_json::json;

    use super::*;
    use crate::handlers::handler;

    fn response(status: u16, content_type: Option<&str>, body: &'static str) -> Response {
        let headers: HeaderStore = content_type
            .map(|value| ("Content-Type", value))
            .into_iter()
            .collect();
        Response::new(status, headers, body)
    }

    struct Fixed(Response);

    impl Transport for Fixed {
        async fn send(&self, _request: Request) -> Result<Response> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl Transport for Failing {
        async fn send(&self, _request: Request) -> Result<Response> {
            Err(Error::Timeout)
        }
    }

    #[test]
    fn no_content_is_true_for_every_method() {
        for method in [Method::Get, Method::Head, Method::Post, Method::Put, Method::Delete] {
            let outcome = classify(method, response(204, Some("application/json"), ""));
            check!(outcome.ok() == Some(Outcome::Bool(true)));
        }
    }

    #[test]
    fn head_skips_body_decoding() {
        let outcome = classify(Method::Head, response(200, Some("application/json"), "not json"));
        check!(outcome.ok() == Some(Outcome::Bool(true)));
    }

    #[test]
    fn decodes_by_content_type() {
        let outcome = classify(
            Method::Get,
            response(200, Some("application/problem+json; charset=utf-8"), r#"{"id":1}"#),
        );
        check!(outcome.ok() == Some(Outcome::Json(json!({"id": 1}))));

        let outcome = classify(Method::Get, response(200, Some("Text/HTML"), "<p>hi</p>"));
        check!(outcome.ok() == Some(Outcome::Text("<p>hi</p>".to_string())));
    }

    #[test]
    fn unknown_content_type_returns_raw_response() {
        let raw = response(200, Some("application/octet-stream"), "\u{1}\u{2}");
        let outcome = classify(Method::Get, raw.clone());
        check!(outcome.ok() == Some(Outcome::Raw(raw)));

        let bare = response(201, None, "");
        let outcome = classify(Method::Post, bare.clone());
        check!(outcome.ok() == Some(Outcome::Raw(bare)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let outcome = classify(Method::Get, response(200, Some("application/json"), "{oops"));
        let_assert!(Err(Error::JsonDeserialization { .. }) = outcome);
    }

    #[tokio::test]
    async fn failure_without_handler_is_unhandled_error() {
        let transport = Fixed(response(401, Some("text/plain"), "denied"));
        let request = Request::builder(Method::Get, "/secret").build();

        let result = dispatch(&transport, request, |_| None).await;

        let_assert!(Err(error) = result);
        check!(error.status() == Some(401));
        let_assert!(Error::Http { message, body, .. } = error);
        check!(message == UNHANDLED_MESSAGE);
        check!(body.as_deref() == Some(&b"denied"[..]));
    }

    #[tokio::test]
    async fn failure_invokes_resolved_handler_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback = handler(move |response| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Some(json!({ "status": response.status() })))
        });

        let transport = Fixed(response(401, None, ""));
        let request = Request::builder(Method::Get, "/secret").build();
        let outcome = dispatch(&transport, request, |status| {
            check!(status == 401);
            Some((HandlerCategory::Unauthorized, callback))
        })
        .await;

        check!(outcome.ok() == Some(Outcome::Handled(Some(json!({"status": 401})))));
        check!(calls.load(Ordering::SeqCst) == 1);
    }

    #[tokio::test]
    async fn handler_error_propagates_unchanged() {
        let callback = handler(|_| Err(Error::invalid_request("session expired")));
        let transport = Fixed(response(500, None, ""));
        let request = Request::builder(Method::Post, "/jobs").build();

        let result = dispatch(&transport, request, |_| Some((HandlerCategory::Generic, callback))).await;

        let_assert!(Err(Error::InvalidRequest(message)) = result);
        check!(message == "session expired");
    }

    #[tokio::test]
    async fn transport_errors_skip_handlers() {
        let request = Request::builder(Method::Get, "/slow").build();
        let result = dispatch(&Failing, request, |_| -> Option<(HandlerCategory, ErrorHandler)> {
            unreachable!("handlers are only consulted for HTTP failures")
        })
        .await;

        let_assert!(Err(error) = result);
        check!(error.is_timeout());
    }
}
