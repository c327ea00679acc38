//! Pipeline tests for `Client` over in-memory transports.

use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use fetchler::{
    Call, Client, Error, HandlerCategory, HeaderStore, Method, Outcome, Query, Request,
    RequestOptions, Response, Result, Transport,
};
use serde_json::json;
use tokio::sync::Notify;

/// Holds every request until released, recording what it was given.
#[derive(Clone, Default)]
struct Gated {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    sent: Arc<Mutex<Vec<Request>>>,
}

impl Transport for Gated {
    async fn send(&self, request: Request) -> Result<Response> {
        self.sent.lock().expect("lock").push(request);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Response::new(204, HeaderStore::new(), ""))
    }
}

/// Answers with the status taken from the request path (`/status/401`).
#[derive(Clone, Default)]
struct StatusEcho {
    sent: Arc<Mutex<Vec<Request>>>,
}

impl Transport for StatusEcho {
    async fn send(&self, request: Request) -> Result<Response> {
        let status = request
            .url()
            .rsplit('/')
            .next()
            .and_then(|last| last.parse().ok())
            .unwrap_or(200);
        self.sent.lock().expect("lock").push(request);
        let headers: HeaderStore = [("Content-Type", "application/json")].into_iter().collect();
        Ok(Response::new(status, headers, r#"{"echo":true}"#))
    }
}

#[tokio::test]
async fn mutation_after_compose_does_not_reach_dispatched_request() {
    let transport = Gated::default();
    let client = Client::builder()
        .base_url("https://api.example.com")
        .token("abc")
        .header("X-Mode", "a")
        .build(transport.clone());

    let call = client.get("/items", None, None, false);
    let mutate = async {
        transport.entered.notified().await;
        client.update_token(Some("xyz"), Some("Token"));
        client.update_header("X-Mode", "b");
        transport.release.notify_one();
    };
    let (outcome, ()) = tokio::join!(call, mutate);

    check!(outcome.ok() == Some(Outcome::Bool(true)));
    let sent = transport.sent.lock().expect("lock").clone();
    let_assert!([request] = sent.as_slice());
    check!(request.header("Authorization") == Some("Bearer abc"));
    check!(request.header("X-Mode") == Some("a"));
    check!(client.header("Authorization").as_deref() == Some("Token xyz"));
}

#[tokio::test]
async fn handlers_route_by_status() {
    let client = Client::builder()
        .base_url("/status")
        .handler_401(|_| Ok(Some(json!("401"))))
        .handler_403(|_| Ok(Some(json!("403"))))
        .handler_error(|response| Ok(Some(json!(response.status()))))
        .build(StatusEcho::default());

    for (status, expected) in [("401", json!("401")), ("403", json!("403")), ("500", json!(500)), ("404", json!(404))] {
        let outcome = client.get(&format!("/{status}"), None, None, false).await;
        check!(outcome.ok() == Some(Outcome::Handled(Some(expected))));
    }

    let outcome = client.get("/200", None, None, false).await;
    check!(outcome.ok() == Some(Outcome::Json(json!({"echo": true}))));
}

#[tokio::test]
async fn auth_failures_fall_back_to_generic_handler() {
    let client = Client::builder()
        .base_url("/status")
        .handler_error(|_| Ok(None))
        .build(StatusEcho::default());

    for path in ["/401", "/403"] {
        let outcome = client.get(path, None, None, false).await;
        check!(outcome.ok() == Some(Outcome::Handled(None)));
    }

    client.remove_default_handler(HandlerCategory::Generic);
    let_assert!(Err(Error::Http { status: 403, .. }) = client.get("/403", None, None, false).await);
}

#[tokio::test]
async fn handler_is_invoked_exactly_once() {
    let calls = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&calls);
    let client = Client::builder()
        .base_url("/status")
        .handler_401(move |_| {
            *counter.lock().expect("lock") += 1;
            Ok(None)
        })
        .build(StatusEcho::default());

    client.get("/401", None, None, false).await.expect("handled");
    check!(*calls.lock().expect("lock") == 1);
}

#[tokio::test]
async fn runtime_handler_replacement_wins() {
    let client = Client::builder()
        .base_url("/status")
        .handler_403(|_| Ok(Some(json!("old"))))
        .build(StatusEcho::default());

    client.update_default_handler(HandlerCategory::Forbidden, |_| Ok(Some(json!("new"))));
    let outcome = client.get("/403", None, None, false).await;
    check!(outcome.ok() == Some(Outcome::Handled(Some(json!("new")))));
}

#[tokio::test]
async fn default_options_and_per_call_overrides() {
    let transport = StatusEcho::default();
    let client = Client::builder()
        .base_url("/status")
        .header("Accept", "application/json")
        .default_options(
            RequestOptions::new()
                .header("Accept", "*/*")
                .header("X-Default", "d"),
        )
        .build(transport.clone());

    let options = RequestOptions::new().header("x-default", "call");
    client.get("/200", Some(Query::from("x=1")), Some(options), false).await.expect("outcome");

    let sent = transport.sent.lock().expect("lock").clone();
    let_assert!([request] = sent.as_slice());
    check!(request.url() == "/status/200?x=1");
    check!(request.header("Accept") == Some("application/json"));
    check!(request.header("X-Default") == Some("call"));
}

#[tokio::test]
async fn compose_previews_without_sending() {
    let transport = StatusEcho::default();
    let client = Client::builder()
        .base_url("https://api.example.com")
        .token("abc")
        .build(transport.clone());

    let request = client
        .compose(Call::new(Method::Delete, "/users/1").disable_auth(true))
        .expect("compose");

    check!(request.url() == "https://api.example.com/users/1");
    check!(request.header("Authorization").is_none());
    check!(request.header("Content-Type") == Some("application/json"));
    check!(transport.sent.lock().expect("lock").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_client() {
    let transport = StatusEcho::default();
    let client = Client::builder()
        .base_url("/status")
        .token("t0")
        .build(transport.clone());

    let mut tasks = Vec::new();
    for index in 0..16 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.update_token(Some(&format!("t{index}")), None);
            client.get("/200", None, None, false).await
        }));
    }
    for task in tasks {
        let outcome = task.await.expect("task");
        check!(outcome.ok() == Some(Outcome::Json(json!({"echo": true}))));
    }

    let sent = transport.sent.lock().expect("lock").clone();
    check!(sent.len() == 16);
    for request in &sent {
        let_assert!(Some(auth) = request.header("Authorization"));
        check!(auth.starts_with("Bearer t"));
    }
}
