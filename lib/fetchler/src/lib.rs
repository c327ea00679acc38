//! Configurable HTTP request client.
//!
//! [`Client`] wraps a [`Transport`] and centralizes three things:
//! - the header set every call starts from: base headers plus a typed
//!   `Authorization` token that can be replaced at runtime,
//! - routing non-2xx statuses to registered 401, 403, or generic handlers,
//! - decoding 2xx bodies by `Content-Type` into an [`Outcome`].
//!
//! # Example
//!
//! ```no_run
//! use fetchler::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> fetchler::Result<()> {
//! let client = Client::builder()
//!     .base_url("https://api.example.com")
//!     .token("abc")
//!     .handler_401(|_response| Ok(Some(json!({ "login": true }))))
//!     .build_default();
//!
//! let created = client
//!     .post("/users", Some(json!({ "name": "Ada" }).into()), None, false)
//!     .await?;
//! if let Some(user) = created.as_json() {
//!     println!("{user}");
//! }
//!
//! client.update_token(Some("fresh"), None);
//! # Ok(())
//! # }
//! ```
//!
//! Query values are appended as given, without percent-encoding.

mod client;
mod compose;
mod config;
mod connector;
mod dispatch;
mod handlers;
pub mod middleware;
pub mod prelude;
mod token;
mod transport;

pub use client::{Client, ClientBuilder};
pub use compose::{Call, RequestComposer};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use handlers::{ErrorHandler, ErrorHandlerRegistry, HandlerCategory, handler};
pub use token::{DEFAULT_TOKEN_TYPE, TokenManager};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

pub use tower;

pub use fetchler_core::{
    Body, ContentType, Error, Form, HeaderStore, Method, Outcome, Part, Query, QueryValue,
    Request, RequestBuilder, RequestOptions, Response, Result, Transport, from_json,
    headers, to_json,
};
