//! The transport boundary.
//!
//! The client never talks to the network itself. It hands each composed
//! [`Request`] to a [`Transport`] and classifies whatever comes back. Tests
//! substitute an in-memory implementation; `fetchler` ships a hyper-based one.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Executes composed requests.
///
/// Any status code is a successful send: classification of non-2xx statuses
/// belongs to the client. Only failures to obtain a response at all (network,
/// TLS, timeout, malformed URL) are errors here.
///
/// # Example
///
/// ```
/// use fetchler_core::{HeaderStore, Request, Response, Result, Transport};
///
/// #[derive(Clone)]
/// struct Teapot;
///
/// impl Transport for Teapot {
///     async fn send(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(418, HeaderStore::new(), "short and stout"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send one request and return the response.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        T::send(self, request)
    }
}
