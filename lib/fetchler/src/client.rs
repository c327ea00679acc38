//! The request client.
//!
//! [`Client`] owns the mutable configuration (base URL, headers, token,
//! default options, error handlers) and drives each call through composition
//! and dispatch. Clones share that configuration.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fetchler_core::{
    Body, HeaderStore, Method, Outcome, Query, Request, RequestOptions, Response, Result,
    Transport,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    HyperTransport,
    compose::{Call, RequestComposer},
    dispatch::dispatch,
    handlers::{ErrorHandlerRegistry, HandlerCategory, handler},
    token::{DEFAULT_TOKEN_TYPE, TokenManager},
};

#[derive(Debug)]
struct ClientState {
    base_url: String,
    headers: HeaderStore,
    default_options: RequestOptions,
    handlers: ErrorHandlerRegistry,
}

/// HTTP request client over a [`Transport`].
///
/// All state lives behind a lock that is held only while composing a request,
/// applying a mutation, or looking up a handler; never while the transport
/// runs. Headers are copied into each request as it is composed, so a
/// mutation cannot reach a request already in flight.
///
/// # Example
///
/// ```no_run
/// use fetchler::Client;
/// use fetchler_core::Query;
///
/// # async fn run() -> fetchler_core::Result<()> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .token("abc")
///     .handler_401(|_response| Ok(None))
///     .build_default();
///
/// let users = client
///     .get("/users", Some(Query::new().pair("page", "1")), None, false)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Client<T> {
    transport: T,
    state: Arc<RwLock<ClientState>>,
}

impl<T: Clone> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Client")
            .field("base_url", &state.base_url)
            .field("header_names", &state.headers.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .field("handlers", &state.handlers)
            .finish_non_exhaustive()
    }
}

impl Client<HyperTransport> {
    /// Builder for a client.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<T: Transport> Client<T> {
    /// Client with no base URL, headers, or handlers.
    #[must_use]
    pub fn new(transport: T) -> Self {
        ClientBuilder::default().build(transport)
    }

    fn read(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The injected transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    // -- Token and headers --------------------------------------------------

    /// Replaces the token, reconciling its type prefix with the stored one.
    ///
    /// See [`TokenManager::update`].
    pub fn update_token(&self, token: Option<&str>, token_type: Option<&str>) {
        TokenManager::new(&mut self.write().headers).update(token, token_type);
    }

    /// Sets the token exactly as given. See [`TokenManager::set`].
    pub fn set_token(&self, token: Option<&str>, token_type: Option<&str>) {
        TokenManager::new(&mut self.write().headers).set(token, token_type);
    }

    /// Removes the `Authorization` header.
    pub fn clear_token(&self) {
        TokenManager::new(&mut self.write().headers).clear();
    }

    /// Sets a base header, replacing any value under the same name.
    pub fn update_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.write().headers.set(name, value);
    }

    /// Removes a base header, returning its value.
    pub fn remove_header(&self, name: &str) -> Option<String> {
        self.write().headers.remove(name)
    }

    /// Copy of the base headers.
    #[must_use]
    pub fn headers(&self) -> HeaderStore {
        self.read().headers.clone()
    }

    /// Copy of one base header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<String> {
        self.read().headers.get(name).map(str::to_string)
    }

    /// Copy of the base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.read().base_url.clone()
    }

    // -- Error handlers -----------------------------------------------------

    /// Registers the handler for `category`, replacing the previous one.
    pub fn update_default_handler<F>(&self, category: HandlerCategory, callback: F)
    where
        F: Fn(&Response) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.write().handlers.register(category, handler(callback));
        debug!(%category, "error handler updated");
    }

    /// Removes the handler for `category`. Returns whether one was registered.
    pub fn remove_default_handler(&self, category: HandlerCategory) -> bool {
        self.write().handlers.remove(category).is_some()
    }

    // -- Pipeline -----------------------------------------------------------

    /// Composes the request `call` would send, without sending it.
    pub fn compose(&self, call: Call) -> Result<Request> {
        let state = self.read();
        let composer = RequestComposer::new(&state.base_url, &state.headers, &state.default_options);
        composer.compose(call)
    }

    /// Composes and dispatches `call`.
    pub async fn send(&self, call: Call) -> Result<Outcome> {
        let request = self.compose(call)?;
        debug!(
            method = %request.method(),
            url = request.url(),
            disable_auth = request.disable_auth(),
            "dispatching request"
        );

        dispatch(&self.transport, request, |status| {
            self.read().handlers.resolve(status)
        })
        .await
    }

    // -- Verbs --------------------------------------------------------------

    /// `GET url`, with an optional query.
    pub async fn get(
        &self,
        url: &str,
        query: Option<Query>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.send(
            Call::new(Method::Get, url)
                .query(query)
                .options(options)
                .disable_auth(disable_auth),
        )
        .await
    }

    /// `HEAD url`. A 2xx answer is always [`Outcome::Bool`].
    pub async fn head(
        &self,
        url: &str,
        query: Option<Query>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.send(
            Call::new(Method::Head, url)
                .query(query)
                .options(options)
                .disable_auth(disable_auth),
        )
        .await
    }

    /// `POST url` with an optional body.
    pub async fn post(
        &self,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.with_body(Method::Post, url, body, options, disable_auth)
            .await
    }

    /// `PUT url` with an optional body.
    pub async fn put(
        &self,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.with_body(Method::Put, url, body, options, disable_auth)
            .await
    }

    /// `DELETE url` with an optional body.
    pub async fn delete(
        &self,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.with_body(Method::Delete, url, body, options, disable_auth)
            .await
    }

    /// Same as [`Self::delete`].
    pub async fn del(
        &self,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.delete(url, body, options, disable_auth).await
    }

    async fn with_body(
        &self,
        method: Method,
        url: &str,
        body: Option<Body>,
        options: Option<RequestOptions>,
        disable_auth: bool,
    ) -> Result<Outcome> {
        self.send(
            Call::new(method, url)
                .body(body)
                .options(options)
                .disable_auth(disable_auth),
        )
        .await
    }
}

/// Builder for [`Client`].
///
/// The token, when given, becomes `Authorization: <token_type> <token>` with
/// `token_type` defaulting to `Bearer` (an empty type sends the bare token).
/// An empty token is ignored.
/// Custom headers are applied after it, so a custom `Authorization` wins.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    token_type: Option<String>,
    headers: HeaderStore,
    default_options: RequestOptions,
    handlers: ErrorHandlerRegistry,
}

impl ClientBuilder {
    /// Prefix for every call's path. Joined by plain concatenation.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Initial token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Type prefix for the initial token.
    #[must_use]
    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// Adds a base header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Adds several base headers in order.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(headers);
        self
    }

    /// Options every call starts from.
    #[must_use]
    pub fn default_options(mut self, options: RequestOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Handler for failures without a more specific one.
    #[must_use]
    pub fn handler_error<F>(self, callback: F) -> Self
    where
        F: Fn(&Response) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.register(HandlerCategory::Generic, callback)
    }

    /// Handler for 401 responses.
    #[must_use]
    pub fn handler_401<F>(self, callback: F) -> Self
    where
        F: Fn(&Response) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.register(HandlerCategory::Unauthorized, callback)
    }

    /// Handler for 403 responses.
    #[must_use]
    pub fn handler_403<F>(self, callback: F) -> Self
    where
        F: Fn(&Response) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.register(HandlerCategory::Forbidden, callback)
    }

    fn register<F>(mut self, category: HandlerCategory, callback: F) -> Self
    where
        F: Fn(&Response) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.handlers.register(category, handler(callback));
        self
    }

    /// Builds a client over `transport`.
    pub fn build<T: Transport>(self, transport: T) -> Client<T> {
        let mut headers = HeaderStore::new();
        let token_type = self.token_type.as_deref().unwrap_or(DEFAULT_TOKEN_TYPE);
        if let Some(token) = self.token.as_deref().filter(|token| !token.is_empty()) {
            TokenManager::new(&mut headers).set(Some(token), Some(token_type));
        }
        headers.merge(&self.headers);

        let state = ClientState {
            base_url: self.base_url.unwrap_or_default(),
            headers,
            default_options: self.default_options,
            handlers: self.handlers,
        };

        Client {
            transport,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Builds a client over a default [`HyperTransport`].
    #[must_use]
    pub fn build_default(self) -> Client<HyperTransport> {
        self.build(HyperTransport::new())
    }
}
