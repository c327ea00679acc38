//! Authorization token management.
//!
//! [`TokenManager`] derives the `Authorization` header from a raw token and an
//! optional type prefix (`Bearer`, `Token`, ...) and keeps an established
//! prefix when a token is refreshed without naming one.
//!
//! The prefix is recovered by splitting the stored value on whitespace, so
//! tokens that themselves contain whitespace are not supported.

use fetchler_core::{HeaderStore, headers::AUTHORIZATION};
use tracing::debug;

/// Token type used when none is given.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Reads and writes the `Authorization` entry of a [`HeaderStore`].
///
/// # Example
///
/// ```
/// use fetchler::TokenManager;
/// use fetchler_core::HeaderStore;
///
/// let mut headers = HeaderStore::new();
/// let mut tokens = TokenManager::new(&mut headers);
///
/// tokens.set(Some("abc"), Some("Token"));
/// tokens.update(Some("xyz"), None);
/// assert_eq!(tokens.current(), Some("Token xyz"));
/// ```
#[derive(Debug)]
pub struct TokenManager<'a> {
    headers: &'a mut HeaderStore,
}

impl<'a> TokenManager<'a> {
    /// Manage the token stored in `headers`.
    pub fn new(headers: &'a mut HeaderStore) -> Self {
        Self { headers }
    }

    /// Current `Authorization` value.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION)
    }

    /// Sets `"<type> <token>"`, or the bare token when the type is absent or
    /// empty. `None` removes the header.
    pub fn set(&mut self, token: Option<&str>, token_type: Option<&str>) {
        let Some(token) = token else {
            self.clear();
            return;
        };

        let value = match token_type {
            Some(kind) if !kind.is_empty() => format!("{kind} {token}"),
            _ => token.to_string(),
        };
        self.headers.set(AUTHORIZATION, value);
        debug!(token_type = token_type.unwrap_or_default(), "authorization token set");
    }

    /// Replaces the token while reconciling its type prefix.
    ///
    /// - `None` removes the header.
    /// - With no stored token, sets one with `token_type` (default `Bearer`).
    /// - A stored `"<type> <token>"` keeps its type unless `token_type`
    ///   explicitly names a different one.
    /// - A stored bare token takes `token_type` (default `Bearer`).
    pub fn update(&mut self, token: Option<&str>, token_type: Option<&str>) {
        let Some(token) = token else {
            self.clear();
            return;
        };

        let requested = token_type.unwrap_or(DEFAULT_TOKEN_TYPE);
        let scheme = match self.current() {
            None => requested.to_string(),
            Some(existing) => {
                let mut parts = existing.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(current), Some(_)) => match token_type {
                        Some(explicit) if explicit != current => explicit.to_string(),
                        _ => current.to_string(),
                    },
                    _ => requested.to_string(),
                }
            }
        };

        self.set(Some(token), Some(&scheme));
    }

    /// Removes the `Authorization` header.
    pub fn clear(&mut self) {
        if self.headers.remove(AUTHORIZATION).is_some() {
            debug!("authorization token cleared");
        }
    }
}
