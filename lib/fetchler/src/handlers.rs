//! Status-routed error handlers.
//!
//! A failed response is offered, in order, to the 401 or 403 handler matching
//! its status and then to the generic handler. The first registered one wins;
//! if none is registered the call fails with [`crate::Error::Http`].

use std::fmt;
use std::sync::Arc;

use derive_more::Display;
use fetchler_core::{Response, Result};

/// Callback invoked in place of an error for a non-2xx response.
///
/// `Ok(value)` becomes the call's [`crate::Outcome::Handled`] result; an `Err`
/// is returned to the caller unchanged.
pub type ErrorHandler = Arc<dyn Fn(&Response) -> Result<Option<serde_json::Value>> + Send + Sync>;

/// Which failures a handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HandlerCategory {
    /// Status 401.
    #[display("401")]
    Unauthorized,
    /// Status 403.
    #[display("403")]
    Forbidden,
    /// Any other non-2xx status, and 401/403 without a dedicated handler.
    #[display("generic")]
    Generic,
}

/// One optional handler per [`HandlerCategory`].
#[derive(Clone, Default)]
pub struct ErrorHandlerRegistry {
    unauthorized: Option<ErrorHandler>,
    forbidden: Option<ErrorHandler>,
    generic: Option<ErrorHandler>,
}

impl fmt::Debug for ErrorHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandlerRegistry")
            .field("unauthorized", &self.unauthorized.is_some())
            .field("forbidden", &self.forbidden.is_some())
            .field("generic", &self.generic.is_some())
            .finish()
    }
}

impl ErrorHandlerRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn slot(&self, category: HandlerCategory) -> &Option<ErrorHandler> {
        match category {
            HandlerCategory::Unauthorized => &self.unauthorized,
            HandlerCategory::Forbidden => &self.forbidden,
            HandlerCategory::Generic => &self.generic,
        }
    }

    const fn slot_mut(&mut self, category: HandlerCategory) -> &mut Option<ErrorHandler> {
        match category {
            HandlerCategory::Unauthorized => &mut self.unauthorized,
            HandlerCategory::Forbidden => &mut self.forbidden,
            HandlerCategory::Generic => &mut self.generic,
        }
    }

    /// Registers `handler`, replacing any handler already in `category`.
    pub fn register(&mut self, category: HandlerCategory, handler: ErrorHandler) {
        *self.slot_mut(category) = Some(handler);
    }

    /// Removes the handler in `category`, returning it.
    pub fn remove(&mut self, category: HandlerCategory) -> Option<ErrorHandler> {
        self.slot_mut(category).take()
    }

    /// Handler currently registered in `category`.
    #[must_use]
    pub fn lookup(&self, category: HandlerCategory) -> Option<&ErrorHandler> {
        self.slot(category).as_ref()
    }

    /// Category whose handler should receive a failed `status`, if any.
    #[must_use]
    pub fn route(&self, status: u16) -> Option<HandlerCategory> {
        let specific = match status {
            401 => Some(HandlerCategory::Unauthorized),
            403 => Some(HandlerCategory::Forbidden),
            _ => None,
        };

        specific
            .filter(|category| self.lookup(*category).is_some())
            .or_else(|| {
                self.lookup(HandlerCategory::Generic)
                    .map(|_| HandlerCategory::Generic)
            })
    }

    /// Handler that should receive a failed `status`, cloned out of the
    /// registry together with its category.
    #[must_use]
    pub fn resolve(&self, status: u16) -> Option<(HandlerCategory, ErrorHandler)> {
        let category = self.route(status)?;
        self.lookup(category)
            .map(|handler| (category, Arc::clone(handler)))
    }
}

/// Wraps a closure as an [`ErrorHandler`].
pub fn handler<F>(f: F) -> ErrorHandler
where
    F: Fn(&Response) -> Result<Option<serde_json::Value>> + Send + Sync + 'static,
{
    Arc::new(f)
}
