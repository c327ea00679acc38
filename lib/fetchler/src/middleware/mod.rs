//! Tower middleware for [`crate::HyperTransport`].
//!
//! Layers are added through [`crate::HyperTransportBuilder::layer`]; the first
//! one added sees each request first.
//!
//! ```no_run
//! use fetchler::HyperTransport;
//! use fetchler::middleware::LoggingLayer;
//!
//! let transport = HyperTransport::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
