//! Core types and traits for the fetchler HTTP request client.
//!
//! This crate provides the transport-agnostic pieces of the request pipeline:
//! - [`Method`] - HTTP method enum
//! - [`HeaderStore`] - Ordered, case-insensitive header mapping
//! - [`Query`] and [`append_query`] - Query specification and URL assembly
//! - [`Body`], [`Form`] and [`Part`] - Request payloads
//! - [`Request`], [`RequestBuilder`] and [`RequestOptions`] - Composed requests
//! - [`Response`] - HTTP response type
//! - [`Outcome`] - Classified result of a dispatched call
//! - [`Error`] and [`Result`] - Error handling
//! - [`Transport`] - The injected component that performs network calls

mod body;
mod error;
pub mod headers;
mod method;
mod multipart;
mod outcome;
pub mod prelude;
mod query;
mod request;
mod response;
mod transport;

pub use body::{Body, ContentType, EncodedBody, from_json, to_json};
pub use error::{Error, Result, UNHANDLED_MESSAGE};
pub use headers::HeaderStore;
pub use method::Method;
pub use multipart::{Form, Part};
pub use outcome::Outcome;
pub use query::{Query, QueryValue, append_query};
pub use request::{Request, RequestBuilder, RequestOptions};
pub use response::Response;
pub use transport::Transport;
