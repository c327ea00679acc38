//! Common imports.
//!
//! ```
//! use fetchler::prelude::*;
//! ```

pub use crate::{
    Body, Client, ClientBuilder, Error, Form, HandlerCategory, HeaderStore, HyperTransport, Method,
    Outcome, Part, Query, RequestOptions, Response, Result, Transport,
};
