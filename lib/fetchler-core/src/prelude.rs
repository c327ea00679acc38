//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fetchler_core::prelude::*;
//! ```

pub use crate::{
    Body, ContentType, Error, Form, HeaderStore, Method, Outcome, Part, Query, Request,
    RequestOptions, Response, Result, Transport, from_json, to_json,
};
