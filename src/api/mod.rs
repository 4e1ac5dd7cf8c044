//! REST API module.
//!
//! Handlers are thin: they decode the request, hand the record to the
//! validator and the store, and let [`AppError`] pick the status code.

mod members;

pub use members::*;

use crate::errors::AppError;

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<T, AppError>;
