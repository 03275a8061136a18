//! # Handler Module
//!
//! The contract between the dispatcher and operation code.
//!
//! A handler receives the request-scoped [`RequestView`] by value and returns
//! a [`HandlerResult`]. Declared HTTP failures travel as
//! [`HandlerError::Response`] and are written back verbatim; everything else
//! is an unclassified failure that the dispatcher logs and propagates.
//!
//! Plain functions and closures are handlers through a blanket impl, so
//! generated registry code can register `fn`s directly.

use crate::request::{BodyError, RequestView};
use crate::response::OperationResponse;

/// What every handler returns.
pub type HandlerResult = Result<OperationResponse, HandlerError>;

/// Business logic bound to one route.
///
/// Handlers run on the connection's coroutine. Blocking I/O inside `handle`
/// yields to the `may` scheduler rather than stalling a worker thread.
pub trait OperationHandler: Send + Sync + 'static {
    fn handle(&self, request: RequestView) -> HandlerResult;
}

impl<F> OperationHandler for F
where
    F: Fn(RequestView) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, request: RequestView) -> HandlerResult {
        self(request)
    }
}

/// A failure that maps onto a specific HTTP status.
///
/// The dispatcher answers with `status` and `message` as a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ResponseError {
    pub status: u16,
    pub message: String,
}

impl ResponseError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }
}

/// Error side of [`HandlerResult`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Declared failure, answered with its own status.
    #[error(transparent)]
    Response(#[from] ResponseError),
    /// A body read failed. Unclassified unless the handler maps it.
    #[error(transparent)]
    Body(#[from] BodyError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    #[must_use]
    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            HandlerError::Response(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(_: RequestView) -> HandlerResult {
        Err(ResponseError::bad_request("bad input").into())
    }

    #[test]
    fn test_fn_items_are_handlers() {
        fn assert_handler<H: OperationHandler>(_: &H) {}
        assert_handler(&failing);
        assert_handler(&|_: RequestView| -> HandlerResult {
            Ok(OperationResponse::empty(204))
        });
    }

    #[test]
    fn test_error_conversions() {
        let err: HandlerError = ResponseError::new(409, "conflict").into();
        assert_eq!(err.as_response().map(|e| e.status), Some(409));

        let err: HandlerError = BodyError::AlreadyConsumed.into();
        assert!(err.as_response().is_none());

        let err: HandlerError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
