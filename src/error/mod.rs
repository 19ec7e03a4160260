//! Error definitions
//!
//! This module provides error types for testkit-fake.

use std::convert::Infallible;
use std::time::Duration;

use thiserror::Error;

/// Generic failure raised by fakes configured with `fails_default()`.
///
/// Use it when a test only cares that the call failed, not how.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("fake error")]
pub struct FakeError;

/// Error returned when draining a stream does not produce the expected output.
///
/// `E` is the stream's own failure type. Plain streams that cannot fail use
/// the default, [`Infallible`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrainError<E = Infallible> {
    /// The stream did not complete before the timeout elapsed.
    #[error("stream did not finish within {0:?}")]
    Unfinished(Duration),

    /// The stream completed without emitting a single value.
    #[error("stream completed with no values")]
    NoValue,

    /// The stream completed with a failure.
    #[error("stream failed: {0}")]
    Failed(E),
}

impl<E> DrainError<E> {
    /// Check if this is a timeout.
    #[must_use]
    pub fn is_unfinished(&self) -> bool {
        matches!(self, Self::Unfinished(_))
    }

    /// Take the stream's failure, if that is what this error carries.
    #[must_use]
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for drain operations
pub type DrainResult<T, E = Infallible> = std::result::Result<T, DrainError<E>>;
