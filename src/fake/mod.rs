//! Rule-based fakes for standing in behind traits in unit tests.
//!
//! This module provides:
//!
//! - [`FakeMethodCall`] - Single-threaded fake that records calls and returns configured values
//! - [`SendableMethodCall`] - The same fake behind a lock, for code that calls it from many threads
//! - [`FakeProperty`] - Holds a fake and the capability view handed to the code under test
//! - [`CallLog`] - Read access to recorded calls, shared by both fakes
//!
//! # Return Rules
//!
//! A fake starts with a default response. Every rule registered afterwards
//! overrides it for the arguments its predicate accepts; when several rules
//! match, the one registered last wins.
//!
//! ```rust
//! use testkit_fake::fake::FakeMethodCall;
//!
//! let lookup = FakeMethodCall::<u32, &str>::new("unknown");
//! lookup.returns_if("admin", |id| *id == 1);
//!
//! assert_eq!(lookup.fake(1), "admin");
//! assert_eq!(lookup.fake(2), "unknown");
//! assert_eq!(lookup.call_count(), 2);
//! assert_eq!(lookup.args(), Some(2));
//! ```
//!
//! # Failing Calls
//!
//! ```rust
//! use testkit_fake::error::FakeError;
//! use testkit_fake::fake::FakeMethodCall;
//!
//! let load = FakeMethodCall::<&str, Result<u32, FakeError>>::new(Err(FakeError));
//! load.succeeds_if(42, |key| *key == "ok");
//!
//! assert_eq!(load.try_fake("ok"), Ok(42));
//! assert_eq!(load.try_fake("bad"), Err(FakeError));
//! ```

use std::rc::Rc;
use std::sync::Arc;

mod method_call;
mod property;
mod rules;
mod sendable;

pub use method_call::FakeMethodCall;
pub use property::FakeProperty;
pub use sendable::SendableMethodCall;

/// A record of a single call to a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<P, R> {
    /// The arguments passed to the call.
    pub args: P,
    /// The response the fake resolved for those arguments.
    pub return_value: R,
}

/// Read access to the calls recorded by a fake.
///
/// Implemented by [`FakeMethodCall`] and [`SendableMethodCall`] so that
/// assertion helpers accept either one.
pub trait CallLog {
    /// Argument type of the faked method.
    type Args;
    /// Response type of the faked method.
    type Output;

    /// Snapshot of every recorded call, oldest first.
    fn call_history(&self) -> Vec<Call<Self::Args, Self::Output>>;

    /// Number of recorded calls.
    fn call_count(&self) -> usize {
        self.call_history().len()
    }

    /// Check if at least one call was recorded.
    fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of the most recent call.
    fn args(&self) -> Option<Self::Args> {
        self.call_history().pop().map(|call| call.args)
    }
}

impl<L: CallLog + ?Sized> CallLog for &L {
    type Args = L::Args;
    type Output = L::Output;

    fn call_history(&self) -> Vec<Call<Self::Args, Self::Output>> {
        (**self).call_history()
    }

    fn call_count(&self) -> usize {
        (**self).call_count()
    }

    fn args(&self) -> Option<Self::Args> {
        (**self).args()
    }
}

impl<L: CallLog + ?Sized> CallLog for Rc<L> {
    type Args = L::Args;
    type Output = L::Output;

    fn call_history(&self) -> Vec<Call<Self::Args, Self::Output>> {
        (**self).call_history()
    }

    fn call_count(&self) -> usize {
        (**self).call_count()
    }

    fn args(&self) -> Option<Self::Args> {
        (**self).args()
    }
}

impl<L: CallLog + ?Sized> CallLog for Arc<L> {
    type Args = L::Args;
    type Output = L::Output;

    fn call_history(&self) -> Vec<Call<Self::Args, Self::Output>> {
        (**self).call_history()
    }

    fn call_count(&self) -> usize {
        (**self).call_count()
    }

    fn args(&self) -> Option<Self::Args> {
        (**self).args()
    }
}
