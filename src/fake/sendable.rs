//! Thread-safe fake method call.
//!
//! [`SendableMethodCall`] has the same rules and history as
//! [`FakeMethodCall`](super::FakeMethodCall), kept together in one state block
//! behind a single [`parking_lot::Mutex`]. It can be shared through an `Arc`
//! by code under test that calls it from several threads or tasks.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use testkit_fake::fake::SendableMethodCall;
//!
//! let fetch = Arc::new(SendableMethodCall::<u32, bool>::new(false));
//! fetch.returns_if(true, |id| id % 2 == 0);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|id| {
//!         let fetch = Arc::clone(&fetch);
//!         thread::spawn(move || fetch.fake(id))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(fetch.call_count(), 4);
//! assert!(fetch.was_called_where(|id| *id == 3));
//! ```

use std::fmt::Debug;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::rules::{RuleStack, SharedPredicate};
use super::{Call, CallLog};
use crate::error::FakeError;

/// Rules and history, guarded together.
struct MemberData<P, R> {
    rules: RuleStack<SharedPredicate<P>, R>,
    call_history: Vec<Call<P, R>>,
}

/// A fake method that can be called from many threads at once.
///
/// Every read and write goes through one lock. Resolving the response and
/// recording the call happen in the same critical section, so a concurrent
/// [`reset_call_history`](Self::reset_call_history) lands either before or
/// after a whole call, never between its two halves.
///
/// Predicates run while the lock is held. They must be quick and must not call
/// back into the same fake, or the calling thread deadlocks.
pub struct SendableMethodCall<P, R> {
    member_data: Mutex<MemberData<P, R>>,
}

impl<P, R> SendableMethodCall<P, R>
where
    P: Clone + Send + 'static,
    R: Clone + Send,
{
    /// Create a fake that returns `default` until rules say otherwise.
    #[must_use]
    pub fn new(default: R) -> Self {
        Self {
            member_data: Mutex::new(MemberData {
                rules: RuleStack::new(default),
                call_history: Vec::new(),
            }),
        }
    }

    /// Resolve the response for `args`, record the call, and return the response.
    pub fn fake(&self, args: P) -> R {
        let mut data = self.member_data.lock();
        let return_value = data.rules.resolve(&args).clone();
        data.call_history.push(Call {
            args,
            return_value: return_value.clone(),
        });
        trace!(call_count = data.call_history.len(), "sendable fake method called");
        return_value
    }

    /// Return `value` whenever `predicate` accepts the arguments.
    pub fn returns_if<F>(&self, value: R, predicate: F) -> &Self
    where
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        let mut data = self.member_data.lock();
        data.rules.push(Box::new(predicate), value);
        debug!(rule_count = data.rules.len(), "return rule added");
        self
    }

    /// Return `value` for every call, overriding all earlier rules.
    pub fn returns(&self, value: R) -> &Self {
        self.returns_if(value, |_| true)
    }

    /// Return `value` when the arguments equal `expected`.
    pub fn returns_if_eq(&self, value: R, expected: P) -> &Self
    where
        P: PartialEq + Sync,
    {
        self.returns_if(value, move |args| *args == expected)
    }

    /// Return `value` when `field` projected from the arguments equals `expected`.
    pub fn returns_if_field<Q, G>(&self, value: R, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + Send + Sync + 'static,
        Q: PartialEq + Send + Sync + 'static,
    {
        self.returns_if(value, move |args| field(args) == expected)
    }

    /// Clear the call history. Rules are kept.
    pub fn reset_call_history(&self) {
        self.member_data.lock().call_history.clear();
        debug!("sendable fake method call history reset");
    }

    /// Get all recorded calls.
    #[must_use]
    pub fn call_history(&self) -> Vec<Call<P, R>> {
        self.member_data.lock().call_history.clone()
    }

    /// Get the number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.member_data.lock().call_history.len()
    }

    /// Check if the fake was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn args(&self) -> Option<P> {
        self.member_data
            .lock()
            .call_history
            .last()
            .map(|call| call.args.clone())
    }

    /// Get the Nth call record (0-indexed).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<Call<P, R>> {
        self.member_data.lock().call_history.get(n).cloned()
    }

    /// Check if any recorded call had exactly these arguments.
    #[must_use]
    pub fn was_called_with(&self, expected: &P) -> bool
    where
        P: PartialEq,
    {
        self.was_called_where(|args| args == expected)
    }

    /// Check if any recorded call had arguments accepted by `predicate`.
    #[must_use]
    pub fn was_called_where<F>(&self, predicate: F) -> bool
    where
        F: Fn(&P) -> bool,
    {
        self.member_data
            .lock()
            .call_history
            .iter()
            .any(|call| predicate(&call.args))
    }

    /// Number of rules, the default response included.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.member_data.lock().rules.len()
    }
}

impl<P, S, F> SendableMethodCall<P, Result<S, F>>
where
    P: Clone + Send + 'static,
    S: Clone + Send,
    F: Clone + Send,
{
    /// Dispatch like [`fake`](Self::fake) and hand the outcome to the caller.
    ///
    /// # Errors
    ///
    /// Returns the failure of the rule that matched, if it was a failure rule.
    pub fn try_fake(&self, args: P) -> Result<S, F> {
        self.fake(args)
    }

    /// Succeed with `value` whenever `predicate` accepts the arguments.
    pub fn succeeds_if<G>(&self, value: S, predicate: G) -> &Self
    where
        G: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.returns_if(Ok(value), predicate)
    }

    /// Succeed with `value` for every call.
    pub fn succeeds(&self, value: S) -> &Self {
        self.returns(Ok(value))
    }

    /// Succeed with `value` when the arguments equal `expected`.
    pub fn succeeds_if_eq(&self, value: S, expected: P) -> &Self
    where
        P: PartialEq + Sync,
    {
        self.returns_if_eq(Ok(value), expected)
    }

    /// Succeed with `value` when `field` projected from the arguments equals `expected`.
    pub fn succeeds_if_field<Q, G>(&self, value: S, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + Send + Sync + 'static,
        Q: PartialEq + Send + Sync + 'static,
    {
        self.returns_if_field(Ok(value), field, expected)
    }

    /// Fail with `error` whenever `predicate` accepts the arguments.
    pub fn fails_if<G>(&self, error: F, predicate: G) -> &Self
    where
        G: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.returns_if(Err(error), predicate)
    }

    /// Fail with `error` for every call.
    pub fn fails(&self, error: F) -> &Self {
        self.returns(Err(error))
    }

    /// Fail with `error` when the arguments equal `expected`.
    pub fn fails_if_eq(&self, error: F, expected: P) -> &Self
    where
        P: PartialEq + Sync,
    {
        self.returns_if_eq(Err(error), expected)
    }

    /// Fail with `error` when `field` projected from the arguments equals `expected`.
    pub fn fails_if_field<Q, G>(&self, error: F, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + Send + Sync + 'static,
        Q: PartialEq + Send + Sync + 'static,
    {
        self.returns_if_field(Err(error), field, expected)
    }

    /// Fail every call with a [`FakeError`].
    pub fn fails_default(&self) -> &Self
    where
        F: From<FakeError>,
    {
        self.fails(F::from(FakeError))
    }
}

impl<P, R> Default for SendableMethodCall<P, R>
where
    P: Clone + Send + 'static,
    R: Clone + Send + Default,
{
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<P, R> CallLog for SendableMethodCall<P, R>
where
    P: Clone + Send + 'static,
    R: Clone + Send,
{
    type Args = P;
    type Output = R;

    fn call_history(&self) -> Vec<Call<P, R>> {
        SendableMethodCall::call_history(self)
    }

    fn call_count(&self) -> usize {
        SendableMethodCall::call_count(self)
    }

    fn args(&self) -> Option<P> {
        SendableMethodCall::args(self)
    }
}

impl<P: Debug, R: Debug> Debug for SendableMethodCall<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.member_data.lock();
        f.debug_struct("SendableMethodCall")
            .field("rule_count", &data.rules.len())
            .field("call_history", &data.call_history)
            .finish()
    }
}
