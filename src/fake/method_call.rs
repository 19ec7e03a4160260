//! Single-threaded fake method call.
//!
//! [`FakeMethodCall`] keeps its rules and history in `RefCell`s so it can be
//! driven through `&self`, which is what a fake implementing a `&self` trait
//! method needs. It is deliberately `!Sync`; use
//! [`SendableMethodCall`](super::SendableMethodCall) when the code under test
//! calls it from more than one thread.
//!
//! # Example
//!
//! ```rust
//! use testkit_fake::fake::FakeMethodCall;
//!
//! trait Pricing {
//!     fn price(&self, sku: &str) -> u32;
//! }
//!
//! struct FakePricing {
//!     price: FakeMethodCall<String, u32>,
//! }
//!
//! impl Pricing for FakePricing {
//!     fn price(&self, sku: &str) -> u32 {
//!         self.price.fake(sku.to_string())
//!     }
//! }
//!
//! let fake = FakePricing { price: FakeMethodCall::new(0) };
//! fake.price.returns_if_eq(250, "coffee".to_string());
//!
//! assert_eq!(fake.price("coffee"), 250);
//! assert_eq!(fake.price("tea"), 0);
//! assert!(fake.price.was_called_with(&"tea".to_string()));
//! ```

use std::cell::RefCell;
use std::fmt::Debug;

use tracing::{debug, trace};

use super::rules::{LocalPredicate, RuleStack};
use super::{Call, CallLog};
use crate::error::FakeError;

/// A fake method that resolves responses from rules and records every call.
///
/// # Type Parameters
///
/// - `P` - The argument type (use a tuple or struct for several arguments)
/// - `R` - The response type (use `Result<S, F>` to fake failures)
///
/// Predicates run while the rule list is borrowed, so a predicate must not
/// register rules on the fake that is evaluating it.
pub struct FakeMethodCall<P, R> {
    rules: RefCell<RuleStack<LocalPredicate<P>, R>>,
    history: RefCell<Vec<Call<P, R>>>,
}

impl<P, R> FakeMethodCall<P, R>
where
    P: Clone + 'static,
    R: Clone,
{
    /// Create a fake that returns `default` until rules say otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use testkit_fake::fake::FakeMethodCall;
    ///
    /// let fake = FakeMethodCall::<(i32, i32), i32>::new(0);
    /// assert_eq!(fake.fake((1, 2)), 0);
    /// ```
    #[must_use]
    pub fn new(default: R) -> Self {
        Self {
            rules: RefCell::new(RuleStack::new(default)),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Resolve the response for `args`, record the call, and return the response.
    pub fn fake(&self, args: P) -> R {
        let return_value = self.rules.borrow().resolve(&args).clone();
        let mut history = self.history.borrow_mut();
        history.push(Call {
            args,
            return_value: return_value.clone(),
        });
        trace!(call_count = history.len(), "fake method called");
        return_value
    }

    /// Return `value` whenever `predicate` accepts the arguments.
    pub fn returns_if<F>(&self, value: R, predicate: F) -> &Self
    where
        F: Fn(&P) -> bool + 'static,
    {
        let mut rules = self.rules.borrow_mut();
        rules.push(Box::new(predicate), value);
        debug!(rule_count = rules.len(), "return rule added");
        self
    }

    /// Return `value` for every call, overriding all earlier rules.
    pub fn returns(&self, value: R) -> &Self {
        self.returns_if(value, |_| true)
    }

    /// Return `value` when the arguments equal `expected`.
    pub fn returns_if_eq(&self, value: R, expected: P) -> &Self
    where
        P: PartialEq,
    {
        self.returns_if(value, move |args| *args == expected)
    }

    /// Return `value` when `field` projected from the arguments equals `expected`.
    ///
    /// ```rust
    /// use testkit_fake::fake::FakeMethodCall;
    ///
    /// #[derive(Clone)]
    /// struct Query { table: &'static str, limit: usize }
    ///
    /// let rows = FakeMethodCall::<Query, usize>::new(0);
    /// rows.returns_if_field(3, |q| q.table, "users");
    ///
    /// assert_eq!(rows.fake(Query { table: "users", limit: 10 }), 3);
    /// assert_eq!(rows.fake(Query { table: "orders", limit: 10 }), 0);
    /// ```
    pub fn returns_if_field<Q, G>(&self, value: R, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + 'static,
        Q: PartialEq + 'static,
    {
        self.returns_if(value, move |args| field(args) == expected)
    }

    /// Clear the call history. Rules are kept.
    pub fn reset_call_history(&self) {
        self.history.borrow_mut().clear();
        debug!("fake method call history reset");
    }

    /// Get all recorded calls.
    #[must_use]
    pub fn call_history(&self) -> Vec<Call<P, R>> {
        self.history.borrow().clone()
    }

    /// Get the number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.history.borrow().len()
    }

    /// Check if the fake was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn args(&self) -> Option<P> {
        self.history.borrow().last().map(|call| call.args.clone())
    }

    /// Get the Nth call record (0-indexed).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<Call<P, R>> {
        self.history.borrow().get(n).cloned()
    }

    /// Check if any recorded call had exactly these arguments.
    #[must_use]
    pub fn was_called_with(&self, expected: &P) -> bool
    where
        P: PartialEq,
    {
        self.history.borrow().iter().any(|call| &call.args == expected)
    }

    /// Check if any recorded call had arguments accepted by `predicate`.
    #[must_use]
    pub fn was_called_where<F>(&self, predicate: F) -> bool
    where
        F: Fn(&P) -> bool,
    {
        self.history.borrow().iter().any(|call| predicate(&call.args))
    }

    /// Number of rules, the default response included.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }
}

impl<P, S, F> FakeMethodCall<P, Result<S, F>>
where
    P: Clone + 'static,
    S: Clone,
    F: Clone,
{
    /// Dispatch like [`fake`](Self::fake) and hand the outcome to the caller.
    ///
    /// The full `Result` is what gets recorded; a configured failure is only
    /// turned into an `Err` for the caller here.
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
        G: Fn(&P) -> bool + 'static,
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
        P: PartialEq,
    {
        self.returns_if_eq(Ok(value), expected)
    }

    /// Succeed with `value` when `field` projected from the arguments equals `expected`.
    pub fn succeeds_if_field<Q, G>(&self, value: S, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + 'static,
        Q: PartialEq + 'static,
    {
        self.returns_if_field(Ok(value), field, expected)
    }

    /// Fail with `error` whenever `predicate` accepts the arguments.
    pub fn fails_if<G>(&self, error: F, predicate: G) -> &Self
    where
        G: Fn(&P) -> bool + 'static,
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
        P: PartialEq,
    {
        self.returns_if_eq(Err(error), expected)
    }

    /// Fail with `error` when `field` projected from the arguments equals `expected`.
    pub fn fails_if_field<Q, G>(&self, error: F, field: G, expected: Q) -> &Self
    where
        G: Fn(&P) -> Q + 'static,
        Q: PartialEq + 'static,
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

impl<P, R> Default for FakeMethodCall<P, R>
where
    P: Clone + 'static,
    R: Clone + Default,
{
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<P, R> CallLog for FakeMethodCall<P, R>
where
    P: Clone + 'static,
    R: Clone,
{
    type Args = P;
    type Output = R;

    fn call_history(&self) -> Vec<Call<P, R>> {
        FakeMethodCall::call_history(self)
    }

    fn call_count(&self) -> usize {
        FakeMethodCall::call_count(self)
    }

    fn args(&self) -> Option<P> {
        FakeMethodCall::args(self)
    }
}

impl<P: Debug, R: Debug> Debug for FakeMethodCall<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeMethodCall")
            .field("rule_count", &self.rules.borrow().len())
            .field("call_history", &*self.history.borrow())
            .finish()
    }
}
