//! Return rules shared by both dispatcher variants.

/// Predicate type stored by [`FakeMethodCall`](super::FakeMethodCall).
pub(crate) type LocalPredicate<P> = dyn Fn(&P) -> bool;

/// Predicate type stored by [`SendableMethodCall`](super::SendableMethodCall).
pub(crate) type SharedPredicate<P> = dyn Fn(&P) -> bool + Send + Sync;

/// A single override: when `predicate` accepts the arguments, return `value`.
pub(crate) struct ReturnRule<Pred: ?Sized, R> {
    predicate: Box<Pred>,
    value: R,
}

/// The default response plus every override registered after it.
///
/// The default sits beneath the override list rather than inside it, so
/// resolution always ends with a value.
pub(crate) struct RuleStack<Pred: ?Sized, R> {
    default: R,
    overrides: Vec<ReturnRule<Pred, R>>,
}

impl<Pred: ?Sized, R> RuleStack<Pred, R> {
    pub(crate) fn new(default: R) -> Self {
        Self {
            default,
            overrides: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, predicate: Box<Pred>, value: R) {
        self.overrides.push(ReturnRule { predicate, value });
    }

    /// Number of rules, the default included.
    pub(crate) fn len(&self) -> usize {
        self.overrides.len() + 1
    }

    /// Find the value of the newest rule accepting `args`.
    pub(crate) fn resolve<P>(&self, args: &P) -> &R
    where
        Pred: Fn(&P) -> bool,
    {
        self.overrides
            .iter()
            .rev()
            .find(|rule| (rule.predicate)(args))
            .map_or(&self.default, |rule| &rule.value)
    }
}
