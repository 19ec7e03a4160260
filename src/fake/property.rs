//! Injecting a fake behind the capability the code under test expects.

use std::fmt::Debug;
use std::ops::Deref;

/// A fake together with the capability view handed to the code under test.
///
/// The test keeps the concrete fake to configure rules and inspect calls,
/// while the subject only ever sees `C`. Both are fixed at construction.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use testkit_fake::fake::{FakeProperty, SendableMethodCall};
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// #[derive(Default)]
/// struct FakeClock {
///     now: SendableMethodCall<(), u64>,
/// }
///
/// impl Clock for FakeClock {
///     fn now(&self) -> u64 {
///         self.now.fake(())
///     }
/// }
///
/// let clock = FakeProperty::new(Arc::new(FakeClock::default()), |fake| {
///     Arc::clone(fake) as Arc<dyn Clock>
/// });
/// clock.projected_value().now.returns(1_700_000_000);
///
/// assert_eq!(clock.now(), 1_700_000_000);
/// assert_eq!(clock.projected_value().now.call_count(), 1);
/// ```
pub struct FakeProperty<F, C> {
    wrapped_value: C,
    projected_value: F,
}

impl<F, C> FakeProperty<F, C> {
    /// Wrap `fake`, deriving the capability view with `convert`.
    #[must_use]
    pub fn new<G>(fake: F, convert: G) -> Self
    where
        G: FnOnce(&F) -> C,
    {
        Self {
            wrapped_value: convert(&fake),
            projected_value: fake,
        }
    }

    /// The capability view passed to the code under test.
    #[must_use]
    pub fn wrapped_value(&self) -> &C {
        &self.wrapped_value
    }

    /// The concrete fake, for configuring rules and checking calls.
    #[must_use]
    pub fn projected_value(&self) -> &F {
        &self.projected_value
    }

    /// Split into the capability view and the concrete fake.
    #[must_use]
    pub fn into_parts(self) -> (C, F) {
        (self.wrapped_value, self.projected_value)
    }
}

impl<F, C> Deref for FakeProperty<F, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.wrapped_value
    }
}

impl<F: Debug, C> Debug for FakeProperty<F, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeProperty")
            .field("projected_value", &self.projected_value)
            .finish_non_exhaustive()
    }
}
