//! Assertions over the calls recorded by a fake.
//!
//! Every function here is `#[track_caller]`, so a failing assertion is
//! reported at the test's line rather than inside this module.

use std::fmt::{Arguments, Debug};

use crate::fake::CallLog;

/// Panic with `reason`, followed by the caller's message if there is one.
#[track_caller]
pub(crate) fn fail(reason: Arguments<'_>, message: Option<Arguments<'_>>) -> ! {
    match message {
        Some(message) => panic!("assertion failed: {reason}: {message}"),
        None => panic!("assertion failed: {reason}"),
    }
}

/// Assert the fake was called at least once.
///
/// # Panics
///
/// Panics if no call was recorded.
#[track_caller]
pub fn assert_method_was_called<L>(method_call: &L, message: Option<Arguments<'_>>)
where
    L: CallLog + ?Sized,
{
    if !method_call.was_called() {
        fail(format_args!("expected method to be called, but it was not"), message);
    }
}

/// Assert the fake was called exactly `count` times.
///
/// # Panics
///
/// Panics if the number of recorded calls differs.
#[track_caller]
pub fn assert_method_was_called_times<L>(
    method_call: &L,
    count: usize,
    message: Option<Arguments<'_>>,
) where
    L: CallLog + ?Sized,
{
    let actual = method_call.call_count();
    if actual != count {
        fail(
            format_args!(
                "expected method to be called {count} times, but it was called {actual} times"
            ),
            message,
        );
    }
}

/// Assert the fake was never called.
///
/// # Panics
///
/// Panics if any call was recorded.
#[track_caller]
pub fn assert_method_was_not_called<L>(method_call: &L, message: Option<Arguments<'_>>)
where
    L: CallLog + ?Sized,
{
    let actual = method_call.call_count();
    if actual > 0 {
        fail(
            format_args!("expected method not to be called, but it was called {actual} times"),
            message,
        );
    }
}

/// Assert the most recent call had exactly these arguments.
///
/// # Panics
///
/// Panics if the fake was not called or its last arguments differ.
#[track_caller]
pub fn assert_method_was_called_with<L>(
    method_call: &L,
    expected: &L::Args,
    message: Option<Arguments<'_>>,
) where
    L: CallLog + ?Sized,
    L::Args: PartialEq + Debug,
{
    match method_call.args() {
        Some(actual) if actual == *expected => {}
        Some(actual) => fail(
            format_args!("expected last call with {expected:?}, got {actual:?}"),
            message,
        ),
        None => fail(
            format_args!("expected last call with {expected:?}, but method was not called"),
            message,
        ),
    }
}

/// Assert `field` of the most recent call's arguments equals `expected`.
///
/// # Panics
///
/// Panics if the fake was not called or the projected field differs.
#[track_caller]
pub fn assert_method_was_called_with_field<L, Q, G>(
    method_call: &L,
    field: G,
    expected: &Q,
    message: Option<Arguments<'_>>,
) where
    L: CallLog + ?Sized,
    G: Fn(&L::Args) -> Q,
    Q: PartialEq + Debug,
{
    match method_call.args().map(|args| field(&args)) {
        Some(actual) if actual == *expected => {}
        Some(actual) => fail(
            format_args!("expected last call field to be {expected:?}, got {actual:?}"),
            message,
        ),
        None => fail(
            format_args!("expected last call field to be {expected:?}, but method was not called"),
            message,
        ),
    }
}

/// Assert some recorded call had exactly these arguments.
///
/// # Panics
///
/// Panics if no recorded call matches.
#[track_caller]
pub fn assert_method_was_ever_called_with<L>(
    method_call: &L,
    expected: &L::Args,
    message: Option<Arguments<'_>>,
) where
    L: CallLog + ?Sized,
    L::Args: PartialEq + Debug,
{
    let history: Vec<_> = method_call
        .call_history()
        .into_iter()
        .map(|call| call.args)
        .collect();
    if !history.contains(expected) {
        fail(
            format_args!("expected a call with {expected:?}, but calls were {history:?}"),
            message,
        );
    }
}

/// Assert `field` of some recorded call's arguments equals `expected`.
///
/// # Panics
///
/// Panics if no recorded call has a matching field.
#[track_caller]
pub fn assert_method_was_ever_called_with_field<L, Q, G>(
    method_call: &L,
    field: G,
    expected: &Q,
    message: Option<Arguments<'_>>,
) where
    L: CallLog + ?Sized,
    G: Fn(&L::Args) -> Q,
    Q: PartialEq + Debug,
{
    let fields: Vec<Q> = method_call
        .call_history()
        .iter()
        .map(|call| field(&call.args))
        .collect();
    if !fields.contains(expected) {
        fail(
            format_args!("expected a call with field {expected:?}, but fields were {fields:?}"),
            message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeMethodCall, SendableMethodCall};

    #[derive(Debug, Clone, PartialEq)]
    struct Login {
        user: &'static str,
        attempt: u32,
    }

    fn logins() -> FakeMethodCall<Login, bool> {
        let fake = FakeMethodCall::new(false);
        fake.fake(Login { user: "ann", attempt: 1 });
        fake.fake(Login { user: "ben", attempt: 2 });
        fake
    }

    #[test]
    fn test_passing_assertions() {
        let fake = logins();

        assert_method_was_called(&fake, None);
        assert_method_was_called_times(&fake, 2, None);
        assert_method_was_called_with(&fake, &Login { user: "ben", attempt: 2 }, None);
        assert_method_was_called_with_field(&fake, |l| l.user, &"ben", None);
        assert_method_was_ever_called_with(&fake, &Login { user: "ann", attempt: 1 }, None);
        assert_method_was_ever_called_with_field(&fake, |l| l.attempt, &1, None);
    }

    #[test]
    fn test_not_called() {
        let fake = SendableMethodCall::<u8, ()>::new(());
        assert_method_was_not_called(&fake, None);
        assert_method_was_called_times(&fake, 0, None);
    }

    #[test]
    #[should_panic(expected = "expected method to be called, but it was not")]
    fn test_was_called_fails() {
        let fake = FakeMethodCall::<u8, ()>::new(());
        assert_method_was_called(&fake, None);
    }

    #[test]
    #[should_panic(expected = "called 3 times, but it was called 2 times")]
    fn test_called_times_fails() {
        assert_method_was_called_times(&logins(), 3, None);
    }

    #[test]
    #[should_panic(expected = "expected method not to be called, but it was called 2 times")]
    fn test_not_called_fails() {
        assert_method_was_not_called(&logins(), None);
    }

    #[test]
    fn test_count_assertions_need_no_debug_args() {
        #[derive(Clone)]
        struct Opaque;

        let fake = FakeMethodCall::<Opaque, ()>::new(());
        assert_method_was_not_called(&fake, None);

        fake.fake(Opaque);
        assert_method_was_called(&fake, None);
        assert_method_was_called_times(&fake, 1, None);
    }

    #[test]
    #[should_panic(expected = "but method was not called")]
    fn test_called_with_on_uncalled_fake_fails() {
        let fake = FakeMethodCall::<u8, ()>::new(());
        assert_method_was_called_with(&fake, &1, None);
    }

    #[test]
    #[should_panic(expected = "expected last call field to be \"ann\", got \"ben\"")]
    fn test_called_with_field_checks_last_call_only() {
        assert_method_was_called_with_field(&logins(), |l| l.user, &"ann", None);
    }

    #[test]
    #[should_panic(expected = "expected a call with field 9")]
    fn test_ever_called_with_field_fails() {
        assert_method_was_ever_called_with_field(&logins(), |l| l.attempt, &9, None);
    }

    #[test]
    #[should_panic(expected = "but calls were [1]: lookup skipped")]
    fn test_message_is_appended() {
        let fake = FakeMethodCall::<u8, ()>::new(());
        fake.fake(1);
        assert_method_was_ever_called_with(&fake, &7, Some(format_args!("lookup {}", "skipped")));
    }
}
