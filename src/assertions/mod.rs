//! Assertions for fakes and collected values.
//!
//! This module provides assertion utilities for tests driving fakes:
//!
//! - [`assert_called!`] / [`assert_called_times!`] / [`assert_not_called!`] - How often a fake ran
//! - [`assert_called_with!`] / [`assert_called_with_field!`] - What the last call received
//! - [`assert_any_call_with!`] / [`assert_any_call_with_field!`] - What any call received
//! - [`assert_contains!`] / [`assert_empty!`] / [`assert_count!`] - Checks on plain sequences
//!
//! Each macro accepts an optional trailing format message and reports
//! failures at the line where it is used.
//!
//! # Example
//!
//! ```rust
//! use testkit_fake::fake::FakeMethodCall;
//! use testkit_fake::{assert_called_times, assert_called_with, assert_called_with_field};
//!
//! let send = FakeMethodCall::<(String, u32), ()>::new(());
//! send.fake(("orders".to_string(), 1));
//! send.fake(("orders".to_string(), 2));
//!
//! assert_called_times!(send, 2);
//! assert_called_with!(send, ("orders".to_string(), 2));
//! assert_called_with_field!(send, |(_, seq)| *seq, 2, "sequence numbers must advance");
//! ```

mod method_call;
mod sequence;

pub use method_call::{
    assert_method_was_called, assert_method_was_called_times, assert_method_was_called_with,
    assert_method_was_called_with_field, assert_method_was_ever_called_with,
    assert_method_was_ever_called_with_field, assert_method_was_not_called,
};
pub use sequence::{assert_contains, assert_count, assert_empty};

/// Assert that a fake was called at least once.
///
/// ```rust
/// use testkit_fake::{assert_called, fake::FakeMethodCall};
///
/// let fake = FakeMethodCall::<(), ()>::new(());
/// fake.fake(());
/// assert_called!(fake);
/// ```
#[macro_export]
macro_rules! assert_called {
    ($fake:expr $(,)?) => {
        $crate::assertions::assert_method_was_called(&$fake, ::core::option::Option::None)
    };
    ($fake:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_called(
            &$fake,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a fake was called exactly `count` times.
#[macro_export]
macro_rules! assert_called_times {
    ($fake:expr, $count:expr $(,)?) => {
        $crate::assertions::assert_method_was_called_times(
            &$fake,
            $count,
            ::core::option::Option::None,
        )
    };
    ($fake:expr, $count:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_called_times(
            &$fake,
            $count,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a fake was never called.
#[macro_export]
macro_rules! assert_not_called {
    ($fake:expr $(,)?) => {
        $crate::assertions::assert_method_was_not_called(&$fake, ::core::option::Option::None)
    };
    ($fake:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_not_called(
            &$fake,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that the last call to a fake received these arguments.
#[macro_export]
macro_rules! assert_called_with {
    ($fake:expr, $args:expr $(,)?) => {
        $crate::assertions::assert_method_was_called_with(
            &$fake,
            &$args,
            ::core::option::Option::None,
        )
    };
    ($fake:expr, $args:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_called_with(
            &$fake,
            &$args,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a field of the last call's arguments equals a value.
///
/// The field is selected by a closure over the arguments.
#[macro_export]
macro_rules! assert_called_with_field {
    ($fake:expr, $field:expr, $value:expr $(,)?) => {
        $crate::assertions::assert_method_was_called_with_field(
            &$fake,
            $field,
            &$value,
            ::core::option::Option::None,
        )
    };
    ($fake:expr, $field:expr, $value:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_called_with_field(
            &$fake,
            $field,
            &$value,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that some call to a fake received these arguments.
#[macro_export]
macro_rules! assert_any_call_with {
    ($fake:expr, $args:expr $(,)?) => {
        $crate::assertions::assert_method_was_ever_called_with(
            &$fake,
            &$args,
            ::core::option::Option::None,
        )
    };
    ($fake:expr, $args:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_ever_called_with(
            &$fake,
            &$args,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a field of some call's arguments equals a value.
#[macro_export]
macro_rules! assert_any_call_with_field {
    ($fake:expr, $field:expr, $value:expr $(,)?) => {
        $crate::assertions::assert_method_was_ever_called_with_field(
            &$fake,
            $field,
            &$value,
            ::core::option::Option::None,
        )
    };
    ($fake:expr, $field:expr, $value:expr, $($arg:tt)+) => {
        $crate::assertions::assert_method_was_ever_called_with_field(
            &$fake,
            $field,
            &$value,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a sequence contains an element.
///
/// ```rust
/// use testkit_fake::assert_contains;
///
/// assert_contains!(vec![1, 2, 3], 2);
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($sequence:expr, $element:expr $(,)?) => {
        $crate::assertions::assert_contains(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            &$element,
            ::core::option::Option::None,
        )
    };
    ($sequence:expr, $element:expr, $($arg:tt)+) => {
        $crate::assertions::assert_contains(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            &$element,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a sequence is empty.
#[macro_export]
macro_rules! assert_empty {
    ($sequence:expr $(,)?) => {
        $crate::assertions::assert_empty(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            ::core::option::Option::None,
        )
    };
    ($sequence:expr, $($arg:tt)+) => {
        $crate::assertions::assert_empty(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// Assert that a sequence has exactly `count` items.
#[macro_export]
macro_rules! assert_count {
    ($sequence:expr, $count:expr $(,)?) => {
        $crate::assertions::assert_count(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            $count,
            ::core::option::Option::None,
        )
    };
    ($sequence:expr, $count:expr, $($arg:tt)+) => {
        $crate::assertions::assert_count(
            ::core::convert::AsRef::<[_]>::as_ref(&$sequence),
            $count,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}
