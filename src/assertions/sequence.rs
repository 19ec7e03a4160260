//! Assertions over plain sequences, typically values drained from a stream.

use std::fmt::{Arguments, Debug};

use super::method_call::fail;

/// Assert `sequence` contains `element`.
///
/// # Panics
///
/// Panics if no item equals `element`.
#[track_caller]
pub fn assert_contains<T>(sequence: &[T], element: &T, message: Option<Arguments<'_>>)
where
    T: PartialEq + Debug,
{
    if !sequence.contains(element) {
        fail(
            format_args!("expected {sequence:?} to contain {element:?}"),
            message,
        );
    }
}

/// Assert `sequence` is empty.
///
/// # Panics
///
/// Panics if `sequence` has any items.
#[track_caller]
pub fn assert_empty<T: Debug>(sequence: &[T], message: Option<Arguments<'_>>) {
    if !sequence.is_empty() {
        fail(format_args!("expected empty sequence, got {sequence:?}"), message);
    }
}

/// Assert `sequence` has exactly `count` items.
///
/// # Panics
///
/// Panics if the length differs.
#[track_caller]
pub fn assert_count<T: Debug>(sequence: &[T], count: usize, message: Option<Arguments<'_>>) {
    if sequence.len() != count {
        fail(
            format_args!(
                "expected {count} items, got {} in {sequence:?}",
                sequence.len()
            ),
            message,
        );
    }
}
