//! Assertion failures point at the test, not at the library.
//!
//! Kept in its own test binary because it installs a panic hook.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use testkit_fake::assert_called;
use testkit_fake::fake::FakeMethodCall;

#[test]
fn test_failure_is_reported_at_call_site() {
    let location = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&location);
    panic::set_hook(Box::new(move |info| {
        *seen.lock().unwrap() = info.location().map(|l| (l.file().to_string(), l.line()));
    }));

    let fake = FakeMethodCall::<u8, ()>::new(());
    let expected_line = line!() + 1;
    let result = panic::catch_unwind(AssertUnwindSafe(|| assert_called!(fake)));
    let _ = panic::take_hook();

    assert!(result.is_err());
    let (file, line) = location.lock().unwrap().clone().unwrap();
    assert!(file.ends_with("caller_location.rs"), "reported in {file}");
    assert_eq!(line, expected_line);
}
