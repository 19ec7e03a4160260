//! # testkit-fake 🧰
//!
//! > Rule-based fakes and call recording for Rust unit tests
//!
//! **testkit-fake** provides fakes that return configurable responses and
//! remember every call, assertions that read those calls back, and a helper
//! that drains async streams from synchronous tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_fake::prelude::*;
//!
//! let find_user = FakeMethodCall::<u32, Option<&str>>::new(None);
//! find_user.returns_if_eq(Some("ada"), 7);
//!
//! assert_eq!(find_user.fake(7), Some("ada"));
//! assert_eq!(find_user.fake(8), None);
//!
//! testkit_fake::assert_called_times!(find_user, 2);
//! testkit_fake::assert_any_call_with!(find_user, 7);
//! ```
//!
//! ## Features
//!
//! - 🎭 **Fake Method Calls** - Default response plus predicate rules, newest rule wins
//! - 🔒 **Sendable Fakes** - The same fake behind one lock for multi-threaded code
//! - 💥 **Failure Simulation** - `Result` responses with `succeeds`/`fails` helpers
//! - 🔍 **Call Assertions** - `assert_called!` and friends, reported at the test's line
//! - 🌊 **Stream Draining** - Collect a stream's output with a timeout

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod drain;
pub mod error;
pub mod fake;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_fake::prelude::*;
/// ```
pub mod prelude {
    pub use crate::drain::{try_wait_all, try_wait_last, wait_all, wait_last, Drain, DrainConfig};
    pub use crate::error::{DrainError, FakeError};
    pub use crate::fake::{Call, CallLog, FakeMethodCall, FakeProperty, SendableMethodCall};
}

// Re-exports
pub use error::{DrainError, FakeError};
pub use fake::{Call, CallLog, FakeMethodCall, FakeProperty, SendableMethodCall};
