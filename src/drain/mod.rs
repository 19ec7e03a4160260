//! Blocking collection of asynchronous streams for synchronous tests.
//!
//! This module provides:
//!
//! - [`wait_all`] / [`wait_last`] - Drain a plain stream until it ends
//! - [`try_wait_all`] / [`try_wait_last`] - Drain a stream of `Result`s, stopping at the first failure
//! - [`Drain`] / [`DrainConfig`] - The same operations with a custom timeout
//!
//! The calling thread polls the stream itself and parks between wake-ups, so
//! no runtime is needed as long as whatever feeds the stream runs elsewhere
//! (another thread, or a channel filled up front).
//!
//! # Example
//!
//! ```rust
//! use std::thread;
//! use std::time::Duration;
//!
//! use futures::channel::mpsc;
//! use testkit_fake::drain::{wait_all, wait_last};
//!
//! let (tx, rx) = mpsc::unbounded();
//! thread::spawn(move || {
//!     for n in 1..=3 {
//!         thread::sleep(Duration::from_millis(5));
//!         tx.unbounded_send(n).unwrap();
//!     }
//! });
//!
//! assert_eq!(wait_all(rx), Ok(vec![1, 2, 3]));
//! assert_eq!(wait_last(futures::stream::iter(["a", "b"])), Ok("b"));
//! ```

use std::pin::pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

use futures_core::Stream;
use tracing::debug;

use crate::error::{DrainError, DrainResult};

/// How long draining waits before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Ready items drained between deadline checks while a stream never pends.
const READY_STREAK_CHECK: usize = 1024;

/// Configuration for draining streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainConfig {
    /// Maximum wall-clock time to wait for the stream to complete.
    pub timeout: Duration,
}

impl DrainConfig {
    /// Create a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Drains streams on the calling thread, bounded by a timeout.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use testkit_fake::drain::{Drain, DrainConfig};
/// use testkit_fake::error::DrainError;
///
/// let drain = Drain::with_config(DrainConfig::new().timeout(Duration::from_millis(20)));
///
/// let never = futures::stream::pending::<u8>();
/// assert_eq!(drain.wait_all(never), Err(DrainError::Unfinished(Duration::from_millis(20))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Drain {
    config: DrainConfig,
}

impl Drain {
    /// Create a drain with the default one second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drain with the given configuration.
    #[must_use]
    pub fn with_config(config: DrainConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DrainConfig {
        &self.config
    }

    /// Collect every value of `stream` until it ends.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::Unfinished`] if the stream has not ended when the
    /// timeout elapses. A stream that ends without ever returning `Pending`
    /// finishes regardless of the timeout, provided it ends within 1024 items.
    pub fn wait_all<S>(&self, stream: S) -> DrainResult<Vec<S::Item>>
    where
        S: Stream,
    {
        self.collect(stream, Ok)
    }

    /// Collect `stream` and return only its final value.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::Unfinished`] on timeout and
    /// [`DrainError::NoValue`] if the stream ended without emitting anything.
    pub fn wait_last<S>(&self, stream: S) -> DrainResult<S::Item>
    where
        S: Stream,
    {
        self.wait_all(stream)?.pop().ok_or(DrainError::NoValue)
    }

    /// Collect the values of a fallible stream until it ends or fails.
    ///
    /// The first `Err` item is the stream's failure: draining stops there and
    /// the error is returned as [`DrainError::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::Failed`] with the stream's own error, or
    /// [`DrainError::Unfinished`] on timeout.
    pub fn try_wait_all<S, T, E>(&self, stream: S) -> DrainResult<Vec<T>, E>
    where
        S: Stream<Item = Result<T, E>>,
    {
        self.collect(stream, |item| item)
    }

    /// Collect a fallible stream and return only its final value.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::Failed`], [`DrainError::Unfinished`], or
    /// [`DrainError::NoValue`] if the stream ended without emitting anything.
    pub fn try_wait_last<S, T, E>(&self, stream: S) -> DrainResult<T, E>
    where
        S: Stream<Item = Result<T, E>>,
    {
        self.try_wait_all(stream)?.pop().ok_or(DrainError::NoValue)
    }

    fn collect<S, T, E>(
        &self,
        stream: S,
        mut split: impl FnMut(S::Item) -> Result<T, E>,
    ) -> DrainResult<Vec<T>, E>
    where
        S: Stream,
    {
        let timeout = self.config.timeout;
        // A timeout too large to add to the clock never expires.
        let deadline = Instant::now().checked_add(timeout);
        let waker = Waker::from(Arc::new(ThreadWaker(thread::current())));
        let mut cx = Context::from_waker(&waker);
        let mut stream = pin!(stream);
        let mut outputs = Vec::new();
        let mut ready_streak = 0_usize;

        loop {
            match stream.as_mut().poll_next(&mut cx) {
                Poll::Ready(Some(item)) => match split(item) {
                    Ok(value) => outputs.push(value),
                    Err(error) => {
                        debug!(collected = outputs.len(), "stream failed while draining");
                        return Err(DrainError::Failed(error));
                    }
                },
                Poll::Ready(None) => {
                    debug!(collected = outputs.len(), "stream drained");
                    return Ok(outputs);
                }
                Poll::Pending => {
                    ready_streak = 0;
                    match deadline {
                        None => thread::park(),
                        Some(deadline) => {
                            let now = Instant::now();
                            if now >= deadline {
                                break;
                            }
                            thread::park_timeout(deadline - now);
                        }
                    }
                    continue;
                }
            }

            // A run of ready items only consults the clock every
            // READY_STREAK_CHECK items, so an endless ready stream still stops.
            ready_streak += 1;
            if ready_streak % READY_STREAK_CHECK == 0
                && deadline.is_some_and(|deadline| Instant::now() >= deadline)
            {
                break;
            }
        }

        debug!(collected = outputs.len(), ?timeout, "stream did not finish in time");
        Err(DrainError::Unfinished(timeout))
    }
}

/// Wakes the draining thread by unparking it.
struct ThreadWaker(Thread);

impl Wake for ThreadWaker {
    fn wake(self: Arc<Self>) {
        self.0.unpark();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.unpark();
    }
}

/// Collect every value of `stream` within [`DEFAULT_TIMEOUT`].
///
/// # Errors
///
/// See [`Drain::wait_all`].
pub fn wait_all<S: Stream>(stream: S) -> DrainResult<Vec<S::Item>> {
    Drain::new().wait_all(stream)
}

/// Return the final value of `stream`, drained within [`DEFAULT_TIMEOUT`].
///
/// # Errors
///
/// See [`Drain::wait_last`].
pub fn wait_last<S: Stream>(stream: S) -> DrainResult<S::Item> {
    Drain::new().wait_last(stream)
}

/// Collect a fallible stream within [`DEFAULT_TIMEOUT`].
///
/// # Errors
///
/// See [`Drain::try_wait_all`].
pub fn try_wait_all<S, T, E>(stream: S) -> DrainResult<Vec<T>, E>
where
    S: Stream<Item = Result<T, E>>,
{
    Drain::new().try_wait_all(stream)
}

/// Return the final value of a fallible stream, drained within [`DEFAULT_TIMEOUT`].
///
/// # Errors
///
/// See [`Drain::try_wait_last`].
pub fn try_wait_last<S, T, E>(stream: S) -> DrainResult<T, E>
where
    S: Stream<Item = Result<T, E>>,
{
    Drain::new().try_wait_last(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::stream;

    fn short() -> Drain {
        Drain::with_config(DrainConfig::new().timeout(Duration::from_millis(50)))
    }

    #[test]
    fn test_config_builder() {
        let config = DrainConfig::new().timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(DrainConfig::default().timeout, DEFAULT_TIMEOUT);
        assert_eq!(Drain::new().config().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_wait_all_ready_stream() {
        assert_eq!(wait_all(stream::iter(vec![1, 2, 3])), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_wait_last() {
        assert_eq!(wait_last(stream::iter(vec![1, 2, 3])), Ok(3));
    }

    #[test]
    fn test_wait_last_empty() {
        assert_eq!(wait_last(stream::empty::<i32>()), Err(DrainError::NoValue));
    }

    #[test]
    fn test_wait_all_empty() {
        assert_eq!(wait_all(stream::empty::<i32>()), Ok(vec![]));
    }

    #[test]
    fn test_values_from_another_thread() {
        let (tx, rx) = mpsc::unbounded();
        let producer = thread::spawn(move || {
            for n in 0..5 {
                thread::sleep(Duration::from_millis(2));
                tx.unbounded_send(n).unwrap();
            }
        });

        assert_eq!(wait_all(rx), Ok(vec![0, 1, 2, 3, 4]));
        producer.join().unwrap();
    }

    #[test]
    fn test_never_completing_stream_times_out() {
        let start = Instant::now();
        let result = short().wait_all(stream::pending::<i32>());

        assert_eq!(result, Err(DrainError::Unfinished(Duration::from_millis(50))));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_open_channel_times_out() {
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(1).unwrap();

        assert!(short().wait_all(rx).unwrap_err().is_unfinished());
        drop(tx);
    }

    #[test]
    fn test_endless_ready_stream_times_out() {
        let result = short().wait_all(stream::repeat(7_u8));
        assert!(result.unwrap_err().is_unfinished());
    }

    #[test]
    fn test_unbounded_timeout_drains() {
        let drain = Drain::with_config(DrainConfig::new().timeout(Duration::MAX));
        assert_eq!(drain.wait_all(stream::iter(vec![1, 2, 3])), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_unbounded_timeout_waits_for_producer() {
        let (tx, rx) = mpsc::unbounded();
        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            tx.unbounded_send("late").unwrap();
        });

        let drain = Drain::with_config(DrainConfig::new().timeout(Duration::MAX));
        assert_eq!(drain.wait_last(rx), Ok("late"));
        producer.join().unwrap();
    }

    #[test]
    fn test_zero_timeout_finishes_ready_stream() {
        let drain = Drain::with_config(DrainConfig::new().timeout(Duration::ZERO));

        assert_eq!(drain.wait_all(stream::iter(vec![1, 2, 3])), Ok(vec![1, 2, 3]));
        assert_eq!(drain.wait_last(stream::iter(0..1000)), Ok(999));
        assert_eq!(drain.wait_all(stream::empty::<u8>()), Ok(vec![]));
    }

    #[test]
    fn test_zero_timeout_still_stops_pending_stream() {
        let drain = Drain::with_config(DrainConfig::new().timeout(Duration::ZERO));
        assert_eq!(
            drain.wait_all(stream::pending::<u8>()),
            Err(DrainError::Unfinished(Duration::ZERO))
        );
    }

    #[test]
    fn test_try_wait_all_success() {
        let s = stream::iter(vec![Ok::<_, String>(1), Ok(2)]);
        assert_eq!(try_wait_all(s), Ok(vec![1, 2]));
    }

    #[test]
    fn test_try_wait_all_propagates_failure() {
        let s = stream::iter(vec![Ok(1), Err("broken"), Ok(3)]);
        assert_eq!(try_wait_all(s), Err(DrainError::Failed("broken")));
    }

    #[test]
    fn test_try_wait_last() {
        let s = stream::iter(vec![Ok::<_, String>("a"), Ok("b")]);
        assert_eq!(try_wait_last(s), Ok("b"));

        let s = stream::iter(Vec::<Result<u8, String>>::new());
        assert_eq!(try_wait_last(s), Err(DrainError::NoValue));
    }

    #[test]
    fn test_try_wait_last_failure_wins_over_values() {
        let s = stream::iter(vec![Ok(1), Err(9_u8)]);
        assert_eq!(try_wait_last(s), Err(DrainError::Failed(9)));
    }
}
