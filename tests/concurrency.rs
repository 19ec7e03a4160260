//! Sharing a `SendableMethodCall` across threads and async tasks.

use std::sync::Arc;
use std::thread;

use testkit_fake::fake::SendableMethodCall;
use testkit_fake::{assert_called_times, FakeError};

#[test]
fn test_every_thread_call_is_recorded_once() {
    const THREADS: usize = 32;
    let fake = Arc::new(SendableMethodCall::<usize, usize>::new(0));

    thread::scope(|s| {
        for i in 0..THREADS {
            let fake = &fake;
            s.spawn(move || fake.fake(i));
        }
    });

    assert_called_times!(fake, THREADS);
    let mut args: Vec<_> = fake.call_history().into_iter().map(|c| c.args).collect();
    args.sort_unstable();
    assert_eq!(args, (0..THREADS).collect::<Vec<_>>());
}

#[test]
fn test_rules_added_while_other_threads_call() {
    let fake = Arc::new(SendableMethodCall::<u32, u32>::new(0));

    thread::scope(|s| {
        let writer = &fake;
        s.spawn(move || {
            for n in 1..=20 {
                writer.returns_if_eq(n, n);
            }
        });
        for _ in 0..4 {
            let reader = &fake;
            s.spawn(move || {
                for n in 1..=20 {
                    let value = reader.fake(n);
                    assert!(value == 0 || value == n);
                }
            });
        }
    });

    assert_eq!(fake.call_count(), 80);
    assert_eq!(fake.rule_count(), 21);
    for n in 1..=20 {
        assert_eq!(fake.fake(n), n);
    }
}

#[test]
fn test_reset_races_with_calls() {
    let fake = Arc::new(SendableMethodCall::<u32, u32>::new(1));

    thread::scope(|s| {
        for _ in 0..4 {
            let fake = &fake;
            s.spawn(move || {
                for n in 0..100 {
                    fake.fake(n);
                }
            });
        }
        let resetter = &fake;
        s.spawn(move || {
            for _ in 0..10 {
                resetter.reset_call_history();
                thread::yield_now();
            }
        });
    });

    let history = fake.call_history();
    assert!(history.len() <= 400);
    assert!(history.iter().all(|call| call.return_value == 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_between_tasks() {
    let fake = Arc::new(SendableMethodCall::<u64, Result<u64, FakeError>>::new(Ok(0)));
    fake.succeeds_if(1, |n| n % 3 == 0).fails_if(FakeError, |n| *n == 7);

    let handles: Vec<_> = (0..10)
        .map(|n| {
            let fake = Arc::clone(&fake);
            tokio::spawn(async move { fake.try_fake(n) })
        })
        .collect();

    let mut failures = 0;
    for handle in handles {
        if handle.await.unwrap().is_err() {
            failures += 1;
        }
    }

    assert_eq!(failures, 1);
    assert_called_times!(fake, 10);
    assert!(fake.was_called_where(|n| *n == 9));
}
