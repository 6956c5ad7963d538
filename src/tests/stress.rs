//! Stress tests for repeated and concurrent use of the runner.

mod stress_tests {
    use crate::run_async;
    use crate::tests::TEST_CONFIG;
    use portable_atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn sequential_runs_count_every_callback() {
        let config = TEST_CONFIG.lock();
        let run_count = config.stress_run_count;
        drop(config);

        // Calls are strictly sequential and blocking, so a plain counter
        // needs no synchronization beyond the join itself.
        let mut counter = 0u64;
        for _ in 0..run_count {
            run_async(|| counter += 1);
        }

        assert_eq!(counter, run_count);
    }

    #[test]
    fn concurrent_callers_are_independent() {
        let config = TEST_CONFIG.lock();
        let callers = config.concurrent_callers;
        let runs_per_caller = config.runs_per_caller;
        drop(config);

        let total = Arc::new(AtomicU64::new(0));

        std::thread::scope(|scope| {
            for _ in 0..callers {
                let total = total.clone();
                scope.spawn(move || {
                    for _ in 0..runs_per_caller {
                        run_async(|| {
                            total.fetch_add(1, Ordering::SeqCst);
                        });
                    }
                });
            }
        });

        assert_eq!(
            total.load(Ordering::SeqCst),
            callers as u64 * runs_per_caller
        );
    }

    #[test]
    fn nested_runs_complete() {
        let mut inner_ran = false;

        run_async(|| {
            run_async(|| inner_ran = true);
        });

        assert!(inner_ran);
    }

    #[test]
    fn every_run_uses_a_fresh_thread() {
        let mut ids = Vec::new();

        for _ in 0..16 {
            let mut id = None;
            run_async(|| id = Some(std::thread::current().id()));
            ids.push(id.expect("callback did not run"));
        }

        // No pooling: joined workers are gone, so no id may repeat within
        // this sequence.
        let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
