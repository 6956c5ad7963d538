//! Crate test suite.

mod stress;

use spin::{Lazy, Mutex};

/// Tunables shared across the test modules.
pub(crate) struct TestConfig {
    pub(crate) stress_run_count: u64,
    pub(crate) concurrent_callers: usize,
    pub(crate) runs_per_caller: u64,
}

pub(crate) static TEST_CONFIG: Lazy<Mutex<TestConfig>> = Lazy::new(|| {
    // Failure diagnostics go through the log facade; route them to stderr
    // for the whole suite.
    let _ = env_logger::builder().is_test(true).try_init();

    Mutex::new(TestConfig {
        stress_run_count: 1000,
        concurrent_callers: 8,
        runs_per_caller: 100,
    })
});
