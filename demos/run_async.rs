//! Minimal tour of the blocking run-on-thread helper.
//!
//! Run with: cargo run --example run_async

use oneshot_threads::{run_async, RunnerBuilder};

fn main() {
    env_logger::init();

    let mut total = 0u32;
    run_async(|| total += 40);
    run_async(|| total += 2);
    println!("both workers finished, total = {total}");

    RunnerBuilder::new()
        .name("demo-worker")
        .stack_size(1024 * 1024)
        .run(|| println!("hello from a named worker thread"))
        .expect("Failed to spawn thread");
}
