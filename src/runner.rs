//! The run-on-thread-and-wait core.
//!
//! A run is one spawn/join pair: the work closure travels to the worker
//! thread inside a stack-allocated [`Packet`], the worker invokes it
//! exactly once, and the spawning caller blocks on the join until the
//! worker has terminated. There is no observable state in between.

use std::any::Any;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

use log::trace;
use portable_atomic::{AtomicU64, Ordering};

use crate::errors::{SpawnError, ThreadResult};
use crate::platform::{self, Launch};

/// Minimum worker stack size accepted by [`RunnerBuilder::stack_size`].
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// POSIX thread names cap out at 15 bytes plus the terminator.
const MAX_NAME_LEN: usize = 15;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Per-run state shared with the worker thread.
///
/// Lives on the spawning caller's stack; the worker receives its address
/// through the launch packet and must not touch it after its entry
/// returns. Joining before the frame unwinds keeps the borrow valid, which
/// is also why the work closure does not need to be `'static`.
struct Packet<F> {
    work: Option<F>,
    name: Option<String>,
    payload: Option<Box<dyn Any + Send>>,
}

unsafe fn worker_entry<F: FnOnce() + Send>(arg: *mut c_void) {
    let packet = unsafe { &mut *arg.cast::<Packet<F>>() };
    if let Some(name) = packet.name.as_deref() {
        platform::set_thread_name(name);
    }
    if let Some(work) = packet.work.take() {
        // Unwinding out of the foreign trampoline would abort the process,
        // so the payload rides back to the caller and resumes there.
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(work)) {
            packet.payload = Some(payload);
        }
    }
}

/// Configures a single run before handing the work to a fresh thread.
///
/// ```
/// use oneshot_threads::RunnerBuilder;
///
/// let mut marker = String::new();
/// RunnerBuilder::new()
///     .name("worker")
///     .stack_size(1024 * 1024)
///     .run(|| marker.push_str("done"))
///     .expect("Failed to spawn thread");
/// assert_eq!(marker, "done");
/// ```
pub struct RunnerBuilder {
    /// Worker thread name (for debuggers and profilers)
    name: Option<String>,
    /// Worker stack size in bytes
    stack_size: Option<usize>,
}

impl RunnerBuilder {
    /// Create a builder with platform-default settings.
    pub fn new() -> Self {
        Self {
            name: None,
            stack_size: None,
        }
    }

    /// Set the worker thread name.
    pub fn name<T: Into<String>>(mut self, name: T) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the worker stack size in bytes.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Spawn one worker thread, run `work` on it, and wait for the worker
    /// to terminate.
    ///
    /// Configuration is validated before any thread is created, so on an
    /// `Err(ThreadError::Spawn(..))` the callback has not run. A join
    /// failure means the worker could not be waited for, not that the
    /// callback failed; the callback has no error channel of its own.
    pub fn run<F>(self, work: F) -> ThreadResult<()>
    where
        F: FnOnce() + Send,
    {
        if let Some(name) = &self.name {
            if name.len() > MAX_NAME_LEN || name.contains('\0') {
                return Err(SpawnError::InvalidName(name.clone()).into());
            }
        }
        if let Some(size) = self.stack_size {
            if size < MIN_STACK_SIZE {
                return Err(SpawnError::InvalidStackSize(size).into());
            }
        }

        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);

        let mut packet = Packet {
            work: Some(work),
            name: self.name,
            payload: None,
        };
        let mut launch = Launch {
            entry: worker_entry::<F>,
            arg: (&mut packet as *mut Packet<F>).cast(),
        };

        // Packet and launch stay on this frame; the join below holds the
        // frame open until the worker is finished with them.
        let thread = unsafe { platform::spawn(&mut launch, self.stack_size) }?;
        trace!("run {run_id}: worker thread spawned");

        platform::join(thread)?;
        trace!("run {run_id}: worker thread joined");

        if let Some(payload) = packet.payload.take() {
            panic::resume_unwind(payload);
        }
        Ok(())
    }
}

impl Default for RunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builder_runs_work() {
        let mut ran = false;
        RunnerBuilder::default()
            .run(|| ran = true)
            .expect("Failed to spawn thread");
        assert!(ran);
    }

    #[test]
    fn min_stack_size_is_accepted() {
        let mut ran = false;
        RunnerBuilder::new()
            .stack_size(MIN_STACK_SIZE)
            .run(|| ran = true)
            .expect("Failed to spawn thread");
        assert!(ran);
    }
}
