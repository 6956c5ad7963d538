//! Platform thread backends.
//!
//! A single internal abstraction for creating and joining one OS thread,
//! with the implementation selected at build time: `pthread_create` /
//! `pthread_join` through `libc` on Unix, `CreateThread` /
//! `WaitForSingleObject` through `windows-sys` on Windows. Both backends
//! expose the same contract, so everything above this module is
//! platform-independent.

use std::ffi::c_void;

use crate::errors::{JoinError, SpawnError};

#[cfg(unix)]
mod posix;
#[cfg(unix)]
use posix as imp;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as imp;

pub(crate) use imp::RawThread;

/// Launch packet read by the backend trampolines.
///
/// Each backend wraps `entry` in a trampoline with the thread ABI the OS
/// expects and calls it exactly once with `arg`. The packet itself lives
/// on the spawning caller's stack; `Send` for whatever `arg` points to is
/// enforced at the runner seam, not here.
pub(crate) struct Launch {
    pub(crate) entry: unsafe fn(*mut c_void),
    pub(crate) arg: *mut c_void,
}

/// Create one OS thread running the entry described by `launch`.
///
/// # Safety
///
/// `launch`, and everything reachable through `launch.arg`, must stay
/// valid until the spawned thread has terminated. On success the caller
/// must guarantee that by passing the returned handle to [`join`] before
/// releasing the storage.
pub(crate) unsafe fn spawn(
    launch: *mut Launch,
    stack_size: Option<usize>,
) -> Result<RawThread, SpawnError> {
    unsafe { imp::spawn(launch, stack_size) }
}

/// Block until the thread behind `thread` has terminated.
///
/// Consumes the handle; a thread is joined at most once.
pub(crate) fn join(thread: RawThread) -> Result<(), JoinError> {
    imp::join(thread)
}

/// Best-effort name for the calling thread, for debuggers and profilers.
pub(crate) fn set_thread_name(name: &str) {
    imp::set_thread_name(name);
}
