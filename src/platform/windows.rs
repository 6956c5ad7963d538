//! Windows backend over `CreateThread` / `WaitForSingleObject`.

use std::ffi::c_void;
use std::io;
use std::ptr;

use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows_sys::Win32::System::Threading::{CreateThread, WaitForSingleObject, INFINITE};

use super::Launch;
use crate::errors::{JoinError, SpawnError};

/// Owned thread `HANDLE`, closed by [`join`].
pub(crate) struct RawThread(HANDLE);

unsafe extern "system" fn thread_start(arg: *mut c_void) -> u32 {
    // The spawner keeps the launch packet alive until it has joined us.
    let launch = unsafe { &*arg.cast::<Launch>() };
    unsafe { (launch.entry)(launch.arg) };
    0
}

/// # Safety
///
/// See [`super::spawn`].
pub(super) unsafe fn spawn(
    launch: *mut Launch,
    stack_size: Option<usize>,
) -> Result<RawThread, SpawnError> {
    // dwStackSize of 0 means the executable's default reserve size.
    let handle = unsafe {
        CreateThread(
            ptr::null(),
            stack_size.unwrap_or(0),
            Some(thread_start),
            launch.cast_const().cast(),
            0,
            ptr::null_mut(),
        )
    };
    if handle.is_null() {
        return Err(SpawnError::Os(io::Error::last_os_error()));
    }
    Ok(RawThread(handle))
}

pub(super) fn join(thread: RawThread) -> Result<(), JoinError> {
    let rc = unsafe { WaitForSingleObject(thread.0, INFINITE) };
    let waited = if rc == WAIT_OBJECT_0 {
        Ok(())
    } else {
        Err(JoinError::Os(io::Error::last_os_error()))
    };
    unsafe {
        CloseHandle(thread.0);
    }
    waited
}

pub(super) fn set_thread_name(_name: &str) {
    // SetThreadDescription would pull in another API set; worker naming
    // is debug-only, so it is skipped here.
}
