//! POSIX backend over `pthread_create` / `pthread_join`.

use std::ffi::c_void;
use std::io;
use std::mem::MaybeUninit;
use std::ptr;

use super::Launch;
use crate::errors::{JoinError, SpawnError};

/// Owned `pthread_t`, consumed by [`join`].
pub(crate) struct RawThread(libc::pthread_t);

extern "C" fn thread_start(arg: *mut c_void) -> *mut c_void {
    // The spawner keeps the launch packet alive until it has joined us.
    let launch = unsafe { &*arg.cast::<Launch>() };
    unsafe { (launch.entry)(launch.arg) };
    ptr::null_mut()
}

/// # Safety
///
/// See [`super::spawn`].
pub(super) unsafe fn spawn(
    launch: *mut Launch,
    stack_size: Option<usize>,
) -> Result<RawThread, SpawnError> {
    let mut attr = MaybeUninit::<libc::pthread_attr_t>::uninit();
    let rc = unsafe { libc::pthread_attr_init(attr.as_mut_ptr()) };
    if rc != 0 {
        return Err(SpawnError::Os(io::Error::from_raw_os_error(rc)));
    }

    if let Some(size) = stack_size {
        let rc = unsafe { libc::pthread_attr_setstacksize(attr.as_mut_ptr(), size) };
        if rc != 0 {
            unsafe { libc::pthread_attr_destroy(attr.as_mut_ptr()) };
            return Err(SpawnError::Os(io::Error::from_raw_os_error(rc)));
        }
    }

    let mut thread = MaybeUninit::<libc::pthread_t>::uninit();
    let rc = unsafe {
        libc::pthread_create(
            thread.as_mut_ptr(),
            attr.as_ptr(),
            thread_start,
            launch.cast(),
        )
    };
    unsafe { libc::pthread_attr_destroy(attr.as_mut_ptr()) };

    if rc != 0 {
        return Err(SpawnError::Os(io::Error::from_raw_os_error(rc)));
    }
    Ok(RawThread(unsafe { thread.assume_init() }))
}

pub(super) fn join(thread: RawThread) -> Result<(), JoinError> {
    let rc = unsafe { libc::pthread_join(thread.0, ptr::null_mut()) };
    if rc != 0 {
        return Err(JoinError::Os(io::Error::from_raw_os_error(rc)));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
pub(super) fn set_thread_name(name: &str) {
    use std::ffi::CString;
    if let Ok(cname) = CString::new(name) {
        // macOS can only name the current thread
        unsafe {
            libc::pthread_setname_np(cname.as_ptr());
        }
    }
}

#[cfg(target_os = "linux")]
pub(super) fn set_thread_name(name: &str) {
    use std::ffi::CString;
    if let Ok(cname) = CString::new(name) {
        unsafe {
            libc::pthread_setname_np(libc::pthread_self(), cname.as_ptr());
        }
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub(super) fn set_thread_name(_name: &str) {
    // No portable naming call on the remaining unices
}
