//! Error types for the two ways a run can fail underneath the callback:
//! creating the worker thread and waiting for it to terminate.
//!
//! The callback itself has no error channel; whatever it does is opaque to
//! the runner.

use std::io;

use thiserror::Error;

/// Result type for runner operations.
pub type ThreadResult<T> = Result<T, ThreadError>;

/// Error type covering a whole run.
#[derive(Debug, Error)]
pub enum ThreadError {
    /// The worker thread could not be created.
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    /// The worker thread could not be waited for.
    #[error(transparent)]
    Join(#[from] JoinError),
}

/// Errors that can occur while creating the worker thread.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The platform refused to create a new thread.
    #[error("failed to create thread: {0}")]
    Os(#[source] io::Error),
    /// Thread name is unusable on the platform underneath.
    #[error("invalid thread name: {0:?}")]
    InvalidName(String),
    /// Requested stack size is below the platform minimum.
    #[error("invalid stack size: {0}")]
    InvalidStackSize(usize),
}

/// Errors that can occur while waiting for the worker to terminate.
///
/// Distinct from the worker having run and exited normally; a failed wait
/// means the caller could not confirm termination.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The platform could not wait for the thread.
    #[error("failed to join thread: {0}")]
    Os(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_message_names_the_operation() {
        let err = SpawnError::Os(io::Error::from_raw_os_error(11));
        assert!(err.to_string().starts_with("failed to create thread"));
    }

    #[test]
    fn join_failure_message_names_the_operation() {
        let err = JoinError::Os(io::Error::from_raw_os_error(22));
        assert!(err.to_string().starts_with("failed to join thread"));
    }

    #[test]
    fn conversions_pick_the_matching_variant() {
        let err = ThreadError::from(SpawnError::InvalidStackSize(1024));
        assert!(matches!(
            err,
            ThreadError::Spawn(SpawnError::InvalidStackSize(1024))
        ));

        let err = ThreadError::from(JoinError::Os(io::Error::from_raw_os_error(22)));
        assert!(matches!(err, ThreadError::Join(JoinError::Os(_))));
    }
}
