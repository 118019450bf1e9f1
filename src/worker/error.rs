//! Worker-specific error types.

use std::io;
use thiserror::Error;

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Errors that can occur during worker communication.
///
/// Every variant is terminal for the single request being processed; there
/// is no retry path. Text the worker itself reports travels through
/// [`Outcome::ErrorMessage`](super::protocol::Outcome), never through this
/// enum, so it reaches the user verbatim.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker binary could not be located.
    #[error("worker binary not found: {0}")]
    BinaryNotFound(String),

    /// Failed to spawn the worker process.
    #[error("failed to spawn worker process: {0}")]
    SpawnFailed(#[source] io::Error),

    /// Failed to write to worker stdin.
    #[error("failed to write to worker: {0}")]
    WriteFailed(#[source] io::Error),

    /// Failed to serialize the request to JSON.
    #[error("failed to serialize request: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// The worker produced no response within the configured timeout.
    #[error("no response from worker after {0} seconds")]
    Timeout(u64),

    /// The worker process exited before responding.
    #[error("worker process exited before responding")]
    WorkerExited,
}

impl From<io::Error> for WorkerError {
    fn from(err: io::Error) -> Self {
        Self::WriteFailed(err)
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for WorkerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::WorkerExited
    }
}
