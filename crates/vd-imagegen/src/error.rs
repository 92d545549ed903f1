//! Pipeline error taxonomy
//!
//! Every variant is fatal to a single task only. The runner catches them at
//! the per-task boundary, logs them with the plant's identifying info, and
//! continues with the next row. Nothing is retried within a task; the only
//! cross-run recovery is the skip-if-exists check.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// Submission rejected: transport failure, a non-success API code, or a
    /// response without a task id.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Polling failed: the remote reported the task dead (creation or
    /// generation failure, message passed through) or a status request
    /// could not be completed.
    #[error("Polling failed: {0}")]
    Polling(String),

    /// The wall-clock budget elapsed before the task reached a terminal
    /// remote state.
    #[error("Task {task_id} timed out after {seconds}s")]
    Timeout { task_id: String, seconds: u64 },

    /// Fetching the result image or writing it to disk failed.
    #[error("Download failed: {0}")]
    Download(String),
}
