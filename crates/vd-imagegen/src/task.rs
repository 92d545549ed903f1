//! Generation tasks and their terminal states

use crate::error::TaskError;

/// One unit of pipeline work: generate and save one plant's illustration.
/// Created per row per run, discarded once its outcome is logged.
#[derive(Debug, Clone)]
pub struct GenerationTask {
    /// Output filename under the image directory.
    pub image_name: String,
    pub prompt: String,
    /// Identifying info, carried for logging only.
    pub english_name: String,
    pub botanical_name: String,
}

/// Why a task was skipped without any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The destination file already exists.
    AlreadyExists,
    /// The row has no image name or no prompt.
    MissingFields,
}

/// Terminal state of one task; no further transition occurs.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Image generated and saved; byte count of the download.
    Succeeded { bytes: u64 },
    Failed(TaskError),
    /// The poll deadline elapsed while the remote still reported progress.
    TimedOut,
    Skipped(SkipReason),
}
