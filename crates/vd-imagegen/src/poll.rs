//! Poll-with-deadline primitive
//!
//! The remote API has no completion callback; the pipeline observes a task
//! by polling its record at a fixed interval. The deadline is checked on
//! every pass, so a task can never hold the pipeline past its budget even
//! if the remote would eventually succeed.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::client::{NanoBananaClient, RemoteStatus};
use crate::error::TaskError;

/// Poll cadence and wall-clock budget for a single task.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Pause between status checks.
    pub interval: Duration,
    /// Budget from submission to a terminal remote state.
    pub deadline: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            deadline: Duration::from_secs(600), // 10 minutes
        }
    }
}

/// Poll `task_id` until it succeeds, fails, or exceeds the deadline.
/// Returns the result image URL on success.
pub async fn poll_until_complete(
    client: &NanoBananaClient,
    task_id: &str,
    settings: &PollSettings,
) -> Result<String, TaskError> {
    let started = Instant::now();
    let mut poll_count = 0u32;

    loop {
        poll_count += 1;
        let elapsed = started.elapsed();
        if elapsed > settings.deadline {
            return Err(TaskError::Timeout {
                task_id: task_id.to_string(),
                seconds: settings.deadline.as_secs(),
            });
        }

        match client.task_status(task_id).await? {
            RemoteStatus::Succeeded { image_url } => {
                info!(
                    "Generation complete ({}s, {} polls)",
                    elapsed.as_secs(),
                    poll_count
                );
                return Ok(image_url);
            }
            RemoteStatus::CreateFailed { message } | RemoteStatus::GenerateFailed { message } => {
                return Err(TaskError::Polling(message));
            }
            RemoteStatus::Generating => {
                debug!(
                    "Task {} still generating | elapsed {}s | poll #{}",
                    task_id,
                    elapsed.as_secs(),
                    poll_count
                );
                sleep(settings.interval).await;
            }
        }
    }
}
