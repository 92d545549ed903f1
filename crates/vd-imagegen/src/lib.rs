//! Image generation pipeline
//!
//! Best-effort, offline population of catalog illustrations through the
//! NanoBanana generation API. One task per plant, strictly sequential, one
//! outstanding remote task at a time; idempotence comes from skipping rows
//! whose destination file already exists.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod poll;
pub mod task;

pub use client::{ImageSettings, NanoBananaClient};
pub use error::TaskError;
pub use pipeline::{Pipeline, PipelineConfig, RunSummary};
pub use poll::PollSettings;
pub use task::{GenerationTask, SkipReason, TaskOutcome};
