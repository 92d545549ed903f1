//! Sequential pipeline runner
//!
//! Walks the catalog in row order with one outstanding remote task at a
//! time: skip if the illustration already exists or the row has nothing to
//! generate, otherwise submit, poll to a terminal state, download. A
//! single task's failure never stops the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use vd_catalog::Catalog;
use vd_types::PlantRecord;

use crate::client::{ImageSettings, NanoBananaClient};
use crate::error::TaskError;
use crate::poll::{poll_until_complete, PollSettings};
use crate::task::{GenerationTask, SkipReason, TaskOutcome};

/// Configuration for one pipeline run. The verbosity decision lives with
/// the caller (it picks the tracing filter); everything else that varies
/// per run is explicit here.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    /// First row to process (0-indexed).
    pub start: usize,
    /// Process at most this many rows.
    pub limit: Option<usize>,
    /// Log intended actions, make no network calls.
    pub dry_run: bool,
    pub settings: ImageSettings,
    pub poll: PollSettings,
    /// Pause after every completed (non-skipped) task.
    pub task_pause: Duration,
    /// Additional pause after a failed task.
    pub failure_pause: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("tropical-plants.csv"),
            output_dir: PathBuf::from("img"),
            start: 0,
            limit: None,
            dry_run: false,
            settings: ImageSettings::default(),
            poll: PollSettings::default(),
            task_pause: Duration::from_secs(1),
            failure_pause: Duration::from_secs(2),
        }
    }
}

/// Running totals for one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

/// The pipeline itself. Holds the run configuration and, unless this is a
/// dry run, the API client.
pub struct Pipeline {
    config: PipelineConfig,
    client: Option<NanoBananaClient>,
}

impl Pipeline {
    /// `client` may be `None` only for dry runs.
    pub fn new(config: PipelineConfig, client: Option<NanoBananaClient>) -> Self {
        Self { config, client }
    }

    /// Process the configured row range, returning the totals. Individual
    /// task failures are counted, not propagated.
    pub async fn run(&self) -> anyhow::Result<RunSummary> {
        if !self.config.dry_run && self.client.is_none() {
            anyhow::bail!("an API client is required unless dry_run is set");
        }

        let catalog = Catalog::load(&self.config.csv_path);
        if catalog.is_empty() {
            warn!(
                "No plants loaded from {} - nothing to do",
                self.config.csv_path.display()
            );
            return Ok(RunSummary::default());
        }

        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let total = catalog.len();
        info!("Total plants in catalog: {}", total);
        info!(
            "Resolution: {} | Aspect ratio: {} | Start row: {} | Limit: {} | Dry run: {}",
            self.config.settings.resolution,
            self.config.settings.aspect_ratio,
            self.config.start,
            self.config
                .limit
                .map(|n| n.to_string())
                .unwrap_or_else(|| "none".to_string()),
            self.config.dry_run
        );

        let end = match self.config.limit {
            Some(limit) => total.min(self.config.start.saturating_add(limit)),
            None => total,
        };

        let run_started = tokio::time::Instant::now();
        let mut summary = RunSummary::default();

        for (index, plant) in catalog
            .plants()
            .iter()
            .enumerate()
            .take(end)
            .skip(self.config.start)
        {
            info!(
                "[{}/{}] {} ({})",
                index + 1,
                total,
                plant.english_name,
                plant.botanical_name
            );

            let outcome = self.process_plant(plant).await;

            match &outcome {
                TaskOutcome::Succeeded { .. } => summary.succeeded += 1,
                TaskOutcome::Failed(_) | TaskOutcome::TimedOut => summary.failed += 1,
                TaskOutcome::Skipped(_) => summary.skipped += 1,
            }

            info!(
                "Progress: {} processed | {} success | {} errors | {} skipped",
                summary.processed(),
                summary.succeeded,
                summary.failed,
                summary.skipped
            );

            // Space out remote calls; failures get a longer breather.
            if !self.config.dry_run {
                match &outcome {
                    TaskOutcome::Succeeded { .. } => sleep(self.config.task_pause).await,
                    TaskOutcome::Failed(_) | TaskOutcome::TimedOut => {
                        sleep(self.config.task_pause + self.config.failure_pause).await
                    }
                    TaskOutcome::Skipped(_) => {}
                }
            }
        }

        let elapsed = run_started.elapsed();
        info!(
            "COMPLETE: {} success | {} errors | {} skipped in {:.1}s",
            summary.succeeded,
            summary.failed,
            summary.skipped,
            elapsed.as_secs_f64()
        );
        if summary.succeeded > 0 {
            info!(
                "Average time per image: {:.1}s",
                elapsed.as_secs_f64() / summary.succeeded as f64
            );
        }

        Ok(summary)
    }

    /// Drive one row to a terminal state. Never returns an error; every
    /// failure is folded into the outcome.
    async fn process_plant(&self, plant: &PlantRecord) -> TaskOutcome {
        let image_name = plant.image_name.trim();
        let prompt = plant.image_prompt.trim();

        if image_name.is_empty() || prompt.is_empty() {
            warn!(
                "SKIP: {} ({}) - missing image name or prompt",
                plant.english_name, plant.botanical_name
            );
            return TaskOutcome::Skipped(SkipReason::MissingFields);
        }

        let destination = self.config.output_dir.join(image_name);
        if destination.exists() {
            info!("SKIP: {} (already exists)", image_name);
            return TaskOutcome::Skipped(SkipReason::AlreadyExists);
        }

        let task = GenerationTask {
            image_name: image_name.to_string(),
            prompt: prompt.to_string(),
            english_name: plant.english_name.clone(),
            botanical_name: plant.botanical_name.clone(),
        };

        if self.config.dry_run {
            info!("[DRY RUN] Would generate: {}", task.image_name);
            debug!(
                "Prompt: {}",
                task.prompt.chars().take(200).collect::<String>()
            );
            return TaskOutcome::Succeeded { bytes: 0 };
        }

        let Some(client) = &self.client else {
            // run() refuses this combination before iterating.
            return TaskOutcome::Failed(TaskError::Submission(
                "no API client configured".to_string(),
            ));
        };

        match self.execute(client, &task, &destination).await {
            Ok(bytes) => {
                info!("SAVED: {} ({:.1} KB)", task.image_name, bytes as f64 / 1024.0);
                TaskOutcome::Succeeded { bytes }
            }
            Err(TaskError::Timeout { task_id, seconds }) => {
                error!(
                    "TIMEOUT: {} ({}) - task {} exceeded {}s",
                    task.english_name, task.botanical_name, task_id, seconds
                );
                TaskOutcome::TimedOut
            }
            Err(e) => {
                error!(
                    "ERROR: {} ({}): {}",
                    task.english_name, task.botanical_name, e
                );
                TaskOutcome::Failed(e)
            }
        }
    }

    /// Submit, poll, download. Any step's error aborts this task only.
    async fn execute(
        &self,
        client: &NanoBananaClient,
        task: &GenerationTask,
        destination: &Path,
    ) -> Result<u64, TaskError> {
        info!("Submitting task for: {}", task.image_name);
        let task_id = client.submit_task(&task.prompt, &self.config.settings).await?;
        info!("Task submitted: {}", task_id);

        let image_url = poll_until_complete(client, &task_id, &self.config.poll).await?;

        info!("Downloading image...");
        client.download_image(&image_url, destination).await
    }
}
