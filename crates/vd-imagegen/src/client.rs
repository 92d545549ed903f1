//! NanoBanana API client
//!
//! Thin client over the three remote calls the pipeline needs: submit a
//! generation task, fetch a task record, download the result image.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::TaskError;

const API_BASE_URL: &str = "https://api.nanobananaapi.ai/api/v1";

/// Image settings sent with every submission.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub resolution: String,
    pub aspect_ratio: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            resolution: "1K".to_string(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

/// What the remote currently reports for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    Generating,
    Succeeded { image_url: String },
    CreateFailed { message: String },
    GenerateFailed { message: String },
}

/// Bearer-authenticated client for the generation API.
pub struct NanoBananaClient {
    api_key: String,
    base_url: String,
    client: Client,
}

// NanoBanana wire types

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    resolution: &'a str,
    #[serde(rename = "aspectRatio")]
    aspect_ratio: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<GenerateData>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    #[serde(rename = "taskId", default)]
    task_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordInfoResponse {
    #[serde(default)]
    data: Option<TaskRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct TaskRecord {
    #[serde(rename = "successFlag", default)]
    success_flag: Option<i64>,
    #[serde(default)]
    response: Option<TaskResult>,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TaskResult {
    #[serde(rename = "resultImageUrl", default)]
    result_image_url: Option<String>,
}

impl NanoBananaClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Point the client at a different API root. Tests use this.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: Client::new(),
        }
    }

    /// Build authorization header
    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Submit a generation task; returns the remote task id.
    pub async fn submit_task(
        &self,
        prompt: &str,
        settings: &ImageSettings,
    ) -> Result<String, TaskError> {
        let payload = GenerateRequest {
            prompt,
            resolution: &settings.resolution,
            aspect_ratio: &settings.aspect_ratio,
        };

        debug!("POST {}/nanobanana/generate-pro", self.base_url);
        let response = self
            .client
            .post(format!("{}/nanobanana/generate-pro", self.base_url))
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(|e| TaskError::Submission(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TaskError::Submission(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TaskError::Submission(format!("invalid response body: {}", e)))?;

        if body.code != 200 {
            return Err(TaskError::Submission(format!(
                "API error: {}",
                body.msg.unwrap_or_else(|| "Unknown error".to_string())
            )));
        }

        body.data
            .and_then(|data| data.task_id)
            .ok_or_else(|| TaskError::Submission("no taskId in response".to_string()))
    }

    /// Fetch the current state of a submitted task.
    pub async fn task_status(&self, task_id: &str) -> Result<RemoteStatus, TaskError> {
        debug!(
            "GET {}/nanobanana/record-info?taskId={}",
            self.base_url, task_id
        );
        let response = self
            .client
            .get(format!("{}/nanobanana/record-info", self.base_url))
            .header("Authorization", self.auth_header())
            .query(&[("taskId", task_id)])
            .send()
            .await
            .map_err(|e| TaskError::Polling(format!("status request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TaskError::Polling(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body: RecordInfoResponse = response
            .json()
            .await
            .map_err(|e| TaskError::Polling(format!("invalid status body: {}", e)))?;

        let record = body.data.unwrap_or_default();

        // successFlag: 0 generating, 1 success, 2 creation failed,
        // 3 generation failed. Anything unrecognized is treated as still
        // generating and left to the poll deadline.
        match record.success_flag {
            Some(1) => {
                let image_url = record
                    .response
                    .and_then(|r| r.result_image_url)
                    .ok_or_else(|| {
                        TaskError::Polling("no resultImageUrl in completed task".to_string())
                    })?;
                Ok(RemoteStatus::Succeeded { image_url })
            }
            Some(2) => Ok(RemoteStatus::CreateFailed {
                message: record
                    .error_message
                    .unwrap_or_else(|| "Task creation failed".to_string()),
            }),
            Some(3) => Ok(RemoteStatus::GenerateFailed {
                message: record
                    .error_message
                    .unwrap_or_else(|| "Generation failed".to_string()),
            }),
            _ => Ok(RemoteStatus::Generating),
        }
    }

    /// Stream the result image to `path`. Returns the byte count.
    pub async fn download_image(&self, url: &str, path: &Path) -> Result<u64, TaskError> {
        debug!("Downloading from: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TaskError::Download(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TaskError::Download(format!(
                "image host returned status: {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| TaskError::Download(format!("create {}: {}", path.display(), e)))?;

        let mut total_bytes = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TaskError::Download(format!("read body: {}", e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| TaskError::Download(format!("write {}: {}", path.display(), e)))?;
            total_bytes += chunk.len() as u64;
        }

        Ok(total_bytes)
    }
}
