//! HTTP client for the analysis backend.
//!
//! Submits dashcam footage to the backend's analyze endpoints and consumes
//! the streaming response via [`read_analysis_stream`]. A non-success status
//! fails before any stream processing begins.

use std::path::Path;

use futures_util::TryStreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{Result, TildaError};
use crate::models::{AnalysisResult, AnalysisSettings, SystemInfo, UploadResponse};
use crate::stream::read_analysis_stream;

/// Base URL the backend listens on by default.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7860";

/// Client for the tilda analysis backend API.
///
/// Provides file submission with streamed progress, capability queries, and
/// sequential backend discovery.
pub struct AnalysisClient {
    /// Base URL for the backend API.
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl AnalysisClient {
    /// Create a new client with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Submit a video for analysis.
    ///
    /// Sends a multipart POST to `/api/analyze-video` (file part `video`,
    /// JSON-encoded `settings` text part) and consumes the streaming
    /// response.
    ///
    /// # Arguments
    /// * `path` - local video file
    /// * `settings` - analysis settings sent to the backend
    /// * `on_progress` - invoked for every progress record, in arrival order
    pub async fn analyze_video<F>(
        &self,
        path: &Path,
        settings: &AnalysisSettings,
        on_progress: F,
    ) -> Result<AnalysisResult>
    where
        F: FnMut(f64, &str),
    {
        self.submit("/api/analyze-video", "video", path, settings, on_progress)
            .await
    }

    /// Submit a still image for analysis.
    ///
    /// Same contract as [`analyze_video`](Self::analyze_video), against
    /// `/api/analyze-image` with file part `image`.
    pub async fn analyze_image<F>(
        &self,
        path: &Path,
        settings: &AnalysisSettings,
        on_progress: F,
    ) -> Result<AnalysisResult>
    where
        F: FnMut(f64, &str),
    {
        self.submit("/api/analyze-image", "image", path, settings, on_progress)
            .await
    }

    async fn submit<F>(
        &self,
        endpoint: &str,
        field: &'static str,
        path: &Path,
        settings: &AnalysisSettings,
        on_progress: F,
    ) -> Result<AnalysisResult>
    where
        F: FnMut(f64, &str),
    {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = tokio::fs::read(path).await?;
        let form = Form::new()
            .part(field, Part::bytes(bytes).file_name(file_name))
            .text("settings", serde_json::to_string(settings)?);

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "submitting file for analysis");
        let response = self
            .client
            .post(&url)
            .header("Accept", "text/event-stream")
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TildaError::Server { status, message });
        }

        let stream = response.bytes_stream().map_err(TildaError::from);
        let value = read_analysis_stream(stream, on_progress).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch the backend's GPU/CPU capability report.
    pub async fn system_info(&self) -> Result<SystemInfo> {
        let url = format!("{}/api/system-info", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TildaError::Server { status, message });
        }

        Ok(response.json().await?)
    }

    /// Check if the backend is healthy and reachable.
    ///
    /// # Returns
    /// `true` if the health endpoint returns 200 OK, `false` otherwise
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        Ok(response.status().is_success())
    }

    /// Upload a file without analyzing it.
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = tokio::fs::read(path).await?;
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));

        let url = format!("{}/api/upload", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TildaError::Server { status, message });
        }

        Ok(response.json().await?)
    }

    /// Probe candidate base URLs sequentially, returning a client for the
    /// first backend whose `/api/system-info` answers.
    ///
    /// This is a plain fallback loop, deliberately separate from the stream
    /// reader; there is no retry inside the reader itself.
    pub async fn discover<I, S>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for candidate in candidates {
            let client = Self::with_base_url(candidate);
            match client.system_info().await {
                Ok(system) => {
                    info!(base_url = %client.base_url, device = %system.device, "analysis backend found");
                    return Some(client);
                }
                Err(err) => {
                    debug!(base_url = %client.base_url, error = %err, "candidate backend not reachable");
                }
            }
        }
        None
    }
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}
