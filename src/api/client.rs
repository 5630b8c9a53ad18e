//! GeneratorClient - talks to the video generation backend over HTTP.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::video_config::VideoConfig;

/// The environment variable name for the backend server URL.
pub const SERVER_URL_ENV: &str = "VIDGEN_SERVER_URL";

/// Default base URL for the generation backend.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Fallback message shown when the backend gives no usable error detail.
pub const DEFAULT_ERROR_MESSAGE: &str = "Video generation failed";

/// Default connection timeout (10 seconds).
///
/// No overall request timeout is set: generation is synchronous on the
/// server and can legitimately take minutes for long durations.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from a successful generation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobResponse {
    /// The unique job ID assigned by the backend.
    pub job_id: String,
    /// Human-readable confirmation message.
    pub message: String,
    /// URL of the rendered video, when the backend produced one.
    #[serde(default)]
    pub video_url: Option<String>,
}

impl JobResponse {
    /// Suggested filename for saving the video locally.
    ///
    /// Follows the `video_<job_id>.<ext>` convention, where the extension
    /// is taken from the video URL and falls back to `mp4`.
    pub fn download_name(&self) -> String {
        format!("video_{}.{}", self.job_id, self.video_extension())
    }

    /// File extension of the video URL, defaulting to `mp4`.
    fn video_extension(&self) -> &str {
        self.video_url
            .as_deref()
            .and_then(|url| {
                // Query string and fragment are not part of the filename.
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let name = path.rsplit('/').next().unwrap_or(path);
                name.rsplit_once('.').map(|(_, ext)| ext)
            })
            .filter(|ext| !ext.is_empty())
            .unwrap_or("mp4")
    }
}

/// Response from the health endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    /// Reported server status, `"ok"` when healthy.
    pub status: String,
}

/// Error payload the backend attaches to rejection responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// Client for communicating with the video generation backend.
#[derive(Clone)]
pub struct GeneratorClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl GeneratorClient {
    /// Create a new GeneratorClient from the environment.
    ///
    /// Reads the `VIDGEN_SERVER_URL` environment variable and falls back
    /// to `http://localhost:8000` when it is not set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Create a new GeneratorClient with an explicit base URL.
    ///
    /// Useful for testing against a mock server. A trailing slash on the
    /// URL is trimmed so joined endpoint paths stay clean.
    pub fn with_base_url(base_url: String) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// The base URL this client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a generation request and wait for the rendered result.
    ///
    /// Sends the configuration as JSON to `POST /api/generate`. The
    /// backend renders synchronously, so this call only returns once the
    /// video is ready or the request has been rejected.
    ///
    /// # Arguments
    ///
    /// * `config` - The animation type, duration, and music style to render
    ///
    /// # Returns
    ///
    /// A `JobResponse` with the job ID, confirmation message, and the
    /// video URL when one was produced.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the backend answers with a
    /// non-success status (carrying the `detail` field of the error body
    /// when it can be parsed), or `ApiError::Http` when the request or
    /// the decoding of a success body fails.
    pub async fn generate(&self, config: &VideoConfig) -> Result<JobResponse, ApiError> {
        let url = format!("{}/api/generate", self.base_url);

        log::info!(
            "Submitting generation request: {} / {}s / {}",
            config.animation_type().name(),
            config.duration(),
            config.music_style().name()
        );

        let response = self.http_client.post(&url).json(config).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            log::warn!("Generation rejected with status {}: {:?}", status, detail);
            return Err(ApiError::Rejected { status, detail });
        }

        let job: JobResponse = response.json().await?;
        log::info!("Generation succeeded, job_id: {}", job.job_id);
        Ok(job)
    }

    /// Check whether the backend is reachable and healthy.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for non-success statuses or
    /// `ApiError::Http` when the request fails.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/api/health", self.base_url);

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ApiError::Rejected { status, detail });
        }

        let health: HealthResponse = response.json().await?;
        Ok(health)
    }

    /// Download a rendered video from a URL to disk.
    ///
    /// Streams the body to the destination file without buffering the
    /// whole video in memory.
    ///
    /// # Arguments
    ///
    /// * `url` - The video URL reported by the backend
    /// * `dest` - The destination path for the video file
    ///
    /// # Returns
    ///
    /// The number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the download request fails,
    /// `ApiError::Rejected` if the server answers with a non-success
    /// status, or `ApiError::Io` if writing to disk fails.
    pub async fn download_video(&self, url: &str, dest: &Path) -> Result<u64, ApiError> {
        // A bare filename has an empty parent; nothing to create then.
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        log::info!("Downloading video from: {}", url);
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ApiError::Rejected { status, detail });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        use futures_util::StreamExt;
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        log::info!("Video saved to {:?} ({} bytes)", dest, written);

        Ok(written)
    }
}

/// Errors that can occur while talking to the generation backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected request with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        /// HTTP status code of the rejection.
        status: reqwest::StatusCode,
        /// The `detail` field of the error body, when one was parseable.
        detail: Option<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The message to surface to the user for this error.
    ///
    /// A rejection that carries a `detail` string is reported verbatim;
    /// every other failure collapses to the fixed fallback message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}
