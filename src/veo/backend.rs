//! Video backend - the long-running generation API behind the client.
//!
//! [`VideoBackend`] is the seam between the generation lifecycle and the
//! transport. [`VeoHttpBackend`] talks to the Gemini REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::GenerationError;
use super::image::ImageReference;
use super::settings::{AspectRatio, Resolution, VideoModel};

/// Default base URL for the Gemini API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key on submit and status calls.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key on artifact downloads.
const DOWNLOAD_KEY_PARAM: &str = "key";

/// Default timeout for HTTP requests. Downloads of 1080p clips can be large.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One generation request as sent to the backend.
#[derive(Debug, Clone)]
pub struct SubmitRequest<'a> {
    pub model: VideoModel,
    /// Final prompt, after any sound augmentation.
    pub prompt: &'a str,
    /// Present for image-to-video requests.
    pub image: Option<&'a ImageReference>,
    pub count: u32,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
}

/// Snapshot of a long-running backend operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    /// Backend handle, used to query status.
    pub name: String,
    pub done: bool,
    /// Produced videos, present once the operation succeeded.
    pub videos: Vec<GeneratedVideo>,
    /// Error message of a failed operation.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedVideo {
    /// Retrieval URI, if the backend returned one.
    pub uri: Option<String>,
}

/// Operations the generation lifecycle needs from a video API.
///
/// The API key is passed on every call as an opaque token.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Start a generation job.
    async fn submit(
        &self,
        api_key: &str,
        request: &SubmitRequest<'_>,
    ) -> Result<Operation, GenerationError>;

    /// Re-query the status of a previously submitted operation.
    async fn get_operation(
        &self,
        api_key: &str,
        operation: &Operation,
    ) -> Result<Operation, GenerationError>;

    /// Download a produced video.
    ///
    /// Non-success responses fail with `GenerationError::Download`.
    async fn fetch_video(&self, api_key: &str, uri: &str) -> Result<Vec<u8>, GenerationError>;
}

/// Request body for `models/{model}:predictLongRunning`.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<InlineImage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineImage<'a> {
    bytes_base64_encoded: &'a str,
    mime_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    resolution: &'static str,
    aspect_ratio: &'static str,
}

/// Long-running operation resource as returned by the API.
#[derive(Debug, Deserialize)]
struct OperationResponse {
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<OperationResult>,
    #[serde(default)]
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResult {
    #[serde(default)]
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
struct GeneratedSample {
    #[serde(default)]
    video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    #[serde(default)]
    uri: Option<String>,
}

/// Error status object (`{"code": 404, "message": "..."}`).
#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiStatus,
}

impl From<OperationResponse> for Operation {
    fn from(response: OperationResponse) -> Self {
        let videos = response
            .response
            .and_then(|r| r.generate_video_response)
            .map(|r| r.generated_samples)
            .unwrap_or_default()
            .into_iter()
            .map(|sample| GeneratedVideo {
                uri: sample.video.and_then(|v| v.uri),
            })
            .collect();

        let error = response.error.map(|status| match status.code {
            Some(code) => format!("{} (code {})", status.message, code),
            None => status.message,
        });

        Operation {
            name: response.name,
            done: response.done,
            videos,
            error,
        }
    }
}

/// Gemini API implementation of [`VideoBackend`].
#[derive(Debug, Clone)]
pub struct VeoHttpBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl VeoHttpBackend {
    /// Create a backend for the public Gemini API.
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_base_url(GEMINI_API_BASE_URL.to_string())
    }

    /// Create a backend with a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: String) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-success response into `GenerationError::Api`, keeping the
    /// API's own message so callers can recognise it.
    async fn api_error(context: &str, response: reqwest::Response) -> GenerationError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);
        GenerationError::Api(format!(
            "{} failed with status {}: {}",
            context, status, message
        ))
    }
}

#[async_trait]
impl VideoBackend for VeoHttpBackend {
    async fn submit(
        &self,
        api_key: &str,
        request: &SubmitRequest<'_>,
    ) -> Result<Operation, GenerationError> {
        let url = format!(
            "{}/models/{}:predictLongRunning",
            self.base_url,
            request.model.id()
        );

        let body = PredictRequest {
            instances: vec![Instance {
                prompt: request.prompt,
                image: request.image.map(|image| InlineImage {
                    bytes_base64_encoded: image.data(),
                    mime_type: image.mime_type(),
                }),
            }],
            parameters: Parameters {
                sample_count: request.count,
                resolution: request.resolution.as_str(),
                aspect_ratio: request.aspect_ratio.as_str(),
            },
        };

        log::debug!("POST {}", url);
        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error("Generation request", response).await);
        }

        let operation: OperationResponse = response.json().await?;
        Ok(operation.into())
    }

    async fn get_operation(
        &self,
        api_key: &str,
        operation: &Operation,
    ) -> Result<Operation, GenerationError> {
        let url = format!("{}/{}", self.base_url, operation.name);

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error("Status check", response).await);
        }

        let operation: OperationResponse = response.json().await?;
        Ok(operation.into())
    }

    async fn fetch_video(&self, api_key: &str, uri: &str) -> Result<Vec<u8>, GenerationError> {
        let mut url = reqwest::Url::parse(uri)
            .map_err(|e| GenerationError::Download(format!("invalid video URI '{}': {}", uri, e)))?;
        url.query_pairs_mut().append_pair(DOWNLOAD_KEY_PARAM, api_key);

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(GenerationError::Download(
                status
                    .canonical_reason()
                    .map(|reason| format!("{} {}", status.as_u16(), reason))
                    .unwrap_or_else(|| status.to_string()),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
