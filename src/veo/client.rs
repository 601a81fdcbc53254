//! GenerationClient - drives one video generation from prompt to local file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::artifact::VideoArtifact;
use super::backend::{Operation, SubmitRequest, VideoBackend};
use super::credentials::CredentialProvider;
use super::image::ImageReference;
use super::progress::{emit, ProgressEvent, ProgressSender};
use super::settings::GenerationSettings;

/// Wait between status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Appended to the prompt when sound is requested. The API has no sound
/// parameter, so the request is made in the prompt text instead.
pub const SOUND_PROMPT_CLAUSE: &str =
    " The video should include high quality sound design matching the visual content.";

/// Message the API returns when the key is invalid or its session expired.
pub const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

/// Number of videos requested per job.
const VIDEOS_PER_REQUEST: u32 = 1;

/// Errors that can occur while generating a video.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Please provide a text prompt or an image.")]
    Validation,

    #[error("API key not configured. Connect an API key before generating.")]
    Credential,

    #[error("API key session expired or invalid. Please check your key.")]
    InvalidOrExpiredCredential,

    #[error("No video URI returned from the API.")]
    MissingArtifact,

    #[error("Failed to download video: {0}")]
    Download(String),

    #[error("Generation failed: {0}")]
    OperationFailed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map backend errors that signal a rejected key to
/// `GenerationError::InvalidOrExpiredCredential`. Everything else is returned
/// unchanged.
pub fn translate_error(error: GenerationError) -> GenerationError {
    if error.to_string().contains(ENTITY_NOT_FOUND) {
        GenerationError::InvalidOrExpiredCredential
    } else {
        error
    }
}

/// Lifecycle of the client's current job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitting,
    Polling,
    Fetching,
    Ready,
    Failed,
}

/// Everything needed to start one generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImageReference>,
    pub settings: GenerationSettings,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        image: Option<ImageReference>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            settings,
        }
    }

    /// A request needs prompt text or a reference image.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.prompt.trim().is_empty() && self.image.is_none() {
            return Err(GenerationError::Validation);
        }
        Ok(())
    }

    /// The prompt actually sent to the backend.
    pub fn final_prompt(&self) -> String {
        let mut prompt = self.prompt.clone();
        if self.settings.enable_sound {
            prompt.push_str(SOUND_PROMPT_CLAUSE);
        }
        prompt
    }
}

/// Runs generation jobs against a [`VideoBackend`].
///
/// `generate` takes `&mut self`, so a client runs at most one job at a time.
pub struct GenerationClient<B> {
    backend: B,
    credentials: Box<dyn CredentialProvider>,
    poll_interval: Duration,
    artifact_dir: PathBuf,
    state: JobState,
    ready: bool,
}

impl<B: VideoBackend> GenerationClient<B> {
    /// Create a client polling every 5 seconds. Downloaded videos are
    /// materialized in `artifact_dir`, which is created on first use.
    pub fn new(
        backend: B,
        credentials: Box<dyn CredentialProvider>,
        artifact_dir: PathBuf,
    ) -> Self {
        let ready = credentials.has_credential();
        Self {
            backend,
            credentials,
            poll_interval: DEFAULT_POLL_INTERVAL,
            artifact_dir,
            state: JobState::Idle,
            ready,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Directory where downloaded videos are materialized.
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Whether a usable key is believed to be available.
    ///
    /// Cleared when the backend rejects the key.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Re-check the credential provider.
    pub fn check_credential(&mut self) -> bool {
        self.ready = self.credentials.has_credential();
        self.ready
    }

    /// Run the provider's key selection and mark the client ready.
    pub fn connect(&mut self) -> Result<(), GenerationError> {
        self.credentials.select_credential()?;
        self.ready = self.credentials.has_credential();
        Ok(())
    }

    /// Generate a video and materialize it locally.
    ///
    /// Progress is reported on `progress`; a closed receiver only stops the
    /// reporting. Every failure is final for this job, nothing is retried.
    ///
    /// # Errors
    ///
    /// - `Validation` if there is neither prompt text nor an image
    /// - `Credential` if no key is available (no backend call is made)
    /// - `InvalidOrExpiredCredential` if the backend rejects the key
    /// - `OperationFailed` if the job finished with an error
    /// - `MissingArtifact` if the job finished without a video
    /// - `Download` if the video could not be fetched
    pub async fn generate(
        &mut self,
        request: &GenerationRequest,
        progress: &ProgressSender,
    ) -> Result<VideoArtifact, GenerationError> {
        let result = self.run(request, progress).await.map_err(translate_error);

        match &result {
            Ok(artifact) => {
                self.state = JobState::Ready;
                log::info!("Video ready at {:?}", artifact.path());
            }
            Err(e) => {
                self.state = JobState::Failed;
                if matches!(e, GenerationError::InvalidOrExpiredCredential) {
                    self.ready = false;
                }
                log::error!("Video generation failed: {}", e);
            }
        }

        result
    }

    async fn run(
        &mut self,
        request: &GenerationRequest,
        progress: &ProgressSender,
    ) -> Result<VideoArtifact, GenerationError> {
        request.validate()?;

        let api_key = self
            .credentials
            .token()
            .ok_or(GenerationError::Credential)?
            .to_string();

        let settings = request.settings;
        let prompt = request.final_prompt();

        self.state = JobState::Submitting;
        emit(progress, ProgressEvent::Submitting { model: settings.model });

        let submit = SubmitRequest {
            model: settings.model,
            prompt: &prompt,
            image: request.image.as_ref(),
            count: VIDEOS_PER_REQUEST,
            resolution: settings.resolution,
            aspect_ratio: settings.aspect_ratio,
        };
        let mut operation = self.backend.submit(&api_key, &submit).await?;
        log::info!("Generation submitted, operation: {}", operation.name);

        self.state = JobState::Polling;
        emit(progress, ProgressEvent::Submitted);

        // TODO: decide on an attempt cap or overall deadline; until then a
        // stuck operation is only ended by the backend failing it.
        let mut attempt = 0;
        while !operation.done {
            tokio::time::sleep(self.poll_interval).await;
            attempt += 1;
            emit(progress, ProgressEvent::StillProcessing { attempt });
            operation = self.backend.get_operation(&api_key, &operation).await?;
            log::debug!("Poll {}: done={}", attempt, operation.done);
        }

        self.fetch(&api_key, operation, progress).await
    }

    async fn fetch(
        &mut self,
        api_key: &str,
        operation: Operation,
        progress: &ProgressSender,
    ) -> Result<VideoArtifact, GenerationError> {
        if let Some(error) = operation.error {
            return Err(GenerationError::OperationFailed(error));
        }

        self.state = JobState::Fetching;
        emit(progress, ProgressEvent::Downloading);

        let uri = operation
            .videos
            .into_iter()
            .next()
            .and_then(|video| video.uri)
            .ok_or(GenerationError::MissingArtifact)?;

        log::info!("Downloading video from: {}", uri);
        let bytes = self.backend.fetch_video(api_key, &uri).await?;
        let artifact = VideoArtifact::materialize(&self.artifact_dir, &bytes)?;

        emit(progress, ProgressEvent::Complete);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::veo::credentials::StaticCredential;
    use crate::veo::settings::{AspectRatio, Resolution, VideoModel};

    #[test]
    fn test_validate_requires_prompt_or_image() {
        let settings = GenerationSettings::default();
        let empty = GenerationRequest::new("   ", None, settings);
        assert!(matches!(empty.validate(), Err(GenerationError::Validation)));

        let text = GenerationRequest::new("a dog", None, settings);
        assert!(text.validate().is_ok());

        let image = ImageReference::from_bytes(b"img", "image/png").unwrap();
        let image_only = GenerationRequest::new("", Some(image), settings);
        assert!(image_only.validate().is_ok());
    }

    #[test]
    fn test_final_prompt_with_sound() {
        let settings = GenerationSettings {
            enable_sound: true,
            ..GenerationSettings::default()
        };
        let request = GenerationRequest::new("Waves at night.", None, settings);
        assert_eq!(
            request.final_prompt(),
            "Waves at night. The video should include high quality sound design matching the visual content."
        );
    }

    #[test]
    fn test_final_prompt_without_sound_is_unchanged() {
        let request = GenerationRequest::new("Waves", None, GenerationSettings::default());
        assert_eq!(request.final_prompt(), "Waves");
    }

    #[test]
    fn test_translate_error_remaps_entity_not_found() {
        let err = translate_error(GenerationError::Api(
            "Status check failed with status 404 Not Found: Requested entity was not found."
                .into(),
        ));
        assert!(matches!(err, GenerationError::InvalidOrExpiredCredential));
    }

    #[test]
    fn test_translate_error_keeps_other_messages() {
        let err = translate_error(GenerationError::Api("quota exceeded".into()));
        assert_eq!(err.to_string(), "API error: quota exceeded");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            GenerationError::Validation.to_string(),
            "Please provide a text prompt or an image."
        );
        assert_eq!(
            GenerationError::MissingArtifact.to_string(),
            "No video URI returned from the API."
        );
        assert_eq!(
            GenerationError::Download("404 Not Found".into()).to_string(),
            "Failed to download video: 404 Not Found"
        );
    }

    #[test]
    fn test_new_client_state() {
        let backend = crate::veo::VeoHttpBackend::new().unwrap();
        let client = GenerationClient::new(
            backend,
            Box::new(StaticCredential::new(Some("key".into()))),
            PathBuf::from("renders"),
        );
        assert_eq!(client.state(), JobState::Idle);
        assert_eq!(client.artifact_dir(), Path::new("renders"));
        assert!(client.is_ready());
        assert_eq!(client.poll_interval(), DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_submit_request_carries_settings() {
        let settings = GenerationSettings {
            model: VideoModel::Veo30,
            aspect_ratio: AspectRatio::Portrait,
            resolution: Resolution::Hd,
            enable_sound: false,
        };
        let request = SubmitRequest {
            model: settings.model,
            prompt: "p",
            image: None,
            count: VIDEOS_PER_REQUEST,
            resolution: settings.resolution,
            aspect_ratio: settings.aspect_ratio,
        };
        assert_eq!(request.count, 1);
        assert_eq!(request.model.id(), "veo-3.0-generate-preview");
    }
}
