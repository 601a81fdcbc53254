//! Veo video generation.
//!
//! A [`GenerationClient`] takes a prompt (and optionally a reference image),
//! submits it to a [`VideoBackend`], polls the long-running operation until it
//! finishes, and downloads the produced video as a [`VideoArtifact`].
//! Progress is reported as [`ProgressEvent`]s on a channel.

mod artifact;
mod backend;
mod client;
mod credentials;
mod image;
mod progress;
mod settings;

pub use artifact::{VideoArtifact, DEFAULT_VIDEO_FILE_NAME};
pub use backend::{
    GeneratedVideo, Operation, SubmitRequest, VeoHttpBackend, VideoBackend, GEMINI_API_BASE_URL,
};
pub use client::{
    translate_error, GenerationClient, GenerationError, GenerationRequest, JobState,
    DEFAULT_POLL_INTERVAL, ENTITY_NOT_FOUND, SOUND_PROMPT_CLAUSE,
};
pub use credentials::{CredentialProvider, InteractiveCredential, StaticCredential};
pub use image::{media_type_for_path, ImageReference};
pub use progress::{progress_channel, ProgressEvent, ProgressReceiver, ProgressSender};
pub use settings::{AspectRatio, GenerationSettings, Resolution, VideoModel};
