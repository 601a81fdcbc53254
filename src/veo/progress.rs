//! Progress events emitted while a generation job runs.

use std::fmt;

use tokio::sync::mpsc;

use super::settings::VideoModel;

/// Channel end the client writes progress events to.
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

/// Channel end the caller reads progress events from.
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Create a progress channel.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// A step in the generation lifecycle.
///
/// `Display` gives the human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// About to submit the request.
    Submitting { model: VideoModel },
    /// The backend accepted the job.
    Submitted,
    /// Another status check after waiting one poll interval.
    StillProcessing { attempt: u32 },
    /// The job finished; fetching the video.
    Downloading,
    /// The video is available locally.
    Complete,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Submitting { model } => {
                write!(f, "Initializing request with {}...", model)
            }
            ProgressEvent::Submitted => f.write_str("Video is generating. This may take a minute..."),
            ProgressEvent::StillProcessing { .. } => {
                f.write_str("Still processing... ensuring high quality output...")
            }
            ProgressEvent::Downloading => f.write_str("Generation complete. Downloading video..."),
            ProgressEvent::Complete => f.write_str("Done!"),
        }
    }
}

/// Send an event, ignoring a receiver that stopped listening.
pub(crate) fn emit(progress: &ProgressSender, event: ProgressEvent) {
    log::info!("{}", event);
    let _ = progress.send(event);
}
