//! VideoArtifact - a generated video materialized on local disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

/// Default file name offered when saving a generated video.
pub const DEFAULT_VIDEO_FILE_NAME: &str = "veo-generated-video.mp4";

/// A generated video stored as a temporary file.
///
/// The caller owns the artifact. The file is deleted when the artifact is
/// dropped or released, unless it was persisted first.
#[derive(Debug)]
pub struct VideoArtifact {
    path: TempPath,
    size: usize,
}

impl VideoArtifact {
    /// Write video bytes to a new temporary file inside `dir`.
    pub fn materialize(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let mut file = tempfile::Builder::new()
            .prefix("veo-")
            .suffix(".mp4")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            path: file.into_temp_path(),
            size: bytes.len(),
        })
    }

    /// Local path of the video while the artifact is alive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Keep the video at `dest`, taking it out of temporary ownership.
    ///
    /// Falls back to copy-and-delete when `dest` is on another filesystem.
    pub fn persist(self, dest: &Path) -> std::io::Result<PathBuf> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match self.path.persist(dest) {
            Ok(()) => Ok(dest.to_path_buf()),
            Err(err) => {
                log::debug!("Rename failed ({}), copying instead", err.error);
                std::fs::copy(&err.path, dest)?;
                err.path.close()?;
                Ok(dest.to_path_buf())
            }
        }
    }

    /// Delete the video now rather than on drop.
    pub fn release(self) -> std::io::Result<()> {
        self.path.close()
    }
}
