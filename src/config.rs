//! Configuration file handling for veo-studio.
//!
//! Loads configuration from `<config dir>/veo-studio/config.toml` or a custom path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::veo::{
    AspectRatio, GenerationSettings, Resolution, VideoModel, DEFAULT_POLL_INTERVAL,
    GEMINI_API_BASE_URL,
};

/// Template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# veo-studio configuration

[api]
# Gemini API key. When unset, GEMINI_API_KEY (or API_KEY) from the
# environment or .env is used.
# key = "..."
base_url = "https://generativelanguage.googleapis.com/v1beta"

[generation]
# veo-3.1-generate-preview, veo-3.1-fast-generate-preview, veo-3.0-generate-preview
model = "veo-3.1-generate-preview"
# 16:9 or 9:16
aspect_ratio = "16:9"
# 720p or 1080p
resolution = "1080p"
# Ask for a sound track
sound = false
# Seconds between status checks
poll_interval_secs = 5

[output]
# Where generated videos are saved
# dir = "/path/to/videos"
"#;

/// Configuration file structure for veo-studio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub model: VideoModel,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub sound: bool,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: VideoModel::default(),
            aspect_ratio: AspectRatio::default(),
            resolution: Resolution::default(),
            sound: false,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Without a path, the default location is used and a missing file yields
    /// the defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Generation settings from the `[generation]` section.
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.generation.model,
            aspect_ratio: self.generation.aspect_ratio,
            resolution: self.generation.resolution,
            enable_sound: self.generation.sound,
        }
    }

    /// Poll interval, never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.generation.poll_interval_secs.max(1))
    }

    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE_URL)
    }

    /// The API key to use: the configured key, else `env_key`.
    pub fn resolve_api_key(&self, env_key: Option<String>) -> Option<String> {
        self.api
            .key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or(env_key)
            .filter(|k| !k.trim().is_empty())
    }

    /// Where the key [`resolve_api_key`](Self::resolve_api_key) would use comes from.
    pub fn api_key_source(&self, env_key: Option<&str>) -> &'static str {
        let set = |key: Option<&str>| key.is_some_and(|k| !k.trim().is_empty());
        if set(self.api.key.as_deref()) {
            "set in config"
        } else if set(env_key) {
            "from environment"
        } else {
            "not set"
        }
    }

    /// Directory generated videos are saved to.
    pub fn output_dir(&self) -> PathBuf {
        self.output.dir.clone().unwrap_or_else(|| {
            dirs::video_dir()
                .map(|d| d.join("veo-studio"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("veo-studio").join("config.toml"))
        .unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".config/veo-studio/config.toml")
        })
}

/// The first non-blank key among `candidates`, in order.
pub fn first_api_key<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .find_map(|key| key.filter(|k| !k.trim().is_empty()))
}
