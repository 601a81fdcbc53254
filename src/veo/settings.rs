//! Generation settings: model catalog, aspect ratio, resolution, sound.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Video models offered by the studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VideoModel {
    #[default]
    #[serde(rename = "veo-3.1-generate-preview")]
    Veo31,
    #[serde(rename = "veo-3.1-fast-generate-preview")]
    Veo31Fast,
    #[serde(rename = "veo-3.0-generate-preview")]
    Veo30,
}

impl VideoModel {
    pub const ALL: [VideoModel; 3] = [VideoModel::Veo31, VideoModel::Veo31Fast, VideoModel::Veo30];

    /// Model id as used in API paths.
    pub fn id(self) -> &'static str {
        match self {
            VideoModel::Veo31 => "veo-3.1-generate-preview",
            VideoModel::Veo31Fast => "veo-3.1-fast-generate-preview",
            VideoModel::Veo30 => "veo-3.0-generate-preview",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VideoModel::Veo31 => "Veo 3.1 (High Quality) - Recommended",
            VideoModel::Veo31Fast => "Veo 3.1 Fast (General Speed)",
            VideoModel::Veo30 => "Veo 3.0 (Legacy)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.id() == id)
    }
}

impl fmt::Display for VideoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "720p")]
    Hd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Hd => "720p",
            Resolution::FullHd => "1080p",
        }
    }
}

/// User-selected settings for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationSettings {
    pub model: VideoModel,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    /// Ask for a sound track. The API has no parameter for this, so it is
    /// expressed as an extra sentence in the prompt.
    pub enable_sound: bool,
}
