//! CLI enum types for model, aspect ratio, resolution and output format options.

use clap::ValueEnum;

use crate::prompt::Locale;
use crate::veo::{AspectRatio, Resolution, VideoModel};

/// Video model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Model {
    /// Veo 3.1 (High Quality) - Recommended
    #[value(name = "veo-3.1")]
    Veo31,
    /// Veo 3.1 Fast (General Speed)
    #[value(name = "veo-3.1-fast")]
    Veo31Fast,
    /// Veo 3.0 (Legacy)
    #[value(name = "veo-3.0")]
    Veo30,
}

impl From<Model> for VideoModel {
    fn from(m: Model) -> Self {
        match m {
            Model::Veo31 => VideoModel::Veo31,
            Model::Veo31Fast => VideoModel::Veo31Fast,
            Model::Veo30 => VideoModel::Veo30,
        }
    }
}

/// Frame aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Aspect {
    #[value(name = "16:9", alias = "landscape")]
    Landscape,
    #[value(name = "9:16", alias = "portrait")]
    Portrait,
}

impl From<Aspect> for AspectRatio {
    fn from(a: Aspect) -> Self {
        match a {
            Aspect::Landscape => AspectRatio::Landscape,
            Aspect::Portrait => AspectRatio::Portrait,
        }
    }
}

/// Output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    #[value(name = "720p")]
    Hd,
    #[value(name = "1080p")]
    FullHd,
}

impl From<Quality> for Resolution {
    fn from(q: Quality) -> Self {
        match q {
            Quality::Hd => Resolution::Hd,
            Quality::FullHd => Resolution::FullHd,
        }
    }
}

/// Rendering of a prompt document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indonesian narrative
    #[value(alias = "id")]
    Indonesian,
    /// English narrative
    #[value(alias = "en")]
    English,
    /// Structured JSON document
    Json,
}

impl OutputFormat {
    /// Narrative locale, `None` for JSON.
    pub fn locale(self) -> Option<Locale> {
        match self {
            OutputFormat::Indonesian => Some(Locale::Indonesian),
            OutputFormat::English => Some(Locale::English),
            OutputFormat::Json => None,
        }
    }
}
