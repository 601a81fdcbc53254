//! Structured prompt builder.
//!
//! Compiles a [`PromptDocument`] (characters, dialogue, environment) into an
//! Indonesian narrative, an English narrative, or a JSON document, and turns
//! pasted JSON back into narrative text. Everything here is pure: no I/O
//! beyond loading document files, and rendering never fails.

mod document;
mod import;
mod narrative;
mod options;
mod structured;

pub use document::{Character, DialogueLine, DocumentError, Environment, PromptDocument};
pub use import::{decompile, parse_import, resolve_prompt_text, ImportedPrompt};
pub use narrative::{render_narrative, UNKNOWN_SPEAKER};
pub use options::{
    CameraAngle, Ethnicity, Gender, Lighting, Locale, OptionEntry, PromptOption, ShotStyle, Voice,
    CAMERA_ANGLE_OPTIONS, ETHNICITY_OPTIONS, GENDER_OPTIONS, LIGHTING_OPTIONS,
    SHOT_STYLE_OPTIONS, VOICE_OPTIONS,
};
pub use structured::{
    render_json, render_structured, Appearance, Meta, StructuredCharacter, StructuredDialogue,
    StructuredEnvironment, StructuredPrompt, GENERATOR_NAME, SCHEMA_VERSION,
};
