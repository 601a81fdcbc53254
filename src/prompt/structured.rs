//! Structured (JSON) prompt representation.
//!
//! Mirrors the narrative content field for field without any phrase
//! templating. Every key is always present; empty values serialize as empty
//! strings or `null`.
//!
//! Decoding is tolerant: a leaf of the wrong type becomes empty instead of
//! rejecting the document. Scalars are accepted where strings are expected,
//! and speaker references may be numbers or numeric strings.

use serde::{Deserialize, Serialize};

use super::document::PromptDocument;
use super::narrative::ethnicity_text;
use super::options::{Locale, PromptOption};

/// Generator name written into `meta.generator`.
pub const GENERATOR_NAME: &str = "VEO3 Prompt Generator";

/// Schema version written into `meta.version`.
pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredPrompt {
    #[serde(deserialize_with = "lenient::value")]
    pub meta: Meta,
    #[serde(deserialize_with = "lenient::value")]
    pub environment: StructuredEnvironment,
    #[serde(deserialize_with = "lenient::list")]
    pub characters: Vec<StructuredCharacter>,
    #[serde(deserialize_with = "lenient::list")]
    pub dialogue: Vec<StructuredDialogue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "lenient::string")]
    pub generator: String,
    #[serde(deserialize_with = "lenient::string")]
    pub version: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            generator: GENERATOR_NAME.to_string(),
            version: SCHEMA_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredEnvironment {
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub lighting: String,
    #[serde(deserialize_with = "lenient::string")]
    pub camera: String,
    #[serde(deserialize_with = "lenient::string")]
    pub style: String,
    #[serde(deserialize_with = "lenient::string")]
    pub additional: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredCharacter {
    #[serde(deserialize_with = "lenient::string")]
    pub race: String,
    #[serde(deserialize_with = "lenient::string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient::string")]
    pub age: String,
    #[serde(deserialize_with = "lenient::value")]
    pub appearance: Appearance,
    #[serde(deserialize_with = "lenient::string")]
    pub voice: String,
    #[serde(deserialize_with = "lenient::string")]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    #[serde(deserialize_with = "lenient::string")]
    pub clothing: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hair: String,
    #[serde(deserialize_with = "lenient::string")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredDialogue {
    /// Identity of the speaking character; `null` when the reference is dangling.
    #[serde(deserialize_with = "lenient::index")]
    pub speaker_id: Option<u32>,
    /// Display index of the speaker; `null` when the reference is dangling.
    #[serde(deserialize_with = "lenient::index")]
    pub speaker_index: Option<usize>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub speaker_gender: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub line: String,
}

/// Field decoders that never fail on a well-formed JSON value.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }

    /// A non-negative integer given as a number or a numeric string. `""`,
    /// `null` and anything else decode to `None`.
    pub fn index<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let number = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Ok(number.and_then(|n| T::try_from(n).ok()))
    }

    /// A nested record; the wrong container type yields the default.
    pub fn value<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// A list of records. Entries that are not records become defaults so
    /// the remaining entries keep their positions.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }
}

fn option_text<T: PromptOption>(value: Option<T>) -> String {
    value.map(|v| v.canonical().to_string()).unwrap_or_default()
}

/// Build the structured representation of a document.
pub fn render_structured(doc: &PromptDocument) -> StructuredPrompt {
    let env = &doc.environment;
    let environment = StructuredEnvironment {
        description: env.description.clone(),
        lighting: option_text(env.lighting),
        camera: option_text(env.camera_angle),
        style: option_text(env.shot_style),
        additional: env.extras.clone(),
    };

    let characters = doc
        .characters
        .iter()
        .map(|c| StructuredCharacter {
            race: ethnicity_text(c, Locale::English)
                .unwrap_or_default()
                .to_string(),
            gender: option_text(c.gender),
            age: c.age.clone(),
            appearance: Appearance {
                clothing: c.clothing.clone(),
                hair: c.hair.clone(),
                details: c.description.clone(),
            },
            voice: option_text(c.voice),
            action: c.action.clone(),
        })
        .collect();

    let dialogue = doc
        .dialogue
        .iter()
        .map(|line| {
            let speaker = doc.speaker(line);
            StructuredDialogue {
                speaker_id: speaker.and(line.speaker),
                speaker_index: speaker.map(|(index, _)| index),
                speaker_gender: speaker.map(|(_, c)| option_text(c.gender)),
                line: line.text.clone(),
            }
        })
        .collect();

    StructuredPrompt {
        meta: Meta::default(),
        environment,
        characters,
        dialogue,
    }
}

/// Render the structured representation as pretty-printed JSON.
pub fn render_json(doc: &PromptDocument) -> String {
    // Plain data with string keys; serialization cannot fail.
    serde_json::to_string_pretty(&render_structured(doc)).unwrap_or_default()
}
