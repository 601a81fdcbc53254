//! PromptDocument - structured builder state.
//!
//! Characters, dialogue lines and the environment block that the compiler
//! turns into prompts. Documents can be loaded from TOML files so they can be
//! kept alongside a project and edited by hand.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::options::{CameraAngle, Ethnicity, Gender, Lighting, ShotStyle, Voice};

/// A character taking part in the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Stable identity, unique within the document.
    pub id: u32,
    pub ethnicity: Option<Ethnicity>,
    /// Free text used in place of the ethnicity when `Ethnicity::Other` is selected.
    pub ethnicity_custom: String,
    pub gender: Option<Gender>,
    pub age: String,
    pub clothing: String,
    pub hair: String,
    /// Additional physical description.
    pub description: String,
    pub voice: Option<Voice>,
    /// Action or movement performed in the shot.
    pub action: String,
}

impl Character {
    /// Create an empty character with the given id.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// A spoken line attributed to a character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueLine {
    pub id: u64,
    /// Id of the speaking character. May be unset, or dangle after the
    /// character was removed.
    pub speaker: Option<u32>,
    pub text: String,
}

/// Scene, lighting and camera descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub description: String,
    pub lighting: Option<Lighting>,
    pub camera_angle: Option<CameraAngle>,
    pub shot_style: Option<ShotStyle>,
    /// Film stock, ratio and other free-form extras.
    pub extras: String,
}

/// Everything the prompt compiler needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDocument {
    pub environment: Environment,
    /// Display order; a character's display index is its position + 1.
    pub characters: Vec<Character>,
    pub dialogue: Vec<DialogueLine>,
}

impl PromptDocument {
    /// A document with a single empty character, the builder's initial state.
    pub fn starter() -> Self {
        Self {
            characters: vec![Character::new(1)],
            ..Self::default()
        }
    }

    /// Append an empty character and return its id (max existing id + 1).
    pub fn add_character(&mut self) -> u32 {
        let id = self.characters.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.characters.push(Character::new(id));
        id
    }

    /// Remove a character together with every dialogue line it speaks.
    ///
    /// Returns `false` if no character has the given id.
    pub fn remove_character(&mut self, id: u32) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| c.id != id);
        if self.characters.len() == before {
            return false;
        }
        self.dialogue.retain(|line| line.speaker != Some(id));
        true
    }

    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Mutable access for updating a character's fields.
    pub fn character_mut(&mut self, id: u32) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// 1-based display index of a character, recomputed from its position.
    pub fn display_index(&self, id: u32) -> Option<usize> {
        self.characters
            .iter()
            .position(|c| c.id == id)
            .map(|pos| pos + 1)
    }

    /// Resolve a dialogue speaker to its display index and character.
    ///
    /// Unset and dangling references resolve to `None`.
    pub fn speaker(&self, line: &DialogueLine) -> Option<(usize, &Character)> {
        let id = line.speaker?;
        let pos = self.characters.iter().position(|c| c.id == id)?;
        Some((pos + 1, &self.characters[pos]))
    }

    /// Append a dialogue line and return its id.
    pub fn add_dialogue(&mut self, speaker: Option<u32>, text: impl Into<String>) -> u64 {
        let id = self.dialogue.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        self.dialogue.push(DialogueLine {
            id,
            speaker,
            text: text.into(),
        });
        id
    }

    pub fn dialogue_mut(&mut self, id: u64) -> Option<&mut DialogueLine> {
        self.dialogue.iter_mut().find(|d| d.id == id)
    }

    /// Remove a dialogue line. Returns `false` if it did not exist.
    pub fn remove_dialogue(&mut self, id: u64) -> bool {
        let before = self.dialogue.len();
        self.dialogue.retain(|d| d.id != id);
        self.dialogue.len() != before
    }

    /// Load a document from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|e| DocumentError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML for writing a document file.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Errors that can occur when loading a prompt document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read prompt document '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse prompt document '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_characters() -> PromptDocument {
        let mut doc = PromptDocument::starter();
        doc.add_character();
        doc.add_character();
        doc
    }

    #[test]
    fn test_starter_has_one_character() {
        let doc = PromptDocument::starter();
        assert_eq!(doc.characters.len(), 1);
        assert_eq!(doc.characters[0].id, 1);
        assert!(doc.dialogue.is_empty());
    }

    #[test]
    fn test_add_character_uses_max_plus_one() {
        let mut doc = three_characters();
        assert!(doc.remove_character(2));
        // ids are 1 and 3 now; next is 4 even though 2 is free
        assert_eq!(doc.add_character(), 4);
    }

    #[test]
    fn test_add_character_on_empty_document_starts_at_one() {
        let mut doc = PromptDocument::default();
        assert_eq!(doc.add_character(), 1);
    }

    #[test]
    fn test_remove_character_cascades_dialogue() {
        let mut doc = three_characters();
        doc.add_dialogue(Some(1), "first");
        doc.add_dialogue(Some(2), "second");
        doc.add_dialogue(Some(2), "again");
        doc.add_dialogue(None, "nobody");

        assert!(doc.remove_character(2));

        let texts: Vec<_> = doc.dialogue.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "nobody"]);
    }

    #[test]
    fn test_remove_character_renumbers_display_indices() {
        let mut doc = three_characters();
        doc.remove_character(1);

        assert_eq!(doc.display_index(1), None);
        assert_eq!(doc.display_index(2), Some(1));
        assert_eq!(doc.display_index(3), Some(2));
    }

    #[test]
    fn test_remove_unknown_character_is_noop() {
        let mut doc = three_characters();
        doc.add_dialogue(Some(1), "hi");
        assert!(!doc.remove_character(42));
        assert_eq!(doc.characters.len(), 3);
        assert_eq!(doc.dialogue.len(), 1);
    }

    #[test]
    fn test_speaker_resolution_handles_dangling_reference() {
        let mut doc = three_characters();
        let line = DialogueLine {
            id: 1,
            speaker: Some(99),
            text: "hello".into(),
        };
        assert!(doc.speaker(&line).is_none());

        let line = DialogueLine {
            speaker: Some(3),
            ..line
        };
        let (index, character) = doc.speaker(&line).unwrap();
        assert_eq!(index, 3);
        assert_eq!(character.id, 3);

        doc.remove_character(1);
        assert_eq!(doc.speaker(&line).unwrap().0, 2);
    }

    #[test]
    fn test_dialogue_ids_are_unique() {
        let mut doc = PromptDocument::starter();
        let a = doc.add_dialogue(Some(1), "a");
        let b = doc.add_dialogue(Some(1), "b");
        assert_ne!(a, b);
        assert!(doc.remove_dialogue(a));
        assert!(!doc.remove_dialogue(a));
        assert_eq!(doc.add_dialogue(None, "c"), b + 1);
    }

    #[test]
    fn test_character_mut_updates_fields() {
        let mut doc = PromptDocument::starter();
        if let Some(c) = doc.character_mut(1) {
            c.gender = Some(Gender::Male);
            c.age = "30".into();
        }
        let c = doc.character(1).unwrap();
        assert_eq!(c.gender, Some(Gender::Male));
        assert_eq!(c.age, "30");
    }

    #[test]
    fn test_from_toml_accepts_canonical_and_local_labels() {
        let doc = PromptDocument::from_toml(
            r#"
[environment]
description = "rainy neon street"
lighting = "Neon light"
camera_angle = "Close-up"

[[characters]]
id = 1
ethnicity = "Eropa"
gender = "Female"
action = "walks to camera"

[[dialogue]]
id = 1
speaker = 1
text = "Hello"
"#,
        )
        .unwrap();

        assert_eq!(doc.environment.lighting, Some(Lighting::Neon));
        assert_eq!(doc.environment.camera_angle, Some(CameraAngle::CloseUp));
        assert_eq!(doc.characters[0].ethnicity, Some(Ethnicity::European));
        assert_eq!(doc.characters[0].gender, Some(Gender::Female));
        assert_eq!(doc.dialogue[0].speaker, Some(1));
    }

    #[test]
    fn test_from_toml_rejects_unknown_option() {
        let result = PromptDocument::from_toml("[environment]\nlighting = \"Laser\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip_of_starter() {
        let doc = PromptDocument::starter();
        let text = doc.to_toml().unwrap();
        assert_eq!(PromptDocument::from_toml(&text).unwrap(), doc);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = PromptDocument::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
