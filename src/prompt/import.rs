//! Prompt import - turns pasted text into the prompt that gets submitted.
//!
//! Text that decodes as a [`StructuredPrompt`] is decompiled back into English
//! narrative form. Anything else is passed through unchanged.

use serde_json::Value;

use super::narrative::{present, UNKNOWN_SPEAKER};
use super::structured::StructuredPrompt;

/// Keys that identify a structured prompt document.
const SHAPE_KEYS: &[&str] = &["meta", "environment", "characters"];

/// Outcome of importing prompt text.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedPrompt {
    /// The text was a structured prompt document.
    Structured(StructuredPrompt),
    /// Free text, trimmed.
    PlainText(String),
}

impl ImportedPrompt {
    /// The prompt text to submit.
    ///
    /// A structured document that decompiles to nothing falls back to its
    /// source text.
    pub fn into_prompt_text(self, source: &str) -> String {
        match self {
            ImportedPrompt::Structured(prompt) => {
                let text = decompile(&prompt);
                if text.is_empty() {
                    source.trim().to_string()
                } else {
                    text
                }
            }
            ImportedPrompt::PlainText(text) => text,
        }
    }
}

/// Classify imported text.
///
/// Two stages: the text must be valid JSON, and the JSON must be an object
/// shaped like a structured prompt. Failing either stage yields
/// [`ImportedPrompt::PlainText`]. Once the shape matches, mistyped fields
/// decode as empty rather than rejecting the document.
pub fn parse_import(input: &str) -> ImportedPrompt {
    let trimmed = input.trim();
    let plain = || ImportedPrompt::PlainText(trimmed.to_string());

    if !trimmed.starts_with('{') {
        return plain();
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Import is not JSON, using as plain text: {}", e);
            return plain();
        }
    };

    let has_shape = value
        .as_object()
        .is_some_and(|obj| SHAPE_KEYS.iter().any(|key| obj.contains_key(*key)));
    if !has_shape {
        return plain();
    }

    match serde_json::from_value::<StructuredPrompt>(value) {
        Ok(prompt) => ImportedPrompt::Structured(prompt),
        Err(e) => {
            log::debug!("JSON does not match the prompt schema: {}", e);
            plain()
        }
    }
}

/// Resolve imported text straight to the prompt that should be submitted.
pub fn resolve_prompt_text(input: &str) -> String {
    parse_import(input).into_prompt_text(input)
}

/// Rebuild English narrative text from a structured prompt.
///
/// Uses the same section and field order as the English narrative renderer,
/// so a document's structured form decompiles to the same text.
pub fn decompile(prompt: &StructuredPrompt) -> String {
    let mut sections = Vec::new();

    let env = &prompt.environment;
    let env_parts: Vec<&str> = [
        env.description.as_str(),
        env.lighting.as_str(),
        env.camera.as_str(),
        env.style.as_str(),
        env.additional.as_str(),
    ]
    .into_iter()
    .filter_map(present)
    .collect();
    if !env_parts.is_empty() {
        sections.push(format!("ENVIRONMENT: {}.", env_parts.join(", ")));
    }

    for (i, c) in prompt.characters.iter().enumerate() {
        let mut details = Vec::new();
        if let Some(race) = present(&c.race) {
            details.push(race.to_string());
        }
        if let Some(gender) = present(&c.gender) {
            details.push(gender.to_string());
        }
        if let Some(age) = present(&c.age) {
            details.push(format!("age {age}"));
        }
        if let Some(appearance) = present(&c.appearance.details) {
            details.push(appearance.to_string());
        }
        if let Some(clothing) = present(&c.appearance.clothing) {
            details.push(format!("wearing {clothing}"));
        }
        if let Some(hair) = present(&c.appearance.hair) {
            details.push(format!("{hair} hair"));
        }
        if let Some(voice) = present(&c.voice) {
            details.push(format!("{voice} voice"));
        }
        if let Some(action) = present(&c.action) {
            details.push(format!("ACTION: {action}"));
        }
        if !details.is_empty() {
            sections.push(format!("CHARACTER {}: {}.", i + 1, details.join(", ")));
        }
    }

    if !prompt.dialogue.is_empty() {
        let lines: Vec<String> = prompt
            .dialogue
            .iter()
            .map(|d| {
                let speaker = match d
                    .speaker_index
                    .map(|index| index as u64)
                    .or_else(|| d.speaker_id.filter(|id| *id != 0).map(u64::from))
                {
                    Some(n) => format!("Character {n}"),
                    None => UNKNOWN_SPEAKER.to_string(),
                };
                format!("{}: \"{}\"", speaker, d.line)
            })
            .collect();
        sections.push(format!("DIALOGUE:\n{}", lines.join("\n")));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through_trimmed() {
        assert_eq!(
            parse_import("  a cat surfing a wave \n"),
            ImportedPrompt::PlainText("a cat surfing a wave".into())
        );
    }

    #[test]
    fn test_malformed_json_is_plain_text() {
        let input = "{\"environment\": {";
        assert_eq!(parse_import(input), ImportedPrompt::PlainText(input.into()));
    }

    #[test]
    fn test_unrelated_json_is_plain_text() {
        let input = r#"{"scene": "beach", "mood": "calm"}"#;
        assert_eq!(parse_import(input), ImportedPrompt::PlainText(input.into()));
    }

    #[test]
    fn test_mistyped_section_falls_back_to_source() {
        let input = r#"{"characters": "not a list"}"#;
        assert_eq!(
            parse_import(input),
            ImportedPrompt::Structured(StructuredPrompt::default())
        );
        assert_eq!(resolve_prompt_text(input), input);
    }

    #[test]
    fn test_numeric_age_keeps_document_structured() {
        let input = r#"{"characters": [{"race": "European", "age": 30, "action": "walks"}]}"#;
        assert_eq!(
            resolve_prompt_text(input),
            "CHARACTER 1: European, age 30, ACTION: walks."
        );
    }

    #[test]
    fn test_json_array_is_plain_text() {
        let input = r#"[{"meta": {}}]"#;
        assert!(matches!(parse_import(input), ImportedPrompt::PlainText(_)));
    }

    #[test]
    fn test_partial_document_is_structured() {
        let input = r#"{"environment": {"description": "desert at dusk", "lighting": "Natural light"}}"#;
        let imported = parse_import(input);
        assert!(matches!(imported, ImportedPrompt::Structured(_)));
        assert_eq!(
            imported.into_prompt_text(input),
            "ENVIRONMENT: desert at dusk, Natural light."
        );
    }

    #[test]
    fn test_empty_structured_document_falls_back_to_source() {
        let input = r#"{"meta": {"generator": "x", "version": "1.0"}}"#;
        assert_eq!(resolve_prompt_text(input), input);
    }

    #[test]
    fn test_decompile_dialogue_labels() {
        let input = r#"{
            "characters": [{"gender": "Male"}],
            "dialogue": [
                {"speaker_id": 4, "speaker_index": 1, "speaker_gender": "Male", "line": "Go!"},
                {"speaker_id": null, "speaker_index": null, "speaker_gender": null, "line": "Who?"}
            ]
        }"#;
        assert_eq!(
            resolve_prompt_text(input),
            "CHARACTER 1: Male.\n\nDIALOGUE:\nCharacter 1: \"Go!\"\nUnknown: \"Who?\""
        );
    }

    #[test]
    fn test_decompile_falls_back_to_speaker_id() {
        let input = r#"{"characters": [{"gender": "Male"}], "dialogue": [{"speaker_id": 1, "line": "Go"}]}"#;
        assert_eq!(
            resolve_prompt_text(input),
            "CHARACTER 1: Male.\n\nDIALOGUE:\nCharacter 1: \"Go\""
        );
    }

    #[test]
    fn test_decompile_index_wins_over_speaker_id() {
        let input = r#"{"characters": [{}, {"gender": "Male"}], "dialogue": [
            {"speaker_id": 7, "speaker_index": 2, "line": "Mine"},
            {"speaker_id": "3", "line": "Id only"},
            {"speaker_id": 0, "line": "Zero"},
            {"speaker_id": "", "line": "Unset"}
        ]}"#;
        assert_eq!(
            resolve_prompt_text(input),
            "CHARACTER 2: Male.\n\nDIALOGUE:\nCharacter 2: \"Mine\"\nCharacter 3: \"Id only\"\nUnknown: \"Zero\"\nUnknown: \"Unset\""
        );
    }
}
