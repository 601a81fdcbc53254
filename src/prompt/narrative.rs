//! Narrative prompt rendering in Indonesian and English.

use super::document::{Character, DialogueLine, Environment, PromptDocument};
use super::options::{Ethnicity, Locale, PromptOption};

/// Speaker label used when a dialogue line has no resolvable character.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Section headings and phrase templates for one locale.
struct Phrases {
    environment: &'static str,
    character: &'static str,
    dialogue: &'static str,
    lighting: fn(&str) -> String,
    camera_angle: fn(&str) -> String,
    shot_style: fn(&str) -> String,
    age: fn(&str) -> String,
    clothing: fn(&str) -> String,
    hair: fn(&str) -> String,
    voice: fn(&str) -> String,
    action: fn(&str) -> String,
}

const INDONESIAN: Phrases = Phrases {
    environment: "LINGKUNGAN",
    character: "KARAKTER",
    dialogue: "DIALOG",
    lighting: |v: &str| format!("Pencahayaan {v}"),
    camera_angle: |v: &str| format!("Sudut kamera {v}"),
    shot_style: |v: &str| format!("Gaya {v}"),
    age: |v: &str| format!("usia {v}"),
    clothing: |v: &str| format!("memakai {v}"),
    hair: |v: &str| format!("rambut {v}"),
    voice: |v: &str| format!("suara {v}"),
    action: |v: &str| format!("AKSI: {v}"),
};

const ENGLISH: Phrases = Phrases {
    environment: "ENVIRONMENT",
    character: "CHARACTER",
    dialogue: "DIALOGUE",
    lighting: |v: &str| v.to_string(),
    camera_angle: |v: &str| v.to_string(),
    shot_style: |v: &str| v.to_string(),
    age: |v: &str| format!("age {v}"),
    clothing: |v: &str| format!("wearing {v}"),
    hair: |v: &str| format!("{v} hair"),
    voice: |v: &str| format!("{v} voice"),
    action: |v: &str| format!("ACTION: {v}"),
};

fn phrases(locale: Locale) -> &'static Phrases {
    match locale {
        Locale::Indonesian => &INDONESIAN,
        Locale::English => &ENGLISH,
    }
}

/// Trimmed text, or `None` when only whitespace is left.
pub(crate) fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Ethnicity text after applying the `Other` override.
///
/// `Other` is replaced by the custom text, or dropped when that is empty.
pub(crate) fn ethnicity_text(character: &Character, locale: Locale) -> Option<&str> {
    match character.ethnicity? {
        Ethnicity::Other => present(&character.ethnicity_custom),
        ethnicity => Some(ethnicity.label(locale)),
    }
}

/// Render a document as narrative prompt text.
///
/// Sections (environment, one block per character, dialogue) are joined by a
/// blank line and empty sections are left out. An empty document renders to
/// an empty string.
pub fn render_narrative(doc: &PromptDocument, locale: Locale) -> String {
    let phrases = phrases(locale);
    let mut sections = Vec::new();

    if let Some(environment) = environment_section(&doc.environment, locale, phrases) {
        sections.push(environment);
    }

    for (index, character) in doc.characters.iter().enumerate() {
        if let Some(block) = character_section(index + 1, character, locale, phrases) {
            sections.push(block);
        }
    }

    if !doc.dialogue.is_empty() {
        let lines: Vec<String> = doc
            .dialogue
            .iter()
            .map(|line| dialogue_line(doc, line, locale))
            .collect();
        sections.push(format!("{}:\n{}", phrases.dialogue, lines.join("\n")));
    }

    sections.join("\n\n")
}

fn environment_section(env: &Environment, locale: Locale, phrases: &Phrases) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(description) = present(&env.description) {
        parts.push(description.to_string());
    }
    if let Some(lighting) = env.lighting {
        parts.push((phrases.lighting)(lighting.label(locale)));
    }
    if let Some(angle) = env.camera_angle {
        parts.push((phrases.camera_angle)(angle.label(locale)));
    }
    if let Some(style) = env.shot_style {
        parts.push((phrases.shot_style)(style.label(locale)));
    }
    if let Some(extras) = present(&env.extras) {
        parts.push(extras.to_string());
    }

    if parts.is_empty() {
        return None;
    }
    Some(format!("{}: {}.", phrases.environment, parts.join(", ")))
}

fn character_section(
    index: usize,
    character: &Character,
    locale: Locale,
    phrases: &Phrases,
) -> Option<String> {
    let mut details = Vec::new();
    if let Some(ethnicity) = ethnicity_text(character, locale) {
        details.push(ethnicity.to_string());
    }
    if let Some(gender) = character.gender {
        details.push(gender.label(locale).to_string());
    }
    if let Some(age) = present(&character.age) {
        details.push((phrases.age)(age));
    }
    if let Some(description) = present(&character.description) {
        details.push(description.to_string());
    }
    if let Some(clothing) = present(&character.clothing) {
        details.push((phrases.clothing)(clothing));
    }
    if let Some(hair) = present(&character.hair) {
        details.push((phrases.hair)(hair));
    }
    if let Some(voice) = character.voice {
        details.push((phrases.voice)(voice.label(locale)));
    }
    if let Some(action) = present(&character.action) {
        details.push((phrases.action)(action));
    }

    if details.is_empty() {
        return None;
    }
    Some(format!("{} {}: {}.", phrases.character, index, details.join(", ")))
}

fn dialogue_line(doc: &PromptDocument, line: &DialogueLine, locale: Locale) -> String {
    let label = match (doc.speaker(line), locale) {
        (Some((index, character)), Locale::Indonesian) => {
            let gender = character
                .gender
                .map(|g| g.label(locale))
                .unwrap_or(UNKNOWN_SPEAKER);
            format!("Karakter {index} ({gender})")
        }
        (Some((index, _)), Locale::English) => format!("Character {index}"),
        (None, _) => UNKNOWN_SPEAKER.to_string(),
    };
    format!("{}: \"{}\"", label, line.text)
}
