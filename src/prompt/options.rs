//! Enumerated builder options and their dual-locale labels.
//!
//! Each option kind is a plain enum backed by a static table of
//! `{value, canonical, local}` entries. Lookups always go through the enum
//! value; labels are only parsed when reading documents from disk.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Output language of a narrative prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Bahasa Indonesia labels and phrase templates.
    Indonesian,
    /// Canonical English values.
    #[default]
    English,
}

/// One row of an option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry<T: 'static> {
    pub value: T,
    /// Canonical (English) value, used in English prompts and JSON output.
    pub canonical: &'static str,
    /// Indonesian label.
    pub local: &'static str,
}

/// Common behaviour of all enumerated builder options.
pub trait PromptOption: Copy + PartialEq + Sized + 'static {
    /// Every variant, in display order.
    fn table() -> &'static [OptionEntry<Self>];

    /// Find the table entry for this value.
    fn entry(self) -> Option<&'static OptionEntry<Self>> {
        Self::table().iter().find(|entry| entry.value == self)
    }

    /// Canonical (English) value.
    fn canonical(self) -> &'static str {
        self.entry().map(|entry| entry.canonical).unwrap_or_default()
    }

    /// Label for the given locale.
    fn label(self, locale: Locale) -> &'static str {
        match (self.entry(), locale) {
            (Some(entry), Locale::Indonesian) => entry.local,
            (Some(entry), Locale::English) => entry.canonical,
            (None, _) => "",
        }
    }

    /// Parse a canonical value or a local label (case-insensitive).
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::table()
            .iter()
            .find(|entry| {
                entry.canonical.eq_ignore_ascii_case(label) || entry.local.eq_ignore_ascii_case(label)
            })
            .map(|entry| entry.value)
    }
}

macro_rules! option_table {
    (
        $(#[$meta:meta])*
        $name:ident, $table:ident {
            $($variant:ident => ($canonical:literal, $local:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        pub static $table: &[OptionEntry<$name>] = &[
            $(OptionEntry { value: $name::$variant, canonical: $canonical, local: $local }),+
        ];

        impl PromptOption for $name {
            fn table() -> &'static [OptionEntry<Self>] {
                $table
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.canonical())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                Self::from_label(&label).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} '{}'",
                        stringify!($name).to_lowercase(),
                        label
                    ))
                })
            }
        }
    };
}

option_table! {
    /// Ethnicity of a character. `Other` defers to the character's custom text.
    Ethnicity, ETHNICITY_OPTIONS {
        Indonesian => ("Indonesian", "Indonesia"),
        EastAsian => ("East Asian", "Asia Timur"),
        SoutheastAsian => ("Southeast Asian", "Asia Tenggara"),
        SouthAsian => ("South Asian", "Asia Selatan"),
        MiddleEastern => ("Middle Eastern", "Timur Tengah"),
        African => ("African", "Afrika"),
        European => ("European", "Eropa"),
        LatinoHispanic => ("Latino/Hispanic", "Amerika Latin"),
        NativeAmerican => ("Native American", "Suku Asli Amerika"),
        PacificIslander => ("Pacific Islander", "Pasifik"),
        MixedRace => ("Mixed Race", "Campuran"),
        Other => ("Other", "Lainnya"),
    }
}

option_table! {
    Gender, GENDER_OPTIONS {
        Male => ("Male", "Laki-laki"),
        Female => ("Female", "Perempuan"),
        NonBinary => ("Non-binary", "Non-biner"),
        Genderfluid => ("Genderfluid", "Genderfluid"),
    }
}

option_table! {
    /// Speaking style of a character.
    Voice, VOICE_OPTIONS {
        Normal => ("Normal", "Normal"),
        Whispering => ("Whispering", "Berbisik"),
        Shouting => ("Shouting", "Berteriak"),
        Soft => ("Soft", "Lirih"),
        Raspy => ("Raspy", "Serak"),
        Deep => ("Deep", "Rendah"),
        HighPitched => ("High-pitched", "Tinggi"),
        Sarcastic => ("Sarcastic", "Sarkastik"),
        Excited => ("Excited", "Penuh Semangat"),
        Monotone => ("Monotone", "Monoton"),
    }
}

option_table! {
    Lighting, LIGHTING_OPTIONS {
        Rembrandt => ("Rembrandt lighting", "Rembrandt lighting"),
        Butterfly => ("Butterfly lighting", "Butterfly lighting"),
        Split => ("Split lighting", "Split lighting"),
        Loop => ("Loop lighting", "Loop lighting"),
        Ambient => ("Ambient lighting", "Ambient lighting"),
        Rim => ("Rim lighting", "Rim lighting"),
        Softbox => ("Softbox lighting", "Softbox lighting"),
        ThreePoint => ("Three-point lighting", "Three-point lighting"),
        HighKey => ("High-key lighting", "High-key lighting"),
        LowKey => ("Low-key lighting", "Low-key lighting"),
        Cinematic => ("Cinematic lighting", "Cinematic lighting"),
        Natural => ("Natural light", "Natural light"),
        Fluorescent => ("Fluorescent light", "Fluorescent light"),
        Neon => ("Neon light", "Neon light"),
        Candlelight => ("Candlelight", "Candlelight"),
    }
}

option_table! {
    CameraAngle, CAMERA_ANGLE_OPTIONS {
        WideShot => ("Wide Shot", "Wide Shot"),
        FullShot => ("Full Shot", "Full Shot"),
        MediumShot => ("Medium Shot", "Medium Shot"),
        CloseUp => ("Close-up", "Close-up"),
        ExtremeCloseUp => ("Extreme Close-up", "Extreme Close-up"),
        OverTheShoulder => ("Over-the-shoulder shot", "Over-the-shoulder shot"),
        PointOfView => ("Point of view (POV) shot", "Point of view (POV) shot"),
        HighAngle => ("High angle shot", "High angle shot"),
        LowAngle => ("Low angle shot", "Low angle shot"),
        DutchAngle => ("Dutch angle shot", "Dutch angle shot"),
        BirdsEye => ("Bird's-eye view shot", "Bird's-eye view shot"),
        WormsEye => ("Worm's-eye view shot", "Worm's-eye view shot"),
    }
}

option_table! {
    ShotStyle, SHOT_STYLE_OPTIONS {
        SingleCamera => ("Single-camera setup", "Single-camera setup"),
        MultiCamera => ("Multi-camera setup", "Multi-camera setup"),
        Handheld => ("Handheld camera", "Handheld camera"),
        Steadicam => ("Steadicam shot", "Steadicam shot"),
        Dolly => ("Dolly shot", "Dolly shot"),
        Crane => ("Crane shot", "Crane shot"),
        Zoom => ("Zoom shot", "Zoom shot"),
        Pan => ("Pan shot", "Pan shot"),
        Tilt => ("Tilt shot", "Tilt shot"),
        Tracking => ("Tracking shot", "Tracking shot"),
        Arc => ("Arc shot", "Arc shot"),
        WhipPan => ("Whip pan shot", "Whip pan shot"),
        SlowMotion => ("Slow motion", "Slow motion"),
        TimeLapse => ("Time-lapse", "Time-lapse"),
        BulletTime => ("Bullet time", "Bullet time"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_by_locale() {
        assert_eq!(Ethnicity::EastAsian.label(Locale::English), "East Asian");
        assert_eq!(Ethnicity::EastAsian.label(Locale::Indonesian), "Asia Timur");
        assert_eq!(Gender::Female.label(Locale::Indonesian), "Perempuan");
        assert_eq!(Voice::HighPitched.label(Locale::English), "High-pitched");
        assert_eq!(Lighting::Rim.label(Locale::Indonesian), "Rim lighting");
    }

    #[test]
    fn test_from_label_accepts_canonical_and_local() {
        assert_eq!(Ethnicity::from_label("European"), Some(Ethnicity::European));
        assert_eq!(Ethnicity::from_label("Eropa"), Some(Ethnicity::European));
        assert_eq!(Gender::from_label("laki-laki"), Some(Gender::Male));
        assert_eq!(Voice::from_label(" Berbisik "), Some(Voice::Whispering));
        assert_eq!(Gender::from_label("Robot"), None);
    }

    #[test]
    fn test_tables_have_unique_canonical_values() {
        fn check<T: PromptOption>() {
            let table = T::table();
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a.canonical, b.canonical);
                    assert!(a.value != b.value);
                }
            }
        }
        check::<Ethnicity>();
        check::<Gender>();
        check::<Voice>();
        check::<Lighting>();
        check::<CameraAngle>();
        check::<ShotStyle>();
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(ETHNICITY_OPTIONS.len(), 12);
        assert_eq!(GENDER_OPTIONS.len(), 4);
        assert_eq!(VOICE_OPTIONS.len(), 10);
        assert_eq!(LIGHTING_OPTIONS.len(), 15);
        assert_eq!(CAMERA_ANGLE_OPTIONS.len(), 12);
        assert_eq!(SHOT_STYLE_OPTIONS.len(), 15);
    }

    #[test]
    fn test_serde_uses_canonical_value() {
        let json = serde_json::to_string(&Ethnicity::LatinoHispanic).unwrap();
        assert_eq!(json, "\"Latino/Hispanic\"");

        let parsed: Gender = serde_json::from_str("\"Perempuan\"").unwrap();
        assert_eq!(parsed, Gender::Female);

        let err = serde_json::from_str::<Gender>("\"Robot\"").unwrap_err();
        assert!(err.to_string().contains("unknown gender 'Robot'"));
    }
}
