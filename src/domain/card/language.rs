//! Languages a card can be written in or translated to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    Hi,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 12] = [
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Pt,
        LanguageCode::Ru,
        LanguageCode::Ja,
        LanguageCode::Ko,
        LanguageCode::Zh,
        LanguageCode::Ar,
        LanguageCode::Hi,
    ];

    /// Two-letter ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::De => "de",
            LanguageCode::It => "it",
            LanguageCode::Pt => "pt",
            LanguageCode::Ru => "ru",
            LanguageCode::Ja => "ja",
            LanguageCode::Ko => "ko",
            LanguageCode::Zh => "zh",
            LanguageCode::Ar => "ar",
            LanguageCode::Hi => "hi",
        }
    }

    /// Name in English, as used in translation prompts.
    pub fn english_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Es => "Spanish",
            LanguageCode::Fr => "French",
            LanguageCode::De => "German",
            LanguageCode::It => "Italian",
            LanguageCode::Pt => "Portuguese",
            LanguageCode::Ru => "Russian",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Ko => "Korean",
            LanguageCode::Zh => "Chinese",
            LanguageCode::Ar => "Arabic",
            LanguageCode::Hi => "Hindi",
        }
    }

    /// Name in the language itself, for pickers.
    pub fn native_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Es => "Español",
            LanguageCode::Fr => "Français",
            LanguageCode::De => "Deutsch",
            LanguageCode::It => "Italiano",
            LanguageCode::Pt => "Português",
            LanguageCode::Ru => "Русский",
            LanguageCode::Ja => "日本語",
            LanguageCode::Ko => "한국어",
            LanguageCode::Zh => "中文",
            LanguageCode::Ar => "العربية",
            LanguageCode::Hi => "हिन्दी",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = ValidationError;

    /// Accepts the two-letter code in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LanguageCode::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "language",
                    format!("unsupported language code '{}'", s),
                )
            })
    }
}
