pub mod core;

pub use core::{Language, LanguageError};

use serde::{Deserialize, Serialize};

/// Word lists bundled with the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Russian,
    English,
}

impl SupportedLanguage {
    pub fn as_lang(&self) -> Result<Language, LanguageError> {
        Language::new(&self.to_string().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_language_as_lang() {
        assert_eq!(SupportedLanguage::Russian.as_lang().unwrap().name, "russian");
        assert_eq!(SupportedLanguage::English.as_lang().unwrap().name, "english");
    }

    #[test]
    fn test_supported_language_display() {
        assert_eq!(SupportedLanguage::Russian.to_string(), "Russian");
        assert_eq!(SupportedLanguage::English.to_string(), "English");
    }

    #[test]
    fn test_supported_language_serde() {
        let json = serde_json::to_string(&SupportedLanguage::English).unwrap();
        assert_eq!(json, "\"english\"");
    }
}
