use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use std::fmt;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Debug)]
pub enum LanguageError {
    NotFound(String),
    Invalid(String),
    Empty(String),
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::NotFound(file) => write!(f, "language file not found: {}", file),
            LanguageError::Invalid(msg) => write!(f, "unable to read language file: {}", msg),
            LanguageError::Empty(name) => write!(f, "language {} has no words", name),
        }
    }
}

impl std::error::Error for LanguageError {}

/// Immutable, non-empty list of candidate words
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(file_name: &str) -> Result<Self, LanguageError> {
        read_language_from_file(&format!("{file_name}.json"))
    }

    /// Build a word source from an explicit list; fails on an empty list
    pub fn from_words(name: &str, words: Vec<String>) -> Result<Self, LanguageError> {
        let lang = Language {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        };
        lang.validated()
    }

    /// Uniformly random word, with replacement
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    fn validated(self) -> Result<Self, LanguageError> {
        if self.words.is_empty() {
            return Err(LanguageError::Empty(self.name));
        }
        // words are joined with single spaces, so none may carry whitespace
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(LanguageError::Invalid(format!(
                "{}: word {:?} is blank or contains whitespace",
                self.name, bad
            )));
        }
        Ok(self)
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language, LanguageError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| LanguageError::NotFound(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| LanguageError::Invalid(format!("{file_name} is not utf-8")))?;

    let lang: Language =
        serde_json::from_str(file_as_str).map_err(|e| LanguageError::Invalid(e.to_string()))?;

    lang.validated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_language_new_russian() {
        let lang = Language::new("russian").unwrap();

        assert_eq!(lang.name, "russian");
        assert!(!lang.words.is_empty());
        assert_eq!(lang.size as usize, lang.words.len());
    }

    #[test]
    fn test_language_new_english() {
        let lang = Language::new("english").unwrap();

        assert_eq!(lang.name, "english");
        assert!(lang.size > 0);
    }

    #[test]
    fn test_russian_contains_yo_words() {
        let lang = Language::new("russian").unwrap();
        assert!(lang.words.iter().any(|w| w.contains('ё')));
    }

    #[test]
    fn test_language_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let lang: Language = serde_json::from_str(json_data).unwrap();

        assert_eq!(lang.name, "test");
        assert_eq!(lang.size, 3);
        assert!(lang.words.contains(&"world".to_string()));
    }

    #[test]
    fn test_nonexistent_language_file() {
        let result = Language::new("klingon");
        assert!(matches!(result, Err(LanguageError::NotFound(_))));
    }

    #[test]
    fn test_empty_word_list_rejected() {
        let result = Language::from_words("empty", vec![]);
        assert!(matches!(result, Err(LanguageError::Empty(_))));

        let result = Language::from_words("t", vec!["a".into(), "".into()]);
        assert!(matches!(result, Err(LanguageError::Invalid(_))));

        let result = Language::from_words("t", vec!["a".into(), "  ".into()]);
        assert!(matches!(result, Err(LanguageError::Invalid(_))));

        let result = Language::from_words("t", vec!["a b".into()]);
        assert!(matches!(result, Err(LanguageError::Invalid(_))));
    }

    #[test]
    fn test_random_word_comes_from_list() {
        let lang = Language::from_words("abc", vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let w = lang.random_word(&mut rng);
            assert!(["a", "b", "c"].contains(&w));
        }
    }
}
