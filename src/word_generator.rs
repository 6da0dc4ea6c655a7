use crate::language::Language;
use itertools::Itertools;
use rand::Rng;

pub const DEFAULT_WORD_COUNT: usize = 100;

/// Produces the target text for an attempt
#[derive(Debug, Clone)]
pub struct TextGenerator {
    language: Language,
    word_count: usize,
}

impl TextGenerator {
    pub fn new(language: Language, word_count: usize) -> Self {
        Self {
            language,
            word_count,
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Generate a fresh target text using the thread rng
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng(), self.word_count)
    }

    /// Pick `word_count` words independently (with replacement) and join them with single spaces
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, word_count: usize) -> String {
        (0..word_count)
            .map(|_| self.language.random_word(rng))
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn create_test_generator(word_count: usize) -> TextGenerator {
        let lang = Language::from_words(
            "test",
            vec!["alpha".into(), "beta".into(), "gamma".into()],
        )
        .unwrap();
        TextGenerator::new(lang, word_count)
    }

    #[test]
    fn test_generate_default_word_count() {
        let lang = Language::new("russian").unwrap();
        let generator = TextGenerator::new(lang, DEFAULT_WORD_COUNT);
        let text = generator.generate();

        assert_eq!(text.split(' ').count(), DEFAULT_WORD_COUNT);
    }

    #[test]
    fn test_generate_words_come_from_source() {
        let generator = create_test_generator(20);
        let text = generator.generate();

        for word in text.split(' ') {
            assert!(["alpha", "beta", "gamma"].contains(&word));
        }
    }

    #[test]
    fn test_generate_single_spaces() {
        let generator = create_test_generator(10);
        let text = generator.generate();

        assert!(!text.contains("  "));
        assert!(!text.starts_with(' '));
        assert!(!text.ends_with(' '));
    }

    #[test]
    fn test_generate_with_seed_is_deterministic() {
        let generator = create_test_generator(15);
        let a = generator.generate_with(&mut StdRng::seed_from_u64(42), 15);
        let b = generator.generate_with(&mut StdRng::seed_from_u64(42), 15);

        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_zero_words() {
        let generator = create_test_generator(0);
        assert_eq!(generator.generate(), "");
    }
}
