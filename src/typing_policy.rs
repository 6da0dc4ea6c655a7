use serde::{Deserialize, Serialize};

/// Pairs of letters that count as the same key when typing, e.g. `ё` and `е`.
/// Pairs match in both directions; case is never folded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookalikePolicy {
    pairs: Vec<(char, char)>,
}

impl Default for LookalikePolicy {
    fn default() -> Self {
        Self {
            pairs: vec![('ё', 'е'), ('Ё', 'Е')],
        }
    }
}

impl LookalikePolicy {
    pub fn new(pairs: Vec<(char, char)>) -> Self {
        Self { pairs }
    }

    /// Exact comparison only
    pub fn strict() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn pairs(&self) -> &[(char, char)] {
        &self.pairs
    }

    pub fn chars_match(&self, expected: char, typed: char) -> bool {
        expected == typed
            || self
                .pairs
                .iter()
                .any(|&(a, b)| (expected == a && typed == b) || (expected == b && typed == a))
    }
}
