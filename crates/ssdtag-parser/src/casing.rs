//! Title-casing with record-sheet exceptions

use once_cell::sync::Lazy;
use regex::Regex;

/// Hull codes such as `F-AL` or `D7C` stay uppercase
static CODE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_]{1,3}-[A-Za-z0-9_]{1,3}|[A-Za-z0-9_]+[0-9]+[A-Za-z0-9_]+").unwrap()
});

/// Title-cases text word by word, leaving codes and listed acronyms uppercase
#[derive(Debug, Clone)]
pub struct TitleCaser {
    uppercase_words: Vec<String>,
}

impl TitleCaser {
    /// Create a caser that keeps the given words fully uppercase
    pub fn new<I, S>(uppercase_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            uppercase_words: uppercase_words
                .into_iter()
                .map(|w| w.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Title-case `text`, splitting on single spaces only
    pub fn title_case(&self, text: &str) -> String {
        text.to_lowercase()
            .split(' ')
            .map(|word| self.word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn word(&self, word: &str) -> String {
        if CODE_WORD.is_match(word) {
            return word.to_uppercase();
        }
        let upper = word.to_uppercase();
        if self.uppercase_words.contains(&upper) {
            return upper;
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for TitleCaser {
    fn default() -> Self {
        Self::new(["ISC", "PF"])
    }
}
