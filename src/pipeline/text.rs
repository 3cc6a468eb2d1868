//! Word splitting shared by the keyword matchers.

/// Lowercased word tokens of a text.
///
/// Tokens are maximal runs of alphanumeric characters, so punctuation,
/// hyphens and whitespace all separate words.
#[derive(Debug, Clone)]
pub(crate) struct Words {
    tokens: Vec<String>,
}

impl Words {
    pub(crate) fn new(text: &str) -> Self {
        let tokens = text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Whether any word starts with `stem`.
    pub(crate) fn has_prefix(&self, stem: &str) -> bool {
        self.iter().any(|word| word.starts_with(stem))
    }

    /// Whether `word` occurs as a whole word.
    pub(crate) fn has_word(&self, word: &str) -> bool {
        self.iter().any(|w| w == word)
    }

    /// Whether `word` occurs at least once without one of `followers` right after it.
    pub(crate) fn has_word_except_before(&self, word: &str, followers: &[&str]) -> bool {
        self.tokens.iter().enumerate().any(|(i, w)| {
            w == word
                && !self
                    .tokens
                    .get(i + 1)
                    .is_some_and(|next| followers.contains(&next.as_str()))
        })
    }
}

/// Whether any word starts with any of `stems`.
pub(crate) fn mentions_any(words: &Words, stems: &[&str]) -> bool {
    stems.iter().any(|stem| words.has_prefix(stem))
}

/// Whether any of `forms` occurs as a whole word.
pub(crate) fn mentions_any_word(words: &Words, forms: &[&str]) -> bool {
    forms.iter().any(|form| words.has_word(form))
}
