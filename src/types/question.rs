//! Inbound question types.

use serde::{Deserialize, Serialize};

use super::menu::MenuSnapshot;
use crate::{MenuError, Result};

/// Language code assumed when the caller does not send one.
pub const DEFAULT_LANGUAGE: &str = "bg";

/// Languages with built-in canned sentences.
///
/// The LLM answers in whatever language the customer writes; this enum only
/// governs text produced locally (off-topic notice, fallback answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bulgarian,
    English,
}

impl Language {
    /// Map a language code to the canned-sentence language.
    ///
    /// Codes starting with `bg` are Bulgarian; every other code falls back
    /// to English.
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("bg") {
            Language::Bulgarian
        } else {
            Language::English
        }
    }
}

/// A validated customer question about one restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    restaurant_id: String,
    text: String,
    language: String,
}

impl Question {
    /// Create a question, rejecting blank restaurant ids and blank text.
    ///
    /// A blank language falls back to [`DEFAULT_LANGUAGE`].
    pub fn new(
        restaurant_id: impl Into<String>,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self> {
        let restaurant_id = restaurant_id.into();
        let text = text.into();
        let mut language = language.into().trim().to_lowercase();

        if restaurant_id.trim().is_empty() {
            return Err(MenuError::InvalidInput("restaurant id is required".into()));
        }
        if text.trim().is_empty() {
            return Err(MenuError::InvalidInput("question text is required".into()));
        }
        if language.is_empty() {
            language = DEFAULT_LANGUAGE.to_string();
        }

        Ok(Self {
            restaurant_id,
            text,
            language,
        })
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// The question exactly as the customer typed it.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased, trimmed language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Lowercased, trimmed question text used for cache lookups.
    pub fn normalized_text(&self) -> String {
        self.text.trim().to_lowercase()
    }

    pub fn canned_language(&self) -> Language {
        Language::from_code(&self.language)
    }
}

/// Wire form of an inbound question, as posted by the menu viewer.
///
/// Every field except the restaurant id is optional on the wire so that a
/// malformed request can be rejected with [`MenuError::InvalidInput`]
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRequest {
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub menu: Option<MenuSnapshot>,
}

impl MenuRequest {
    /// Validate the request into a [`Question`] and the snapshot it refers to.
    pub fn validate(&self) -> Result<(Question, &MenuSnapshot)> {
        let text = self
            .question
            .as_deref()
            .ok_or_else(|| MenuError::InvalidInput("question text is required".into()))?;
        let menu = self
            .menu
            .as_ref()
            .ok_or_else(|| MenuError::InvalidInput("menu snapshot is required".into()))?;
        let question = Question::new(
            self.restaurant_id.as_str(),
            text,
            self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
        )?;
        Ok((question, menu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_language_and_text() {
        let q = Question::new("r1", "  Какво е ЛЮТО? ", " BG ").unwrap();
        assert_eq!(q.language(), "bg");
        assert_eq!(q.normalized_text(), "какво е люто?");
        assert_eq!(q.text(), "  Какво е ЛЮТО? ");
    }

    #[test]
    fn blank_language_defaults_to_bulgarian() {
        let q = Question::new("r1", "pizza?", "").unwrap();
        assert_eq!(q.language(), DEFAULT_LANGUAGE);
        assert_eq!(q.canned_language(), Language::Bulgarian);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Question::new("r1", "   ", "en").unwrap_err();
        assert!(matches!(err, MenuError::InvalidInput(_)));
    }

    #[test]
    fn blank_restaurant_is_rejected() {
        assert!(Question::new("", "pizza?", "en").is_err());
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("bg"), Language::Bulgarian);
        assert_eq!(Language::from_code("bg-BG"), Language::Bulgarian);
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("de"), Language::English);
    }

    #[test]
    fn request_without_menu_is_rejected() {
        let request = MenuRequest {
            restaurant_id: "r1".into(),
            question: Some("pizza?".into()),
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("menu snapshot"));
    }

    #[test]
    fn request_without_question_is_rejected() {
        let request: MenuRequest = serde_json::from_str(
            r#"{"restaurantId": "r1", "menu": {"restaurant": {"id": "r1", "name": "R"}}}"#,
        )
        .unwrap();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("question text"));
    }
}
