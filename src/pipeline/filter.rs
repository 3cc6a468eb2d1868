//! Keyword pre-check that keeps clearly unrelated questions away from the LLM.
//!
//! A question is off-topic only when it names an unrelated subject AND says
//! nothing about food. Anything ambiguous goes through.

use super::text::{Words, mentions_any, mentions_any_word};
use crate::types::Language;

/// Classification of a customer question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    OnTopic,
    OffTopic,
}

/// Food and menu word stems (Bulgarian).
const FOOD_STEMS_BG: &[&str] = &[
    "ям", "яде", "яж", "храна", "храни", "ястие", "ястия", "меню", "пица", "салат", "супа",
    "супи", "десерт", "сладк", "напит", "вино", "бира", "кафе", "чай", "сок", "месо", "мес",
    "пиле", "пилешк", "свинск", "телешк", "риба", "рибн", "вегетариан", "веган", "лют",
    "пикант", "препоръч", "порция", "цена", "цени", "струва", "евтин", "закуск", "обяд",
    "вечеря", "гладен", "гладн", "вкус", "сос", "паст", "бургер", "скара", "гарнитур",
    "алерг", "глутен", "поръч", "хапн", "предяст", "основно", "сирене", "зеленчу",
];

/// Food and menu word stems (English).
const FOOD_STEMS_EN: &[&str] = &[
    "food", "eat", "dish", "meal", "menu", "pizza", "salad", "soup", "dessert", "sweet",
    "drink", "wine", "beer", "coffee", "tea", "juice", "meat", "chicken", "pork", "beef",
    "fish", "seafood", "vegetarian", "vegan", "spicy", "chili", "recommend", "portion",
    "price", "cost", "cheap", "breakfast", "lunch", "dinner", "hungry", "tasty", "delicious",
    "sauce", "pasta", "burger", "grill", "side", "allerg", "gluten", "order", "snack",
    "starter", "appetizer", "cheese", "vegetable",
];

/// Clearly unrelated subject words (Bulgarian), matched as whole word forms.
const OFF_TOPIC_WORDS_BG: &[&str] = &[
    "столица", "столицата", "столици", "столиците", "президент", "президентът", "президента",
    "президенти", "премиер", "премиерът", "премиера", "политика", "политиката", "политик",
    "политици", "политически", "партия", "партията", "партии", "избори", "изборите",
    "държава", "държавата", "държави", "математика", "математиката", "математически",
    "уравнение", "уравнението", "уравнения", "интеграл", "интеграла", "интеграли",
    "компютър", "компютъра", "компютри", "лаптоп", "лаптопа", "телефон", "телефона",
    "телефони", "програмиране", "програмирането", "времето", "прогноза", "прогнозата",
    "дъжд", "дъжда", "спорт", "спорта", "футбол", "футбола", "мач", "мача", "мачът",
    "мачове", "мачовете", "история", "историята", "география", "географията", "физика",
    "физиката", "химия", "химията", "филм", "филма", "филмът", "филми", "филмите",
    "музика", "музиката", "песен", "песента", "песни",
];

/// Clearly unrelated subject words (English), matched as whole word forms.
const OFF_TOPIC_WORDS_EN: &[&str] = &[
    "capital", "capitals", "president", "presidents", "minister", "politics", "political",
    "politician", "politicians", "election", "elections", "country", "countries", "math",
    "maths", "mathematics", "equation", "equations", "integral", "integrals", "computer",
    "computers", "laptop", "laptops", "phone", "phones", "smartphone", "programming", "code",
    "coding", "weather", "forecast", "rain", "raining", "rainy", "sport", "sports",
    "football", "soccer", "match", "matches", "history", "geography", "physics",
    "chemistry", "movie", "movies", "film", "films", "music", "song", "songs",
];

/// Classify a question as on- or off-topic.
///
/// Both languages' lists are consulted regardless of the declared language,
/// so a mixed-language question is judged on all of its words. Food words
/// match as stems; unrelated words only match as listed whole forms, so
/// "matcha" or "rainbow trout" never count as unrelated.
pub fn classify(question: &str) -> Topic {
    let words = Words::new(question);

    let unrelated = mentions_any_word(&words, OFF_TOPIC_WORDS_BG)
        || mentions_any_word(&words, OFF_TOPIC_WORDS_EN);
    if !unrelated {
        return Topic::OnTopic;
    }

    let food = mentions_any(&words, FOOD_STEMS_BG) || mentions_any(&words, FOOD_STEMS_EN);
    if food { Topic::OnTopic } else { Topic::OffTopic }
}

/// Canned reply for an off-topic question.
pub fn off_topic_message(language: Language) -> &'static str {
    match language {
        Language::Bulgarian => {
            "Съжалявам, мога да отговарям само на въпроси за менюто и храната в ресторанта."
        }
        Language::English => {
            "Sorry, I can only help with questions about the menu and food at this restaurant."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_question_is_off_topic() {
        assert_eq!(classify("Каква е столицата на България?"), Topic::OffTopic);
        assert_eq!(classify("What is the capital of France?"), Topic::OffTopic);
    }

    #[test]
    fn food_question_is_on_topic() {
        assert_eq!(classify("Какво е люто?"), Topic::OnTopic);
        assert_eq!(classify("Do you have vegan pizza?"), Topic::OnTopic);
    }

    #[test]
    fn unrelated_word_with_food_word_stays_on_topic() {
        assert_eq!(
            classify("Каква храна ще препоръчате докато гледаме мача?"),
            Topic::OnTopic
        );
        assert_eq!(classify("What should I eat while watching football?"), Topic::OnTopic);
    }

    #[test]
    fn ambiguous_question_is_on_topic() {
        assert_eq!(classify("Здравейте!"), Topic::OnTopic);
        assert_eq!(classify("What do you have?"), Topic::OnTopic);
    }

    #[test]
    fn matches_whole_word_prefixes_only() {
        // "weather" contains "eat" but does not start with it.
        assert_eq!(classify("How is the weather today?"), Topic::OffTopic);
    }

    #[test]
    fn unrelated_words_match_whole_forms_only() {
        assert_eq!(classify("Do you have matcha?"), Topic::OnTopic);
        assert_eq!(classify("Is the rainbow trout fresh?"), Topic::OnTopic);
        assert_eq!(classify("Do you have countryside bread?"), Topic::OnTopic);
        assert_eq!(classify("Имате ли мачта?"), Topic::OnTopic);
    }

    #[test]
    fn inflected_unrelated_words_are_listed() {
        assert_eq!(classify("Кой спечели мача?"), Topic::OffTopic);
        assert_eq!(classify("Who won the matches yesterday?"), Topic::OffTopic);
        assert_eq!(classify("Will it be rainy?"), Topic::OffTopic);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(classify("WEATHER FORECAST"), Topic::OffTopic);
        assert_eq!(classify("СТОЛИЦАТА"), Topic::OffTopic);
    }
}
