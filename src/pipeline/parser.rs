//! Extraction of the recommendation tag from LLM output.
//!
//! The system prompt asks the model to end its answer with
//! `RECOMMENDED_IDS: [id1,id2,...]`. Parsing never fails: a missing or
//! malformed tag yields the raw text and no recommendations.

use std::sync::LazyLock;

use regex::Regex;

/// Literal tag prefix the model is asked to emit.
pub const TAG: &str = "RECOMMENDED_IDS:";

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RECOMMENDED_IDS:[ \t]*\[([^\]\r\n]*)\][ \t]*").expect("tag pattern is valid")
});

/// LLM output split into customer-facing text and recommended ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub display_text: String,
    pub recommendation_ids: Vec<String>,
}

/// Split raw model output into display text and recommendation ids.
///
/// Uses the last well-formed tag in the text. Ids are trimmed, stripped of
/// surrounding quotes, and empty ids are dropped.
pub fn parse(raw: &str) -> ParsedResponse {
    let Some(tag) = TAG_PATTERN.captures_iter(raw).last() else {
        return ParsedResponse {
            display_text: raw.to_string(),
            recommendation_ids: Vec::new(),
        };
    };

    let recommendation_ids = tag
        .get(1)
        .map(|list| list.as_str())
        .unwrap_or_default()
        .split(',')
        .map(|token| token.trim().trim_matches(|c| matches!(c, '"' | '\'' | '`')).trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let whole = tag.get(0).map_or(0..0, |m| m.range());
    let mut display_text = String::with_capacity(raw.len());
    display_text.push_str(raw[..whole.start].trim_end());
    let rest = raw[whole.end..].trim();
    if !rest.is_empty() {
        display_text.push('\n');
        display_text.push_str(rest);
    }

    ParsedResponse {
        display_text: display_text.trim().to_string(),
        recommendation_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_tag_line() {
        let parsed = parse("Try our Diavola, it is spicy.\nRECOMMENDED_IDS: [a, \"b\", c]");
        assert_eq!(parsed.display_text, "Try our Diavola, it is spicy.");
        assert_eq!(parsed.recommendation_ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn tag_on_same_line_as_answer() {
        let parsed = parse("Препоръчваме... RECOMMENDED_IDS: [p1,p2]");
        assert_eq!(parsed.display_text, "Препоръчваме...");
        assert_eq!(parsed.recommendation_ids, vec!["p1", "p2"]);
    }

    #[test]
    fn no_tag_returns_input_unchanged() {
        let raw = "  We have three salads.\n";
        let parsed = parse(raw);
        assert_eq!(parsed.display_text, raw);
        assert!(parsed.recommendation_ids.is_empty());
    }

    #[test]
    fn unclosed_bracket_is_not_a_tag() {
        let raw = "Enjoy!\nRECOMMENDED_IDS: [p1, p2";
        let parsed = parse(raw);
        assert_eq!(parsed.display_text, raw);
        assert!(parsed.recommendation_ids.is_empty());
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let raw = "Enjoy!\nrecommended_ids: [p1]";
        assert!(parse(raw).recommendation_ids.is_empty());
    }

    #[test]
    fn last_tag_wins() {
        let parsed = parse("RECOMMENDED_IDS: [x]\nActually these:\nRECOMMENDED_IDS: [y, z]");
        assert_eq!(parsed.recommendation_ids, vec!["y", "z"]);
        assert_eq!(parsed.display_text, "RECOMMENDED_IDS: [x]\nActually these:");
    }

    #[test]
    fn empty_list_and_empty_tokens() {
        let parsed = parse("Nothing fits.\nRECOMMENDED_IDS: []");
        assert_eq!(parsed.display_text, "Nothing fits.");
        assert!(parsed.recommendation_ids.is_empty());

        let parsed = parse("Ok.\nRECOMMENDED_IDS: [ , 'p1',, ]");
        assert_eq!(parsed.recommendation_ids, vec!["p1"]);
    }
}
