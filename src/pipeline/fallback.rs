//! Rule-based recommendations used when the LLM is unavailable.
//!
//! [`RULES`] is an ordered table. Each rule inspects the question, and the
//! first rule that recognises an intent picks the items and the sentence of
//! the answer; later rules are not consulted. The last rule always matches.
//!
//! Sentences follow the caller's language code, never the language the
//! question happens to be written in. Only Bulgarian and English sentences
//! exist; other codes get English.

use std::sync::LazyLock;

use regex::Regex;

use super::text::{Words, mentions_any};
use crate::types::{Category, Language, MAX_RECOMMENDATIONS, MenuAnswer, MenuItem, MenuSnapshot};

/// Preparation time, in minutes, at or below which a dish counts as quick.
pub const QUICK_PREPARATION_MINUTES: u32 = 10;

/// Number of dishes offered when no intent is recognised.
pub const DEFAULT_SUGGESTIONS: usize = 3;

static PRICE_CEILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:под|до|under|below|less than|up to|max)\s*[$€]?\s*(\d+(?:[.,]\d+)?)")
        .expect("price pattern is valid")
});

/// Intent recognised by a fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Spicy,
    Vegetarian,
    Vegan,
    Popular,
    Quick,
    PriceCeiling,
    Dish,
    Default,
}

/// How a matched rule chooses items.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Spicy,
    Vegetarian,
    Vegan,
    Popular,
    Quick,
    /// Items priced at or below the amount.
    MaxPrice(f64),
    /// Items whose name or category name contains any of the keywords.
    Keywords(Vec<String>),
    /// Popular items, else the first available items.
    Default,
}

/// Lead-in and empty-result sentences for one language.
#[derive(Debug, Clone, Copy)]
pub struct Sentences {
    pub lead_in: &'static str,
    pub none: &'static str,
}

/// One row of the rule table.
pub struct FallbackRule {
    pub intent: Intent,
    detect: fn(&Cue<'_>) -> Option<Selection>,
    bulgarian: Sentences,
    english: Sentences,
}

impl FallbackRule {
    /// Selection this rule would make for `question`, if it matches.
    pub fn detect(&self, question: &str, menu: &MenuSnapshot) -> Option<Selection> {
        (self.detect)(&Cue::new(question, menu))
    }

    pub fn sentences(&self, language: Language) -> Sentences {
        match language {
            Language::Bulgarian => self.bulgarian,
            Language::English => self.english,
        }
    }
}

/// Question data the rules inspect.
struct Cue<'a> {
    text: &'a str,
    words: Words,
    menu: &'a MenuSnapshot,
}

impl<'a> Cue<'a> {
    fn new(text: &'a str, menu: &'a MenuSnapshot) -> Self {
        Self {
            text,
            words: Words::new(text),
            menu,
        }
    }

    fn mentions(&self, bulgarian: &[&str], english: &[&str]) -> bool {
        mentions_any(&self.words, bulgarian) || mentions_any(&self.words, english)
    }
}

/// Dish and category stems recognised by the dish rule.
const DISH_STEMS: &[&str] = &[
    "салат", "пиц", "супа", "супи", "десерт", "паст", "бургер", "скара", "риба", "пиле",
    "напит", "закуск", "сандвич", "пърж", "salad", "pizza", "soup", "dessert", "pasta",
    "burger", "grill", "fish", "chicken", "drink", "breakfast", "sandwich", "steak", "fries",
];

/// Words that make a preceding "hot" mean temperature, not heat.
const HOT_DRINKS: &[&str] = &[
    "chocolate", "tea", "coffee", "drink", "drinks", "water", "wine", "cider", "toddy",
];

/// The rule table, in evaluation order.
pub static RULES: [FallbackRule; 8] = [
    FallbackRule {
        intent: Intent::Spicy,
        detect: |cue| {
            let hot = cue.words.has_word_except_before("hot", HOT_DRINKS);
            (hot || cue.mentions(&["лют", "пикант"], &["spicy", "chili", "chilli"]))
                .then_some(Selection::Spicy)
        },
        bulgarian: Sentences {
            lead_in: "Ето нашите люти предложения:",
            none: "В момента нямаме люти ястия в менюто.",
        },
        english: Sentences {
            lead_in: "Here are our spicy dishes:",
            none: "We don't have any spicy dishes on the menu right now.",
        },
    },
    FallbackRule {
        intent: Intent::Vegetarian,
        detect: |cue| {
            cue.mentions(&["вегетариан", "постн"], &["vegetarian", "veggie", "meatless"])
                .then_some(Selection::Vegetarian)
        },
        bulgarian: Sentences {
            lead_in: "Ето нашите вегетариански ястия:",
            none: "В момента нямаме вегетариански ястия в менюто.",
        },
        english: Sentences {
            lead_in: "Here are our vegetarian dishes:",
            none: "We don't have any vegetarian dishes on the menu right now.",
        },
    },
    FallbackRule {
        intent: Intent::Vegan,
        detect: |cue| {
            cue.mentions(&["веган"], &["vegan", "plant"]).then_some(Selection::Vegan)
        },
        bulgarian: Sentences {
            lead_in: "Ето нашите веган ястия:",
            none: "В момента нямаме веган ястия в менюто.",
        },
        english: Sentences {
            lead_in: "Here are our vegan dishes:",
            none: "We don't have any vegan dishes on the menu right now.",
        },
    },
    FallbackRule {
        intent: Intent::Popular,
        detect: |cue| {
            cue.mentions(
                &["популяр", "препоръч", "хит", "любим"],
                &["popular", "recommend", "best", "favorite", "favourite", "suggest"],
            )
            .then_some(Selection::Popular)
        },
        bulgarian: Sentences {
            lead_in: "Ето най-популярните ни ястия:",
            none: "В момента нямаме отбелязани популярни ястия.",
        },
        english: Sentences {
            lead_in: "Here are our most popular dishes:",
            none: "We don't have any dishes marked as popular right now.",
        },
    },
    FallbackRule {
        intent: Intent::Quick,
        detect: |cue| {
            cue.mentions(&["бърз", "набързо", "веднага"], &["quick", "fast", "hurry"])
                .then_some(Selection::Quick)
        },
        bulgarian: Sentences {
            lead_in: "Ето ястия, които приготвяме бързо:",
            none: "В момента нямаме ястия с кратко време за приготвяне.",
        },
        english: Sentences {
            lead_in: "Here are dishes we can prepare quickly:",
            none: "We don't have any quick dishes on the menu right now.",
        },
    },
    FallbackRule {
        intent: Intent::PriceCeiling,
        detect: |cue| price_ceiling(cue.text).map(Selection::MaxPrice),
        bulgarian: Sentences {
            lead_in: "Ето ястия в рамките на вашия бюджет:",
            none: "За съжаление нямаме ястия в рамките на този бюджет.",
        },
        english: Sentences {
            lead_in: "Here are dishes within your budget:",
            none: "Sorry, we don't have dishes within that budget.",
        },
    },
    FallbackRule {
        intent: Intent::Dish,
        detect: |cue| {
            let keywords = dish_keywords(cue);
            (!keywords.is_empty()).then_some(Selection::Keywords(keywords))
        },
        bulgarian: Sentences {
            lead_in: "Ето какво намерихме в менюто:",
            none: "За съжаление не намерихме такива ястия в менюто.",
        },
        english: Sentences {
            lead_in: "Here is what we found on the menu:",
            none: "Sorry, we couldn't find such dishes on the menu.",
        },
    },
    FallbackRule {
        intent: Intent::Default,
        detect: |_| Some(Selection::Default),
        bulgarian: Sentences {
            lead_in: "Ето някои предложения от нашето меню:",
            none: "В момента няма налични ястия.",
        },
        english: Sentences {
            lead_in: "Here are a few suggestions from our menu:",
            none: "There are no dishes available right now.",
        },
    },
];

/// First rule matching `question`, with its selection.
pub fn matching_rule(question: &str, menu: &MenuSnapshot) -> (&'static FallbackRule, Selection) {
    let cue = Cue::new(question, menu);
    for rule in RULES.iter() {
        if let Some(selection) = (rule.detect)(&cue) {
            return (rule, selection);
        }
    }
    let last = &RULES[RULES.len() - 1];
    (last, Selection::Default)
}

/// Answer `question` from the menu alone.
///
/// Always produces non-empty display text; recommendations are capped at
/// [`MAX_RECOMMENDATIONS`] and follow snapshot order.
pub fn recommend(question: &str, language: Language, menu: &MenuSnapshot) -> MenuAnswer {
    let (rule, selection) = matching_rule(question, menu);
    let recommendations = select(&selection, menu);
    let sentences = rule.sentences(language);

    let display_text = if recommendations.is_empty() {
        sentences.none
    } else {
        sentences.lead_in
    };

    MenuAnswer {
        display_text: display_text.to_string(),
        recommendations,
    }
}

/// Apply a selection to the available items of the menu.
pub fn select(selection: &Selection, menu: &MenuSnapshot) -> Vec<MenuItem> {
    match selection {
        Selection::Spicy => pick(menu, MAX_RECOMMENDATIONS, |_, item| item.flags.spicy),
        Selection::Vegetarian => pick(menu, MAX_RECOMMENDATIONS, |_, item| item.flags.vegetarian),
        Selection::Vegan => pick(menu, MAX_RECOMMENDATIONS, |_, item| item.flags.vegan),
        Selection::Popular => pick(menu, MAX_RECOMMENDATIONS, |_, item| item.flags.popular),
        Selection::Quick => pick(menu, MAX_RECOMMENDATIONS, |_, item| {
            item.preparation_time
                .is_some_and(|minutes| minutes <= QUICK_PREPARATION_MINUTES)
        }),
        Selection::MaxPrice(max) => pick(menu, MAX_RECOMMENDATIONS, |_, item| item.price <= *max),
        Selection::Keywords(keywords) => pick(menu, MAX_RECOMMENDATIONS, |category, item| {
            let name = item.name.to_lowercase();
            let category = category.name.to_lowercase();
            keywords
                .iter()
                .any(|k| name.contains(k.as_str()) || category.contains(k.as_str()))
        }),
        Selection::Default => {
            let popular = pick(menu, DEFAULT_SUGGESTIONS, |_, item| item.flags.popular);
            if popular.is_empty() {
                pick(menu, DEFAULT_SUGGESTIONS, |_, _| true)
            } else {
                popular
            }
        }
    }
}

/// Up to `limit` available items accepted by `keep`, in snapshot order.
fn pick(
    menu: &MenuSnapshot,
    limit: usize,
    keep: impl Fn(&Category, &MenuItem) -> bool,
) -> Vec<MenuItem> {
    menu.available_items()
        .filter(|(category, item)| keep(category, item))
        .take(limit)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Amount from an "under N" / "под N" style phrase.
fn price_ceiling(text: &str) -> Option<f64> {
    let caps = PRICE_CEILING.captures(text)?;
    caps.get(1)?.as_str().replace(',', ".").parse().ok()
}

/// Dish stems in the question, plus menu category names it mentions.
fn dish_keywords(cue: &Cue<'_>) -> Vec<String> {
    let mut keywords: Vec<String> = DISH_STEMS
        .iter()
        .filter(|stem| cue.words.has_prefix(stem))
        .map(|stem| stem.to_string())
        .collect();

    let text = cue.text.to_lowercase();
    for category in &cue.menu.categories {
        let name = category.name.trim().to_lowercase();
        if !name.is_empty() && text.contains(&name) && !keywords.contains(&name) {
            keywords.push(name);
        }
    }
    keywords
}
