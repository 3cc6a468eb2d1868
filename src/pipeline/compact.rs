//! Compact menu encoding for the LLM prompt.
//!
//! The compact form is a lossy projection of a [`MenuSnapshot`] that keeps
//! only what the model needs to pick dishes, in as few tokens as possible:
//!
//! ```text
//! {"r":"Механа","c":[{"n":"Салати","i":[["Шопска",8.5,"350г","Домати, краставици","v","p1",5]]}]}
//! ```
//!
//! Each item is a JSON array `[name, price, size, description, flags, id,
//! prep_minutes]`. `flags` is a flag-code: one letter per set flag in the
//! fixed order `v` vegetarian, `g` vegan, `h` spicy, `p` popular. An empty
//! string means no flag is set. The letters exist only in this encoding;
//! everywhere else flags are [`ItemFlags`].

use serde::Serialize;

use crate::types::{ItemFlags, MenuItem, MenuSnapshot};

/// Maximum description length, in characters, carried into the prompt.
pub const DESCRIPTION_LIMIT: usize = 50;

/// Flag letters in encoding order.
const FLAG_LETTERS: [(char, fn(&ItemFlags) -> bool); 4] = [
    ('v', |f| f.vegetarian),
    ('g', |f| f.vegan),
    ('h', |f| f.spicy),
    ('p', |f| f.popular),
];

/// Prompt-sized projection of a menu snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactMenu {
    #[serde(rename = "r")]
    pub restaurant: String,
    #[serde(rename = "c")]
    pub categories: Vec<CompactCategory>,
}

/// A category holding at least one available item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactCategory {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "i")]
    pub items: Vec<CompactItem>,
}

/// `(name, price, size, description, flag-code, id, preparation minutes)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompactItem(
    pub String,
    pub f64,
    pub Option<String>,
    pub Option<String>,
    pub String,
    pub String,
    pub Option<u32>,
);

impl CompactMenu {
    /// Serialize to the single-line JSON embedded in the system prompt.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Project a snapshot into its compact form.
///
/// Unavailable items are dropped, and so are categories left without any
/// available item.
pub fn compact(menu: &MenuSnapshot) -> CompactMenu {
    let categories = menu
        .categories
        .iter()
        .filter_map(|category| {
            let items: Vec<CompactItem> = category
                .items
                .iter()
                .filter(|item| item.available)
                .map(compact_item)
                .collect();
            (!items.is_empty()).then(|| CompactCategory {
                name: category.name.clone(),
                items,
            })
        })
        .collect();

    CompactMenu {
        restaurant: menu.restaurant.name.clone(),
        categories,
    }
}

fn compact_item(item: &MenuItem) -> CompactItem {
    CompactItem(
        item.name.clone(),
        item.price,
        item.size.clone(),
        item.description
            .as_deref()
            .map(|d| d.chars().take(DESCRIPTION_LIMIT).collect()),
        flag_code(&item.flags),
        item.id.clone(),
        item.preparation_time,
    )
}

/// Encode flags as letters in `v g h p` order.
pub fn flag_code(flags: &ItemFlags) -> String {
    FLAG_LETTERS
        .iter()
        .filter(|(_, is_set)| is_set(flags))
        .map(|(letter, _)| *letter)
        .collect()
}
