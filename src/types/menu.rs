//! Menu snapshot types.
//!
//! A [`MenuSnapshot`] is the read-only view of one restaurant's menu that the
//! menu store hands to the pipeline for a single question. Field names follow
//! the store's camelCase JSON.

use serde::{Deserialize, Serialize};

/// The restaurant a snapshot belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
}

/// Boolean dietary and marketing attributes of a menu item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFlags {
    #[serde(default, rename = "isVegetarian")]
    pub vegetarian: bool,
    #[serde(default, rename = "isVegan")]
    pub vegan: bool,
    #[serde(default, rename = "isSpicy")]
    pub spicy: bool,
    #[serde(default, rename = "isPopular")]
    pub popular: bool,
}

/// A single orderable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Price in the menu's currency (e.g. BGN), not minor units.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub flags: ItemFlags,
    /// Preparation time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,
    #[serde(default = "default_available", rename = "isAvailable")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Create an available item with no optional attributes set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            size: None,
            description: None,
            flags: ItemFlags::default(),
            preparation_time: None,
            available: true,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_preparation_time(mut self, minutes: u32) -> Self {
        self.preparation_time = Some(minutes);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// A named group of items, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
        }
    }
}

/// One restaurant's menu as supplied by the menu store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub restaurant: Restaurant,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl MenuSnapshot {
    pub fn new(restaurant: Restaurant, categories: Vec<Category>) -> Self {
        Self {
            restaurant,
            categories,
        }
    }

    /// Available items paired with their category, in snapshot order.
    pub fn available_items(&self) -> impl Iterator<Item = (&Category, &MenuItem)> {
        self.all_items().filter(|(_, item)| item.available)
    }

    /// Every item paired with its category, available or not.
    pub fn all_items(&self) -> impl Iterator<Item = (&Category, &MenuItem)> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter().map(move |item| (category, item)))
    }
}
