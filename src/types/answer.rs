//! Answer types returned to the caller.

use serde::{Deserialize, Serialize};

use super::menu::MenuItem;

/// Maximum number of recommended items in any answer.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A short natural-language answer plus recommended menu items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAnswer {
    pub display_text: String,
    #[serde(default)]
    pub recommendations: Vec<MenuItem>,
}

impl MenuAnswer {
    /// Answer with text only.
    pub fn text(display_text: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            recommendations: Vec::new(),
        }
    }

    /// Recommended item ids, in answer order.
    pub fn recommendation_ids(&self) -> Vec<&str> {
        self.recommendations.iter().map(|i| i.id.as_str()).collect()
    }
}
