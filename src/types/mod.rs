//! Public types for the menuqa API.

mod answer;
mod menu;
mod question;

pub use answer::{MAX_RECOMMENDATIONS, MenuAnswer};
pub use menu::{Category, ItemFlags, MenuItem, MenuSnapshot, Restaurant};
pub use question::{DEFAULT_LANGUAGE, Language, MenuRequest, Question};
