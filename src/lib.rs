//! menuqa - Menu question answering for restaurant menu viewers
//!
//! This crate answers free-text customer questions ("what's spicy?", "do you
//! have vegan pizza?") about one restaurant's menu. On-topic questions go to
//! an LLM together with a compact encoding of the menu; the reply's
//! `RECOMMENDED_IDS` tag is resolved back to menu items. When the LLM is
//! unavailable, a keyword rule engine answers instead, so a validated
//! question always gets an answer.
//!
//! # Example
//!
//! ```rust,no_run
//! use menuqa::{MenuConcierge, MenuRequest};
//!
//! #[tokio::main]
//! async fn main() -> menuqa::Result<()> {
//!     let concierge = MenuConcierge::builder()
//!         .openai("sk-your-key")
//!         .build()?;
//!
//!     let request: MenuRequest = serde_json::from_str(r#"{
//!         "restaurantId": "r1",
//!         "question": "Какво е люто?",
//!         "language": "bg",
//!         "menu": {"restaurant": {"id": "r1", "name": "Trattoria"}, "categories": []}
//!     }"#)?;
//!
//!     let answer = concierge.answer(&request).await?;
//!     println!("{} {:?}", answer.display_text, answer.recommendation_ids());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod concierge;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, ResponseCache};
pub use concierge::{MenuConcierge, MenuConciergeBuilder};
pub use error::{MenuError, Result};
pub use providers::{CompletionProvider, CompletionRequest, RetryConfig};

pub use types::{
    Category, ItemFlags, Language, MAX_RECOMMENDATIONS, MenuAnswer, MenuItem, MenuRequest,
    MenuSnapshot, Question, Restaurant,
};
