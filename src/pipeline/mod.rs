//! Stages of the menu question pipeline.
//!
//! Each stage is a pure function over its inputs; the only stateful pieces
//! (cache, completion provider) live in [`crate::cache`] and
//! [`crate::providers`] and are wired together by
//! [`MenuConcierge`](crate::MenuConcierge).
//!
//! - [`filter`]: off-topic pre-check
//! - [`compact`]: prompt-sized menu encoding
//! - [`prompt`]: system prompt construction
//! - [`parser`]: `RECOMMENDED_IDS` extraction
//! - [`assemble`]: id → item resolution
//! - [`fallback`]: rule-based answers without the LLM

pub mod assemble;
pub mod compact;
pub mod fallback;
pub mod filter;
pub mod parser;
pub mod prompt;
mod text;

pub use assemble::resolve;
pub use compact::{CompactMenu, compact, flag_code};
pub use fallback::recommend;
pub use filter::{Topic, classify, off_topic_message};
pub use parser::{ParsedResponse, parse};
pub use prompt::system_prompt;
