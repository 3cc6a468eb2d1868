//! The menu concierge: one question in, one answer out.
//!
//! [`MenuConcierge`] wires the [`pipeline`](crate::pipeline) stages to a
//! [`ResponseCache`](crate::ResponseCache) and a
//! [`CompletionProvider`](crate::providers::CompletionProvider). Build one
//! with [`MenuConcierge::builder()`].

mod builder;
mod service;

pub use builder::{DEFAULT_TIMEOUT, MenuConciergeBuilder};
pub use service::MenuConcierge;
