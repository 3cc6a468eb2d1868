//! Completion providers for the LLM backend.

pub mod openai;
pub mod retry;
pub mod traits;

pub use openai::OpenAiClient;
pub use retry::{RetryConfig, RetryingCompletionProvider};
pub use traits::{CompletionProvider, CompletionRequest};
