//! Port traits implemented by infrastructure crates.

use async_trait::async_trait;

use crate::LlmError;

/// A generative model that turns a prompt into text.
///
/// Implementations perform exactly one outbound request per call and never
/// retry internally; retry policy belongs to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `prompt` and returns the model's reply text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
