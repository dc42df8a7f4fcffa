//! Retry-protected classify-and-summarise call.
//!
//! One [`Classifier::classify`] call makes at most `max_attempts` requests.
//! Transport failures and unparseable replies share a single retry loop with
//! a fixed back-off; when every attempt fails the sentinel triple is returned
//! instead of an error.

use std::sync::Arc;

use pipeline::{
    parse_classification, ClassificationResult, EnrichmentSettings, LlmError, LlmProvider,
    ParseError,
};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::prompt::classification_prompt;

/// Why a single attempt failed. Only ever logged.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transport(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AttemptError {
    /// Short label for the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
        }
    }
}

/// Classifies a lead's persona and urgency and summarises its comment.
#[derive(Clone)]
pub struct Classifier {
    provider: Arc<dyn LlmProvider>,
    settings: EnrichmentSettings,
}

impl Classifier {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: EnrichmentSettings) -> Self {
        Self { provider, settings }
    }

    /// Classifies one lead.
    ///
    /// Never fails: after `max_attempts` failed attempts (at least one is
    /// always made) the result is [`ClassificationResult::sentinel`]. Every
    /// failed attempt, the last included, is followed by the configured
    /// back-off, awaited in the calling task.
    #[instrument(skip_all)]
    pub async fn classify(&self, role: &str, comment: &str) -> ClassificationResult {
        let prompt = classification_prompt(role, comment);
        let max_attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.attempt(&prompt).await {
                Ok(result) => {
                    debug!(
                        attempt,
                        persona_type = %result.persona_type,
                        urgency = %result.urgency,
                        "Lead classified"
                    );
                    return result;
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        kind = e.kind(),
                        error = %e,
                        "Classification attempt failed"
                    );
                    tokio::time::sleep(self.settings.retry_backoff).await;
                }
            }
        }

        warn!(max_attempts, "All classification attempts failed; using sentinel values");
        ClassificationResult::sentinel()
    }

    async fn attempt(&self, prompt: &str) -> Result<ClassificationResult, AttemptError> {
        let text = self.provider.generate(prompt).await?;
        Ok(parse_classification(&text)?)
    }
}
