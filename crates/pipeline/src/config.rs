//! Runtime configuration values.
//!
//! Built once at start-up by the composition root and passed explicitly into
//! the provider and the enrichment pipeline. Nothing in the core reads the
//! process environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ApiKey, LeadRouterError, ModelName};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the model service.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: ApiKey,
    pub model_name: ModelName,
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Upper bound for a single request, including reading the body.
    pub request_timeout: Duration,
}

impl ModelConfig {
    /// Validates raw values into a [`ModelConfig`] with the default base URL
    /// and a 60 second request timeout.
    ///
    /// # Errors
    ///
    /// [`LeadRouterError::Configuration`] when the key or model name is blank.
    pub fn new(
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Result<Self, LeadRouterError> {
        let api_key = ApiKey::new(api_key).ok_or_else(|| LeadRouterError::Configuration {
            message: "API key is not set".to_string(),
        })?;
        let model_name = ModelName::new(model_name.into().trim().to_string()).ok_or_else(|| {
            LeadRouterError::Configuration {
                message: "model name is not set".to_string(),
            }
        })?;

        Ok(Self {
            api_key,
            model_name,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
        })
    }

    /// Overrides the base URL (e.g. a proxy or a local stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Pacing and retry settings for the enrichment pipeline.
///
/// The defaults keep a sequential run under strict free-tier request quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSettings {
    /// Model attempts per row before falling back to the sentinel values.
    pub max_attempts: u32,
    /// Fixed wait after each failed attempt. No exponential growth.
    pub retry_backoff: Duration,
    /// Fixed pause after each row, whether it succeeded or not.
    pub row_delay: Duration,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_backoff: Duration::from_secs(2),
            row_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_config_rejects_blank_values() {
        assert!(matches!(
            ModelConfig::new("", "gemini-1.5-flash"),
            Err(LeadRouterError::Configuration { .. })
        ));
        assert!(matches!(
            ModelConfig::new("key", "  "),
            Err(LeadRouterError::Configuration { .. })
        ));
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = ModelConfig::new("key", "gemini-1.5-flash")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.model_name.as_str(), "gemini-1.5-flash");
    }

    #[test]
    fn default_settings_match_quota_pacing() {
        let settings = EnrichmentSettings::default();
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.retry_backoff, Duration::from_secs(2));
        assert_eq!(settings.row_delay, Duration::from_secs(1));
    }
}
