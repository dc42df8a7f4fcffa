//! Error types for the LeadRouter domain.
//!
//! [`LeadRouterError`] covers conditions that stop a batch before or during
//! processing (bad input schema, bad configuration, cancellation). Per-row
//! model failures never surface here: they are recovered into sentinel values
//! by the classifier.
//!
//! [`ParseError`] and [`LlmError`] describe the two ways a single model
//! attempt can fail. Both are retried identically; the distinction exists for
//! logging.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Per-attempt failures
// ---------------------------------------------------------------------------

/// The model's reply did not contain a usable structured object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `{ ... }` span exists in the reply.
    #[error("No JSON object found in model response")]
    NoJsonObject,

    /// A brace-delimited span exists but is not a well-formed JSON object.
    #[error("Malformed JSON object in model response: {0}")]
    Malformed(String),

    /// A result field is present but is not a string.
    #[error("Field '{0}' in model response is not a string")]
    FieldNotString(&'static str),
}

/// Failure of the underlying model call itself.
///
/// Returned by [`crate::LlmProvider`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service rejected the request because a quota was exhausted.
    #[error("Rate limited by model service{}", retry_hint(retry_after))]
    RateLimited {
        /// Delay suggested by the service, when it sent one.
        retry_after: Option<Duration>,
    },

    /// The service answered with a non-success status.
    #[error("Model service returned HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// The service answered successfully but without any candidate text.
    #[error("Model response contained no text")]
    EmptyResponse,

    /// The service answered with a body that is not the expected envelope.
    #[error("Invalid model response envelope: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Batch-level errors
// ---------------------------------------------------------------------------

/// Errors that stop a batch.
///
/// Raised before any model call (schema, configuration) or at a row boundary
/// (cancellation). Never raised for an individual row's classification.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LeadRouterError {
    /// The input table lacks one or more required columns.
    #[error("Input is missing required column(s): {}", missing.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        missing: Vec<String>,
    },

    /// The runtime configuration is invalid.
    ///
    /// Produced at start-up; no row is processed with an invalid config.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// Ground-truth and predicted tables share no key value.
    #[error("No matching '{key}' values found between ground truth and predictions")]
    NoMatchingKeys {
        /// The join column.
        key: String,
    },

    /// The caller requested cancellation; processing stopped at a row boundary.
    #[error("Processing cancelled after {completed} of {total} rows")]
    Cancelled {
        /// Rows fully processed before the stop.
        completed: usize,
        /// Rows in the table.
        total: usize,
    },
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {}s)", delay.as_secs()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_every_column() {
        let err = LeadRouterError::MissingColumns {
            missing: vec!["job_title".to_string(), "comment".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Input is missing required column(s): job_title, comment"
        );
    }

    #[test]
    fn cancelled_message_reports_progress() {
        let err = LeadRouterError::Cancelled {
            completed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "Processing cancelled after 2 of 5 rows");
    }

    #[test]
    fn rate_limit_message_carries_the_suggested_delay() {
        let err = LlmError::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert_eq!(err.to_string(), "Rate limited by model service (retry after 30s)");

        let err = LlmError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited by model service");
    }
}
