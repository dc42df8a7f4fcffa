//! Core domain for LeadRouter.
//!
//! LeadRouter enriches a table of leads (job title plus free-text comment)
//! with a model-assigned persona, urgency and summary, then routes each lead
//! to a sales team through a fixed decision table.
//!
//! This crate contains every domain concept, identifier and error type used
//! throughout the workspace. Infrastructure crates implement the traits
//! defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RunId`, `ModelName`, `ApiKey`, ...) |
//! | [`types`] | Labels, lead table, classification result, run summary |
//! | [`errors`] | Per-attempt and batch-level error types |
//! | [`routing`] | Team routing decision table |
//! | [`response`] | Structured-result extraction from model replies |
//! | [`ports`] | [`LlmProvider`] trait |
//! | [`config`] | Model connection and pacing settings |
//! | [`evaluation`] | Accuracy and precision against ground truth |

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod identifiers;
pub mod ports;
pub mod response;
pub mod routing;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{EnrichmentSettings, ModelConfig, DEFAULT_BASE_URL};
pub use errors::{LeadRouterError, LlmError, ParseError};
pub use evaluation::{evaluate, EvaluationReport, EvaluationRow, LabelPrecision, LabelledRecord};
pub use identifiers::{ApiKey, ColumnName, ModelName, RunId};
pub use ports::LlmProvider;
pub use response::parse_classification;
pub use routing::{route, route_labels};
pub use types::{
    ClassificationResult, Enrichment, LeadRow, LeadTable, PersonaType, RunSummary, Team,
    Timestamp, Urgency, COMMENT_COLUMN, DERIVED_COLUMNS, JOB_TITLE_COLUMN, SENTINEL,
};
