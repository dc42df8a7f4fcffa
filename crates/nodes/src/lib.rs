//! LeadRouter orchestration: the classification prompt, the retrying
//! classifier, and the row-enrichment pipeline.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** This crate sequences calls between business logic
//! in the [`pipeline`] crate (response parsing, routing) and the
//! [`pipeline::LlmProvider`] port. It contains no domain rules of its own.
//!
//! ## Pacing
//!
//! Execution is sequential by construction: one row at a time, one request in
//! flight. Both pauses (the back-off after a failed attempt and the delay
//! after each row) are awaited inline in the task processing the row.

pub mod classifier;
pub mod enrichment;
pub mod prompt;

pub use classifier::{AttemptError, Classifier};
pub use enrichment::RowPipeline;
pub use prompt::classification_prompt;
