//! LeadRouter tabular I/O.
//!
//! Reads lead tables (with the quote repair some spreadsheet exports need),
//! reads ground-truth and prediction tables for evaluation, and writes
//! enriched tables as CSV or JSON.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** File access and CSV/JSON formats live here; the
//! [`pipeline`] crate sees only [`pipeline::LeadTable`] and
//! [`pipeline::LabelledRecord`]. Every value is kept as a string, so nothing
//! is coerced on the way in or out.

pub mod error;
pub mod load;
pub mod repair;
pub mod write;

pub use error::TableError;
pub use load::{load_labels, load_leads, read_labels, read_leads, LabelSource};
pub use repair::repair_csv_text;
pub use write::{
    save_csv, save_evaluation_csv, save_json, write_csv, write_evaluation_csv, write_json,
};
