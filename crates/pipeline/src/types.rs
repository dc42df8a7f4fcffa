//! Shared value types for the LeadRouter domain.
//!
//! Classification labels are closed enums with an escape hatch for whatever
//! else the model might say; the table types carry the input cells of each
//! lead plus the four derived columns written by the enrichment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LeadRouterError, RunId};

/// Literal written in place of every derived field when classification could
/// not be obtained after all retries.
pub const SENTINEL: &str = "fail";

/// Input column holding the lead's job title.
pub const JOB_TITLE_COLUMN: &str = "job_title";

/// Input column holding the lead's free-text comment.
pub const COMMENT_COLUMN: &str = "comment";

/// Derived output columns, in the order they are written and exported.
pub const DERIVED_COLUMNS: [&str; 4] = ["persona_type", "urgency", "assigned_team", "summary"];

// ---------------------------------------------------------------------------
// Classification labels
// ---------------------------------------------------------------------------

/// Persona of the lead, derived from the job title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PersonaType {
    /// Authority over budgets, strategy or teams.
    DecisionMaker,
    /// Executes tasks, processes or technical work.
    Practitioner,
    /// Students, researchers, interns and anything that fits neither.
    Other,
    /// Classification could not be obtained.
    Fail,
    /// Any other label the model produced, kept verbatim.
    Unrecognized(String),
}

impl PersonaType {
    /// Interprets a label case-insensitively. Unknown labels are preserved.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "decision maker" => Self::DecisionMaker,
            "practitioner" => Self::Practitioner,
            "other" => Self::Other,
            SENTINEL => Self::Fail,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    /// Returns the label written to output tables.
    pub fn as_label(&self) -> &str {
        match self {
            Self::DecisionMaker => "Decision Maker",
            Self::Practitioner => "Practitioner",
            Self::Other => "Other",
            Self::Fail => SENTINEL,
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for PersonaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

// ---------------------------------------------------------------------------

/// Time-sensitivity of the lead's comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Urgency {
    /// Immediate attention, critical impact.
    High,
    /// Important but not urgent.
    Medium,
    /// Routine or informational.
    Low,
    /// Classification could not be obtained.
    Fail,
    /// Any other label the model produced, kept verbatim.
    Unrecognized(String),
}

impl Urgency {
    /// Interprets a label case-insensitively. Unknown labels are preserved.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            SENTINEL => Self::Fail,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    /// Returns the label written to output tables.
    pub fn as_label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Fail => SENTINEL,
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

// ---------------------------------------------------------------------------

/// Team a lead is routed to. See [`crate::routing::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Team {
    StrategicSales,
    EnterpriseSales,
    SalesDevelopment,
    NurtureCampaign,
    /// No rule matched; a data value, not an error.
    NotAssigned,
}

impl Team {
    /// Returns the team name exactly as it appears in output tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrategicSales => "Strategic sales",
            Self::EnterpriseSales => "Enterprise sales",
            Self::SalesDevelopment => "Sales development",
            Self::NurtureCampaign => "Nurture Campaign",
            Self::NotAssigned => "NA",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// Outcome of one classify-and-summarise request.
///
/// Produced per row by the classifier and consumed immediately by the
/// enrichment pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub persona_type: PersonaType,
    pub urgency: Urgency,
    pub summary: String,
}

impl ClassificationResult {
    /// The recovered-failure triple: every field set to [`SENTINEL`].
    pub fn sentinel() -> Self {
        Self {
            persona_type: PersonaType::Fail,
            urgency: Urgency::Fail,
            summary: SENTINEL.to_string(),
        }
    }

    /// Returns `true` if this is the recovered-failure triple.
    pub fn is_sentinel(&self) -> bool {
        *self == Self::sentinel()
    }
}

// ---------------------------------------------------------------------------
// Lead table
// ---------------------------------------------------------------------------

/// The four derived fields of an enriched row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub persona_type: PersonaType,
    pub urgency: Urgency,
    pub assigned_team: Team,
    pub summary: String,
}

impl Enrichment {
    /// Returns the derived values in [`DERIVED_COLUMNS`] order.
    pub fn values(&self) -> [&str; 4] {
        [
            self.persona_type.as_label(),
            self.urgency.as_label(),
            self.assigned_team.as_str(),
            &self.summary,
        ]
    }
}

/// One lead: its input cells and, once processed, its derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    cells: Vec<String>,
    job_title_col: usize,
    comment_col: usize,
    enrichment: Option<Enrichment>,
}

impl LeadRow {
    /// Returns the input cells, aligned with [`LeadTable::columns`].
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn job_title(&self) -> &str {
        &self.cells[self.job_title_col]
    }

    pub fn comment(&self) -> &str {
        &self.cells[self.comment_col]
    }

    pub fn enrichment(&self) -> Option<&Enrichment> {
        self.enrichment.as_ref()
    }

    /// Writes the derived fields.
    ///
    /// Derived fields are written at most once; returns `false` and leaves
    /// the row untouched if it was already enriched.
    #[must_use = "a `false` result means the enrichment was discarded"]
    pub fn enrich(&mut self, enrichment: Enrichment) -> bool {
        if self.enrichment.is_some() {
            return false;
        }
        self.enrichment = Some(enrichment);
        true
    }

    /// Returns the derived values in [`DERIVED_COLUMNS`] order; empty strings
    /// when the row has not been enriched.
    pub fn derived_values(&self) -> [&str; 4] {
        match &self.enrichment {
            Some(e) => e.values(),
            None => ["", "", "", ""],
        }
    }

    /// Returns the full output record: input cells then derived values.
    pub fn record(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(String::as_str)
            .chain(self.derived_values())
            .collect()
    }
}

/// An ordered table of leads with named input columns.
///
/// Construction validates that the `job_title` and `comment` columns exist,
/// so every row is guaranteed to expose both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTable {
    columns: Vec<String>,
    rows: Vec<LeadRow>,
}

impl LeadTable {
    /// Builds a table from a header row and its records.
    ///
    /// Input columns named like a derived column are dropped, since the
    /// enrichment pipeline replaces them. Short records are padded with empty
    /// cells; extra trailing cells are discarded.
    ///
    /// # Errors
    ///
    /// [`LeadRouterError::MissingColumns`] when `job_title` or `comment` is
    /// absent from `columns`.
    pub fn new(columns: Vec<String>, records: Vec<Vec<String>>) -> Result<Self, LeadRouterError> {
        let missing: Vec<String> = [JOB_TITLE_COLUMN, COMMENT_COLUMN]
            .into_iter()
            .filter(|required| !columns.iter().any(|c| c == required))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LeadRouterError::MissingColumns { missing });
        }

        let kept: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !DERIVED_COLUMNS.contains(&name.as_str()))
            .map(|(i, _)| i)
            .collect();
        let columns: Vec<String> = kept.iter().map(|&i| columns[i].clone()).collect();

        let position = |name: &str| columns.iter().position(|c| c == name).unwrap_or_default();
        let job_title_col = position(JOB_TITLE_COLUMN);
        let comment_col = position(COMMENT_COLUMN);

        let rows = records
            .into_iter()
            .map(|record| {
                let cells = kept
                    .iter()
                    .map(|&i| record.get(i).cloned().unwrap_or_default())
                    .collect();
                LeadRow {
                    cells,
                    job_title_col,
                    comment_col,
                    enrichment: None,
                }
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Returns the input column names, in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the output header: input columns then [`DERIVED_COLUMNS`].
    pub fn header(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS)
            .collect()
    }

    pub fn rows(&self) -> &[LeadRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [LeadRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Bookkeeping for one completed enrichment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    /// Rows in the table.
    pub rows: usize,
    /// Rows whose classification fell back to the sentinel values.
    pub failed_rows: usize,
    /// Rows left untouched because they were already enriched.
    pub skipped_rows: usize,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
