//! Loading lead and label tables from CSV.

use std::fs;
use std::path::Path;

use pipeline::{ColumnName, LabelledRecord, LeadRouterError, LeadTable};
use tracing::{debug, info};

use crate::repair::repair_csv_text;
use crate::TableError;

/// Loads a lead table from a CSV file, repairing its quoting first.
///
/// When `cleaned_copy` is given, the repaired text is also written there.
///
/// # Errors
///
/// File access and CSV syntax errors, and [`TableError::Schema`] when the
/// `job_title` or `comment` column is missing.
pub fn load_leads(path: &Path, cleaned_copy: Option<&Path>) -> Result<LeadTable, TableError> {
    let raw = fs::read_to_string(path).map_err(|e| TableError::file(path, e))?;
    let repaired = repair_csv_text(&raw);
    if let Some(copy) = cleaned_copy {
        fs::write(copy, &repaired).map_err(|e| TableError::file(copy, e))?;
        debug!(path = %copy.display(), "Wrote repaired CSV");
    }

    let table = parse_leads(&repaired)?;
    info!(path = %path.display(), rows = table.len(), "Loaded lead table");
    Ok(table)
}

/// Builds a lead table from CSV text. The text is repaired before parsing.
pub fn read_leads(text: &str) -> Result<LeadTable, TableError> {
    parse_leads(&repair_csv_text(text))
}

fn parse_leads(repaired: &str) -> Result<LeadTable, TableError> {
    let (columns, records) = parse_csv(repaired, |h| h.trim().to_string())?;
    Ok(LeadTable::new(columns, records)?)
}

// ---------------------------------------------------------------------------
// Evaluation tables
// ---------------------------------------------------------------------------

/// Which side of an evaluation a label table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    /// Hand-labelled columns: `persona_type_label`, `urgency_label`,
    /// `assigned_team_label`.
    GroundTruth,
    /// Enrichment output columns: `persona_type`, `urgency`, `assigned_team`.
    Predicted,
}

impl LabelSource {
    fn columns(self) -> [&'static str; 3] {
        match self {
            Self::GroundTruth => ["persona_type_label", "urgency_label", "assigned_team_label"],
            Self::Predicted => ["persona_type", "urgency", "assigned_team"],
        }
    }
}

/// Loads the key and label columns of an evaluation table from a CSV file.
pub fn load_labels(
    path: &Path,
    key: &ColumnName,
    source: LabelSource,
) -> Result<Vec<LabelledRecord>, TableError> {
    let raw = fs::read_to_string(path).map_err(|e| TableError::file(path, e))?;
    let records = read_labels(&raw, key, source)?;
    info!(path = %path.display(), rows = records.len(), ?source, "Loaded label table");
    Ok(records)
}

/// Reads the key and label columns of an evaluation table from CSV text.
///
/// Header names are normalised (trimmed, quotes removed, lowercased) before
/// lookup; other columns are ignored.
pub fn read_labels(
    text: &str,
    key: &ColumnName,
    source: LabelSource,
) -> Result<Vec<LabelledRecord>, TableError> {
    let (columns, records) = parse_csv(&repair_csv_text(text), |h| {
        h.trim().replace('"', "").to_lowercase()
    })?;

    let wanted: Vec<&str> = std::iter::once(key.as_str())
        .chain(source.columns())
        .collect();
    let mut positions = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();
    for name in &wanted {
        match columns.iter().position(|c| c == name) {
            Some(i) => positions.push(i),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(LeadRouterError::MissingColumns { missing }.into());
    }

    let cell = |record: &[String], i: usize| record.get(positions[i]).cloned().unwrap_or_default();
    Ok(records
        .iter()
        .map(|record| LabelledRecord {
            key: cell(record, 0),
            persona_type: cell(record, 1),
            urgency: cell(record, 2),
            assigned_team: cell(record, 3),
        })
        .collect())
}

// ---------------------------------------------------------------------------

type Parsed = (Vec<String>, Vec<Vec<String>>);

fn parse_csv(text: &str, header_name: impl Fn(&str) -> String) -> Result<Parsed, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(header_name).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > columns.len() {
            return Err(TableError::TooManyFields {
                line: record.position().map_or(0, |p| p.line()),
                expected: columns.len(),
                found: record.len(),
            });
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok((columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leads_are_read_after_repair() {
        let table = read_leads("\"job_title,comment\"\n\"CTO,\"\"Down, now\"\"\"\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].job_title(), "CTO");
        assert_eq!(table.rows()[0].comment(), "Down, now");
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let table = read_leads("email , job_title , comment\na@x.io,Dev,hi\n").unwrap();
        assert_eq!(table.columns(), ["email", "job_title", "comment"]);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let err = read_leads("email,comment\na@x.io,hi\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::Schema(LeadRouterError::MissingColumns { ref missing }) if missing == &["job_title"]
        ));
    }

    #[test]
    fn overlong_record_is_rejected() {
        let err = read_leads("job_title,comment\nDev,hi,extra\n").unwrap_err();
        assert!(matches!(
            err,
            TableError::TooManyFields {
                line: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn label_headers_are_normalised() {
        let key = ColumnName::new("email").unwrap();
        let records = read_labels(
            "Email,Persona_Type_Label,URGENCY_LABEL, assigned_team_label ,notes\na@x.io,Other,Low,Nurture Campaign,n/a\n",
            &key,
            LabelSource::GroundTruth,
        )
        .unwrap();

        assert_eq!(
            records,
            vec![LabelledRecord {
                key: "a@x.io".to_string(),
                persona_type: "Other".to_string(),
                urgency: "Low".to_string(),
                assigned_team: "Nurture Campaign".to_string(),
            }]
        );
    }

    #[test]
    fn predicted_labels_require_output_columns() {
        let key = ColumnName::new("email").unwrap();
        let err = read_labels("email,persona_type\na,b\n", &key, LabelSource::Predicted).unwrap_err();
        match err {
            TableError::Schema(LeadRouterError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["urgency", "assigned_team"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
