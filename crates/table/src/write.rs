//! Export of enriched tables and evaluation results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pipeline::{EvaluationReport, EvaluationRow, LeadTable};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::TableError;

/// Writes `table` as CSV: input columns then derived columns, no index.
pub fn write_csv<W: Write>(table: &LeadTable, writer: W) -> Result<(), TableError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.header())?;
    for row in table.rows() {
        csv.write_record(row.record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `table` as a pretty-printed JSON array of objects, one per row,
/// keys in column order, indented by four spaces.
pub fn write_json<W: Write>(table: &LeadTable, writer: W) -> Result<(), TableError> {
    let header = table.header();
    let records: Vec<Record<'_>> = table
        .rows()
        .iter()
        .map(|row| Record {
            keys: &header,
            values: row.record(),
        })
        .collect();

    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    serializer.into_inner().flush()?;
    Ok(())
}

/// Writes the joined evaluation rows as CSV.
pub fn write_evaluation_csv<W: Write>(
    report: &EvaluationReport,
    writer: W,
) -> Result<(), TableError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EvaluationRow::header(&report.key_column))?;
    for row in &report.rows {
        csv.write_record(row.values())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn save_csv(table: &LeadTable, path: &Path) -> Result<(), TableError> {
    write_csv(table, create(path)?)?;
    info!(path = %path.display(), rows = table.len(), "Wrote CSV output");
    Ok(())
}

pub fn save_json(table: &LeadTable, path: &Path) -> Result<(), TableError> {
    write_json(table, create(path)?)?;
    info!(path = %path.display(), rows = table.len(), "Wrote JSON output");
    Ok(())
}

pub fn save_evaluation_csv(report: &EvaluationReport, path: &Path) -> Result<(), TableError> {
    write_evaluation_csv(report, create(path)?)?;
    info!(path = %path.display(), rows = report.total(), "Wrote evaluation CSV");
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, TableError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| TableError::file(path, e))
}

/// One JSON object with keys in a fixed order.
struct Record<'a> {
    keys: &'a [&'a str],
    values: Vec<&'a str>,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for (key, value) in self.keys.iter().zip(&self.values) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
