//! Repair of CSV exports with broken quoting.
//!
//! Some spreadsheet exports wrap every whole line in quotes and double every
//! inner quote (`"job_title,comment"`, `"CTO,""urgent"""`). Undoing that line
//! by line yields ordinary CSV.

/// Returns `raw` with the line-level quoting undone.
///
/// A leading UTF-8 byte-order mark is dropped. Each line is trimmed and blank
/// lines are removed. A line is unwrapped only when the whole of it parses as
/// one quoted CSV field; its decoded content (with `""` collapsed to `"`)
/// replaces it. Every other line, including ordinary CSV whose first and last
/// cells happen to be quoted, is kept byte for byte.
///
/// Repair works line by line, so quoted fields spanning several lines are not
/// supported.
pub fn repair_csv_text(raw: &str) -> String {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut repaired = unwrap_whole_line(line).unwrap_or_else(|| line.to_string());
            repaired.push('\n');
            repaired
        })
        .collect()
}

/// Decodes `line` if it is exactly one quoted field.
fn unwrap_whole_line(line: &str) -> Option<String> {
    if line.len() < 2 || !line.starts_with('"') || !line.ends_with('"') {
        return None;
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut records = reader.records();
    let record = records.next()?.ok()?;
    if record.len() != 1 || records.next().is_some() {
        return None;
    }
    record.get(0).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_line_quotes_are_removed() {
        let raw = "\"job_title,comment\"\n\"CTO,\"\"Portal is down, fix ASAP\"\"\"\n";
        assert_eq!(
            repair_csv_text(raw),
            "job_title,comment\nCTO,\"Portal is down, fix ASAP\"\n"
        );
    }

    #[test]
    fn ordinary_csv_passes_through() {
        let raw = "job_title,comment\nEngineer,\"Needs help, soon\"\n";
        assert_eq!(repair_csv_text(raw), raw);
    }

    #[test]
    fn bom_blank_lines_and_crlf_are_dropped() {
        let raw = "\u{feff}job_title,comment\r\n\r\nIntern,hello\r\n   \r\n";
        assert_eq!(repair_csv_text(raw), "job_title,comment\nIntern,hello\n");
    }

    #[test]
    fn lone_quote_line_is_not_unwrapped() {
        assert_eq!(repair_csv_text("\"\n"), "\"\n");
    }

    #[test]
    fn quoted_first_and_last_cells_are_kept() {
        let raw = "\"a@x.io\",CTO,\"Portal is down, fix ASAP\"\n";
        assert_eq!(repair_csv_text(raw), raw);
    }

    #[test]
    fn escaped_quotes_inside_a_cell_survive() {
        let raw = "email,summary\na@x.io,\"Said \"\"urgent\"\" twice\"\n";
        assert_eq!(repair_csv_text(raw), raw);
    }

    #[test]
    fn two_quoted_cells_are_not_merged() {
        let raw = "\"Smith, J\",\"Jones, K\"\n";
        assert_eq!(repair_csv_text(raw), raw);
    }
}
