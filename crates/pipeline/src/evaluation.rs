//! Comparison of predicted labels against ground truth.
//!
//! Both sides are joined on a shared key column (typically `email`). Label
//! values are trimmed and lowercased before comparison, so `"High "` and
//! `"high"` agree.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::LeadRouterError;

/// The three labels of one lead, keyed by its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledRecord {
    pub key: String,
    pub persona_type: String,
    pub urgency: String,
    pub assigned_team: String,
}

/// One joined pair of ground truth and prediction, labels normalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub key: String,
    pub persona_type_true: String,
    pub urgency_true: String,
    pub assigned_team_true: String,
    pub persona_type_pred: String,
    pub urgency_pred: String,
    pub assigned_team_pred: String,
}

impl EvaluationRow {
    /// Column names for export, with `key_column` first.
    pub fn header(key_column: &str) -> [&str; 7] {
        [
            key_column,
            "persona_type_true",
            "urgency_true",
            "assigned_team_true",
            "persona_type_pred",
            "urgency_pred",
            "assigned_team_pred",
        ]
    }

    /// Values in [`EvaluationRow::header`] order.
    pub fn values(&self) -> [&str; 7] {
        [
            &self.key,
            &self.persona_type_true,
            &self.urgency_true,
            &self.assigned_team_true,
            &self.persona_type_pred,
            &self.urgency_pred,
            &self.assigned_team_pred,
        ]
    }

    fn team_matches(&self) -> bool {
        self.assigned_team_true == self.assigned_team_pred
    }
}

/// Precision of one assigned-team label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrecision {
    pub label: String,
    /// `correct predictions of label / predictions of label`; `0.0` when the
    /// label was never predicted.
    pub precision: f64,
}

/// Accuracy and precision over the joined rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub key_column: String,
    pub rows: Vec<EvaluationRow>,
    pub persona_accuracy: f64,
    pub urgency_accuracy: f64,
    pub team_accuracy: f64,
    /// One entry per team label seen on either side, sorted by label.
    pub team_precision: Vec<LabelPrecision>,
}

impl EvaluationReport {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn correctly_routed(&self) -> usize {
        self.rows.iter().filter(|r| r.team_matches()).count()
    }

    pub fn misrouted(&self) -> usize {
        self.total() - self.correctly_routed()
    }
}

/// Joins `truth` and `predicted` on their keys and computes the report.
///
/// Rows are joined in ground-truth order; a key appearing several times on
/// either side yields every pairing.
///
/// # Errors
///
/// [`LeadRouterError::NoMatchingKeys`] when the join is empty.
pub fn evaluate(
    key_column: &str,
    truth: &[LabelledRecord],
    predicted: &[LabelledRecord],
) -> Result<EvaluationReport, LeadRouterError> {
    let mut by_key: HashMap<&str, Vec<&LabelledRecord>> = HashMap::new();
    for record in predicted {
        by_key.entry(record.key.as_str()).or_default().push(record);
    }

    let index = &by_key;
    let rows: Vec<EvaluationRow> = truth
        .iter()
        .flat_map(move |t| {
            index
                .get(t.key.as_str())
                .into_iter()
                .flatten()
                .map(move |p| EvaluationRow {
                    key: t.key.clone(),
                    persona_type_true: normalise(&t.persona_type),
                    urgency_true: normalise(&t.urgency),
                    assigned_team_true: normalise(&t.assigned_team),
                    persona_type_pred: normalise(&p.persona_type),
                    urgency_pred: normalise(&p.urgency),
                    assigned_team_pred: normalise(&p.assigned_team),
                })
        })
        .collect();

    if rows.is_empty() {
        return Err(LeadRouterError::NoMatchingKeys {
            key: key_column.to_string(),
        });
    }

    let persona_accuracy = accuracy(&rows, |r| r.persona_type_true == r.persona_type_pred);
    let urgency_accuracy = accuracy(&rows, |r| r.urgency_true == r.urgency_pred);
    let team_accuracy = accuracy(&rows, EvaluationRow::team_matches);
    let team_precision = team_precision(&rows);

    Ok(EvaluationReport {
        key_column: key_column.to_string(),
        rows,
        persona_accuracy,
        urgency_accuracy,
        team_accuracy,
        team_precision,
    })
}

fn normalise(label: &str) -> String {
    label.trim().to_lowercase()
}

fn accuracy(rows: &[EvaluationRow], matches: impl Fn(&EvaluationRow) -> bool) -> f64 {
    let hits = rows.iter().filter(|&r| matches(r)).count();
    hits as f64 / rows.len() as f64
}

fn team_precision(rows: &[EvaluationRow]) -> Vec<LabelPrecision> {
    let labels: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| [r.assigned_team_true.as_str(), r.assigned_team_pred.as_str()])
        .collect();

    labels
        .into_iter()
        .map(|label| {
            let predicted = rows.iter().filter(|r| r.assigned_team_pred == label);
            let (hits, total) = predicted.fold((0usize, 0usize), |(hits, total), r| {
                (hits + usize::from(r.assigned_team_true == label), total + 1)
            });
            let precision = if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            };
            LabelPrecision {
                label: label.to_string(),
                precision,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, persona: &str, urgency: &str, team: &str) -> LabelledRecord {
        LabelledRecord {
            key: key.to_string(),
            persona_type: persona.to_string(),
            urgency: urgency.to_string(),
            assigned_team: team.to_string(),
        }
    }

    #[test]
    fn accuracy_compares_normalised_labels() {
        let truth = vec![
            record("a@x.io", "Decision Maker", "High", "Strategic sales"),
            record("b@x.io", "Practitioner", "Low", "Nurture Campaign"),
        ];
        let predicted = vec![
            record("b@x.io", "practitioner ", "medium", "Sales development"),
            record("a@x.io", "DECISION MAKER", "high", "strategic sales"),
        ];

        let report = evaluate("email", &truth, &predicted).unwrap();

        assert_eq!(report.total(), 2);
        assert_eq!(report.persona_accuracy, 1.0);
        assert_eq!(report.urgency_accuracy, 0.5);
        assert_eq!(report.team_accuracy, 0.5);
        assert_eq!(report.correctly_routed(), 1);
        assert_eq!(report.misrouted(), 1);
        assert_eq!(report.rows[0].key, "a@x.io");
        assert_eq!(report.rows[0].persona_type_pred, "decision maker");
    }

    #[test]
    fn unmatched_keys_are_dropped_from_the_join() {
        let truth = vec![
            record("a@x.io", "Other", "Low", "Nurture Campaign"),
            record("z@x.io", "Other", "Low", "Nurture Campaign"),
        ];
        let predicted = vec![record("a@x.io", "Other", "Low", "Nurture Campaign")];

        let report = evaluate("email", &truth, &predicted).unwrap();
        assert_eq!(report.total(), 1);
        assert_eq!(report.team_accuracy, 1.0);
    }

    #[test]
    fn empty_join_is_an_error() {
        let truth = vec![record("a@x.io", "Other", "Low", "Nurture Campaign")];
        let predicted = vec![record("b@x.io", "Other", "Low", "Nurture Campaign")];

        assert_eq!(
            evaluate("email", &truth, &predicted).unwrap_err(),
            LeadRouterError::NoMatchingKeys {
                key: "email".to_string()
            }
        );
    }

    #[test]
    fn precision_covers_labels_from_both_sides() {
        let truth = vec![
            record("1", "", "", "Strategic sales"),
            record("2", "", "", "Strategic sales"),
            record("3", "", "", "NA"),
            record("4", "", "", "Enterprise sales"),
        ];
        let predicted = vec![
            record("1", "", "", "Strategic sales"),
            record("2", "", "", "NA"),
            record("3", "", "", "NA"),
            record("4", "", "", "Strategic sales"),
        ];

        let report = evaluate("email", &truth, &predicted).unwrap();
        let precision: Vec<(&str, f64)> = report
            .team_precision
            .iter()
            .map(|p| (p.label.as_str(), p.precision))
            .collect();

        assert_eq!(
            precision,
            vec![
                ("enterprise sales", 0.0),
                ("na", 0.5),
                ("strategic sales", 0.5),
            ]
        );
    }

    #[test]
    fn duplicate_keys_yield_every_pairing() {
        let truth = vec![record("a", "Other", "Low", "Nurture Campaign")];
        let predicted = vec![
            record("a", "Other", "Low", "Nurture Campaign"),
            record("a", "Other", "High", "NA"),
        ];

        let report = evaluate("email", &truth, &predicted).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.urgency_accuracy, 0.5);
    }
}
