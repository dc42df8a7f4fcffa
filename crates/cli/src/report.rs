//! Human-readable evaluation report.

use std::fmt::Write;

use pipeline::EvaluationReport;

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Renders accuracies, per-team precision and the routing summary.
pub fn render(report: &EvaluationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Persona Accuracy:       {}", percent(report.persona_accuracy));
    let _ = writeln!(out, "Urgency Accuracy:       {}", percent(report.urgency_accuracy));
    let _ = writeln!(out, "Assigned Team Accuracy: {}", percent(report.team_accuracy));

    let _ = writeln!(out, "\nPrecision by Assigned Team");
    let width = report
        .team_precision
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(0);
    for p in &report.team_precision {
        let _ = writeln!(out, "  {:<width$}  {}", p.label, percent(p.precision));
    }

    let total = report.total();
    let correct = report.correctly_routed();
    let _ = writeln!(out, "\nRouting Summary");
    let _ = writeln!(
        out,
        "  Correctly Routed: {correct} of {total} ({})",
        percent(correct as f64 / total as f64)
    );
    let _ = writeln!(out, "  Misrouted: {}", report.misrouted());
    out
}
