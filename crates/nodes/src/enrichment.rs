//! Row-enrichment pipeline.
//!
//! Rows are processed strictly in order, one at a time: classify, route,
//! write the derived fields, report progress, then pause. A row whose
//! classification fails is written with the sentinel values and the run
//! carries on; only a cancellation request stops it early, and only between
//! rows. Rows that already carry derived fields are skipped without a model
//! call or a pause, so re-running a partially processed table only pays for
//! the rows still missing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pipeline::{
    route, Enrichment, EnrichmentSettings, LeadRouterError, LeadTable, LlmProvider, RunId,
    RunSummary, Timestamp,
};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::classifier::Classifier;

/// Drives the classifier and router over a [`LeadTable`].
#[derive(Clone)]
pub struct RowPipeline {
    classifier: Classifier,
    row_delay: Duration,
}

impl RowPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: EnrichmentSettings) -> Self {
        Self {
            classifier: Classifier::new(provider, settings),
            row_delay: settings.row_delay,
        }
    }

    /// Enriches every row of `table` in place.
    ///
    /// `on_progress(done, total)` is called once per row, after its fields are
    /// written and before the inter-row pause.
    pub async fn process<F>(
        &self,
        table: &mut LeadTable,
        on_progress: F,
    ) -> Result<RunSummary, LeadRouterError>
    where
        F: FnMut(usize, usize),
    {
        self.process_until_cancelled(table, on_progress, &AtomicBool::new(false))
            .await
    }

    /// Like [`RowPipeline::process`], but checks `cancel` before each row.
    ///
    /// # Errors
    ///
    /// [`LeadRouterError::Cancelled`] when `cancel` is set at a row boundary.
    /// Rows already processed keep their derived fields.
    pub async fn process_until_cancelled<F>(
        &self,
        table: &mut LeadTable,
        mut on_progress: F,
        cancel: &AtomicBool,
    ) -> Result<RunSummary, LeadRouterError>
    where
        F: FnMut(usize, usize),
    {
        let run_id = RunId::new_random();
        let started_at = Timestamp::now();
        let total = table.len();
        let mut failed_rows = 0;
        let mut skipped_rows = 0;

        let run_span = info_span!("enrichment_run", %run_id, total);
        info!(parent: &run_span, "Enrichment started");

        for (index, row) in table.rows_mut().iter_mut().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                info!(parent: &run_span, completed = index, total, "Enrichment cancelled");
                return Err(LeadRouterError::Cancelled {
                    completed: index,
                    total,
                });
            }

            let row_span = info_span!(parent: &run_span, "row", row = index + 1);
            if row.enrichment().is_some() {
                debug!(parent: &row_span, "Row already enriched; skipping");
                skipped_rows += 1;
                on_progress(index + 1, total);
                continue;
            }

            let result = self
                .classifier
                .classify(row.job_title(), row.comment())
                .instrument(row_span.clone())
                .await;
            if result.is_sentinel() {
                failed_rows += 1;
            }

            let assigned_team = route(&result.persona_type, &result.urgency);
            let written = row.enrich(Enrichment {
                persona_type: result.persona_type,
                urgency: result.urgency,
                assigned_team,
                summary: result.summary,
            });
            if written {
                info!(parent: &row_span, team = %assigned_team, "Row enriched");
            } else {
                warn!(parent: &row_span, "Derived fields already present; result discarded");
            }

            on_progress(index + 1, total);

            tokio::time::sleep(self.row_delay).await;
        }

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Timestamp::now(),
            rows: total,
            failed_rows,
            skipped_rows,
        };
        info!(parent: &run_span, failed_rows, skipped_rows, "Enrichment finished");
        Ok(summary)
    }
}
