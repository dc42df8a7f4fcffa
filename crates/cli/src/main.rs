//! LeadRouter CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration**: read `.env` (if present), then parse flags with
//!    environment fallbacks into explicit config values.
//! 2. **Wire observability**: configure `tracing-subscriber` with an
//!    `EnvFilter` and a text or JSON layer on stderr.
//! 3. **Construct infrastructure**: create the [`llm::GeminiProvider`] and
//!    inject it into [`nodes::RowPipeline`].
//! 4. **Run a command**: `process` (load, enrich, export) or `evaluate`
//!    (compare predictions with ground truth).

mod args;
mod interrupt;
mod observability;
mod report;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use args::{Cli, Command, EvaluateArgs, ProcessArgs};
use clap::Parser;
use llm::GeminiProvider;
use nodes::RowPipeline;
use pipeline::{evaluate, ColumnName};
use table::LabelSource;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    observability::init(cli.log_format);

    match cli.command {
        Command::Process(args) => process(args).await,
        Command::Evaluate(args) => evaluate_predictions(args),
    }
}

async fn process(args: ProcessArgs) -> anyhow::Result<()> {
    let model_config = args.model_config()?;
    let settings = args.settings();

    let mut leads = table::load_leads(&args.input, args.cleaned_csv.as_deref())
        .with_context(|| format!("loading leads from '{}'", args.input.display()))?;
    println!("CSV cleaned successfully: {} rows to process.", leads.len());

    let provider = GeminiProvider::new(&model_config).context("building model client")?;
    let pipeline = RowPipeline::new(Arc::new(provider), settings);

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if interrupt::watch(tokio::signal::ctrl_c, flag).await == interrupt::Interrupt::Forced {
            std::process::exit(interrupt::FORCED_EXIT_CODE);
        }
    });

    let summary = pipeline
        .process_until_cancelled(
            &mut leads,
            |done, total| eprintln!("Processing row {done}/{total} ..."),
            &cancel,
        )
        .await?;
    info!(
        run_id = %summary.run_id,
        rows = summary.rows,
        failed_rows = summary.failed_rows,
        skipped_rows = summary.skipped_rows,
        "Run complete"
    );

    table::save_csv(&leads, &args.output_csv)?;
    table::save_json(&leads, &args.output_json)?;

    println!(
        "Processing complete. Saved to {} and {}",
        args.output_csv.display(),
        args.output_json.display()
    );
    if summary.failed_rows > 0 {
        println!(
            "{} of {} rows could not be classified and were marked 'fail'.",
            summary.failed_rows, summary.rows
        );
    }
    Ok(())
}

fn evaluate_predictions(args: EvaluateArgs) -> anyhow::Result<()> {
    let key = ColumnName::new(args.key.trim().to_lowercase())
        .context("the key column name must not be empty")?;

    let truth = table::load_labels(&args.truth, &key, LabelSource::GroundTruth)
        .with_context(|| format!("loading ground truth from '{}'", args.truth.display()))?;
    let predicted = table::load_labels(&args.predicted, &key, LabelSource::Predicted)
        .with_context(|| format!("loading predictions from '{}'", args.predicted.display()))?;

    let report = evaluate(key.as_str(), &truth, &predicted)?;
    print!("{}", report::render(&report));

    if let Some(path) = &args.output {
        table::save_evaluation_csv(&report, path)?;
        println!("\nEvaluation rows saved to {}", path.display());
    }
    Ok(())
}
