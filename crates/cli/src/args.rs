//! Command-line arguments.
//!
//! Every option can also come from the environment (or a `.env` file loaded
//! before parsing), using the variable names shown in `--help`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pipeline::{EnrichmentSettings, LeadRouterError, ModelConfig};

#[derive(Debug, Parser)]
#[command(name = "leadrouter", version, about = "Classify and route inbound leads with a generative model")]
pub struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enrich a lead CSV with persona, urgency, team and summary.
    Process(ProcessArgs),
    /// Compare predicted labels against a ground-truth CSV.
    Evaluate(EvaluateArgs),
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input CSV with `job_title` and `comment` columns.
    #[arg(long, env = "INPUT_CSV")]
    pub input: PathBuf,

    /// Where to keep a copy of the quote-repaired input.
    #[arg(long, env = "CLEANED_CSV")]
    pub cleaned_csv: Option<PathBuf>,

    #[arg(long, env = "OUTPUT_CSV", default_value = "processed_output.csv")]
    pub output_csv: PathBuf,

    #[arg(long, env = "OUTPUT_JSON", default_value = "processed_output.json")]
    pub output_json: PathBuf,

    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "MODEL_NAME")]
    pub model_name: Option<String>,

    /// Override the model service base URL.
    #[arg(long, env = "MODEL_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Model attempts per row before writing the `fail` sentinel.
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    /// Seconds to wait after a failed attempt.
    #[arg(long, default_value_t = 2)]
    pub retry_backoff_secs: u64,

    /// Seconds to pause after each row.
    #[arg(long, default_value_t = 1)]
    pub row_delay_secs: u64,
}

impl ProcessArgs {
    /// Builds the model connection settings.
    ///
    /// # Errors
    ///
    /// [`LeadRouterError::Configuration`] when the API key or model name is
    /// missing.
    pub fn model_config(&self) -> Result<ModelConfig, LeadRouterError> {
        let config = ModelConfig::new(
            self.api_key.clone().unwrap_or_default(),
            self.model_name.clone().unwrap_or_default(),
        )?
        .with_request_timeout(Duration::from_secs(self.request_timeout_secs));

        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        })
    }

    pub fn settings(&self) -> EnrichmentSettings {
        EnrichmentSettings {
            max_attempts: self.max_attempts,
            retry_backoff: Duration::from_secs(self.retry_backoff_secs),
            row_delay: Duration::from_secs(self.row_delay_secs),
        }
    }
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Ground-truth CSV with `*_label` columns.
    #[arg(long)]
    pub truth: PathBuf,

    /// Predicted CSV produced by `process`.
    #[arg(long)]
    pub predicted: PathBuf,

    /// Column joining the two tables.
    #[arg(long, default_value = "email")]
    pub key: String,

    /// Where to write the joined evaluation rows.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_flags_build_configuration() {
        let cli = Cli::try_parse_from([
            "leadrouter",
            "process",
            "--input",
            "leads.csv",
            "--api-key",
            "k",
            "--model-name",
            "gemini-1.5-flash",
            "--base-url",
            "http://localhost:1234/",
            "--row-delay-secs",
            "0",
        ])
        .unwrap();

        let Command::Process(args) = cli.command else {
            panic!("expected process command");
        };
        let config = args.model_config().unwrap();
        assert_eq!(config.model_name.as_str(), "gemini-1.5-flash");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.request_timeout, Duration::from_secs(60));

        let settings = args.settings();
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.retry_backoff, Duration::from_secs(2));
        assert_eq!(settings.row_delay, Duration::ZERO);
    }

    #[test]
    fn evaluate_defaults_to_email_key() {
        let cli = Cli::try_parse_from([
            "leadrouter",
            "--log-format",
            "json",
            "evaluate",
            "--truth",
            "t.csv",
            "--predicted",
            "p.csv",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(args.key, "email");
        assert!(args.output.is_none());
    }
}
