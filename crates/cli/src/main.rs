//! `rule-api` -- command-line front end for the rule backend.
//!
//! Each subcommand performs one backend call and prints the JSON response
//! on stdout. JSON input is read from `--file` or, when omitted, stdin.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                 | Description                     |
//! |-------------------------|----------|-------------------------|---------------------------------|
//! | `RULE_API_URL`          | no       | `http://localhost:8000` | Backend base URL                |
//! | `RULE_API_TIMEOUT_SECS` | no       | --                      | Per-request timeout             |
//! | `RULE_API_DEBUG`        | no       | `false`                 | Log every request and response  |
//! | `RUST_LOG`              | no       | `rule_api=info`         | Log filter                      |

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rule_api_client::{ClientConfig, RuleApiClient};
use rule_api_core::report::RuleReportRequest;
use rule_api_core::rule::RuleGenerationRequest;
use rule_api_core::validation::RuleValidationRequest;

#[derive(Debug, Parser)]
#[command(name = "rule-api")]
#[command(about = "Generate, validate and report on rules via the rule backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL (overrides RULE_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a rule from a natural-language description
    Generate {
        description: String,

        /// Additional context for the generator
        #[arg(long)]
        context: Option<String>,
    },

    /// Validate a rule: `{"rule": ...}`, `{"rule_json": ...}` or a bare rule object
    Validate {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Validate raw rule JSON, always sent as `{"rule_json": <input>}`
    ValidateJson {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate a report for raw rule JSON
    Report {
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Ask for a plain-text report instead of markdown
        #[arg(long)]
        no_markdown: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rule_api=info,rule_api_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    tracing::debug!(base_url = %config.base_url, "Using rule backend");
    let client = RuleApiClient::from_config(&config)?;

    match cli.command {
        Command::Generate {
            description,
            context,
        } => {
            let mut request = RuleGenerationRequest::new(description);
            request.additional_context = context;
            print_json(&client.generate_rule(&request).await?)
        }
        Command::Validate { file } => {
            let request = RuleValidationRequest::from_json_str(&read_input(file.as_ref())?)?;
            tracing::info!(endpoint = request.endpoint().path(), "Validating rule");
            print_json(&client.validate_rule(request).await?)
        }
        Command::ValidateJson { file } => {
            let rule_json: serde_json::Value = serde_json::from_str(&read_input(file.as_ref())?)
                .context("Input is not valid JSON")?;
            print_json(&client.validate_rule_json(rule_json).await?)
        }
        Command::Report { file, no_markdown } => {
            let rule_json: serde_json::Value = serde_json::from_str(&read_input(file.as_ref())?)
                .context("Input is not valid JSON")?;
            let request = RuleReportRequest::from_value(rule_json)?.with_markdown(!no_markdown);
            print_json(&client.generate_rule_report(&request).await?)
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
