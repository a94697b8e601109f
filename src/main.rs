//! Command-line front-end for the submission client.
//!
//! Collects `field=value` pairs, delivers them to the configured endpoints
//! in order, and renders the outcome. A `diagnose` subcommand probes each
//! endpoint without sending any data.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use submit_relay::config::loader::load_config;
use submit_relay::diagnostics::probe::probe_endpoints;
use submit_relay::lifecycle::signals;
use submit_relay::{
    AttemptOutcome, ErrorCategory, Payload, Shutdown, SubmitError, Submitter,
};

#[derive(Parser)]
#[command(name = "submit-relay")]
#[command(about = "Deliver a form payload to the first reachable endpoint", long_about = None)]
struct Cli {
    /// TOML config file holding endpoints and timeouts.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Candidate endpoint, repeatable; overrides the config file list.
    #[arg(short, long = "endpoint")]
    endpoints: Vec<String>,

    /// Per-attempt timeout in milliseconds; overrides the config file.
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deliver field=value pairs to the first endpoint that accepts them
    Submit {
        /// Form fields as field=value pairs
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Check whether each configured endpoint is reachable
    Diagnose,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))
}

struct Settings {
    endpoints: Vec<String>,
    attempt_timeout: Duration,
    probe_timeout: Duration,
}

fn resolve_settings(cli: &Cli) -> Result<Settings, String> {
    let config = match &cli.config {
        Some(path) => Some(load_config(path).map_err(|e| e.to_string())?),
        None => None,
    };

    let endpoints = if cli.endpoints.is_empty() {
        config
            .as_ref()
            .map(|c| c.endpoints.clone())
            .unwrap_or_default()
    } else {
        cli.endpoints.clone()
    };
    if endpoints.is_empty() {
        return Err("no endpoints supplied; use --endpoint or a config file".to_string());
    }

    let attempt_timeout = match (cli.timeout_ms, config.as_ref()) {
        (Some(ms), _) => Duration::from_millis(ms),
        (None, Some(c)) => c.timeouts.attempt(),
        (None, None) => {
            return Err("no timeout supplied; use --timeout-ms or a config file".to_string())
        }
    };

    let probe_timeout = config
        .as_ref()
        .map(|c| c.timeouts.probe())
        .unwrap_or(attempt_timeout);

    Ok(Settings {
        endpoints,
        attempt_timeout,
        probe_timeout,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "submit_relay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Submit { fields } => run_submit(&settings, fields).await,
        Commands::Diagnose => run_diagnose(&settings).await,
    }
}

async fn run_submit(settings: &Settings, fields: Vec<(String, String)>) -> ExitCode {
    let payload: Payload = fields.into_iter().collect();

    let shutdown = Shutdown::new();
    signals::trap_interrupt(shutdown.clone());
    let mut cancel = shutdown.subscribe();

    let submitter = Submitter::new();
    match submitter
        .submit_with_shutdown(
            &payload,
            &settings.endpoints,
            settings.attempt_timeout,
            &mut cancel,
        )
        .await
    {
        Ok(delivery) => {
            let accepted_by = delivery
                .attempts
                .last()
                .map(|a| a.endpoint.as_str())
                .unwrap_or("unknown");
            if delivery.response.success {
                println!("Submission accepted by {accepted_by}");
            } else {
                println!(
                    "Submission delivered to {accepted_by}, but the server flagged it unsuccessful"
                );
            }
            if let Some(message) = &delivery.response.message {
                println!("Server says: {message}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            render_failure(&error);
            ExitCode::FAILURE
        }
    }
}

fn render_failure(error: &SubmitError) {
    match error {
        SubmitError::Exhausted {
            category,
            message,
            attempts,
        } => {
            let headline = match category {
                ErrorCategory::Unreachable => {
                    "Cannot connect to the server. Is the server running?"
                }
                ErrorCategory::Timeout => {
                    "Connection timed out. Server might be slow or unavailable."
                }
                ErrorCategory::ServerRejected => "The server rejected the submitted data.",
                ErrorCategory::BadResponse => {
                    "The server answered with a response that could not be read."
                }
            };
            eprintln!("Error: {headline}");
            eprintln!("Last error: {message}");
            eprintln!("Attempts:");
            for (i, attempt) in attempts.iter().enumerate() {
                match &attempt.outcome {
                    AttemptOutcome::Failed { category, message } => {
                        eprintln!("  {}. {}: {category}: {message}", i + 1, attempt.endpoint);
                    }
                    AttemptOutcome::Delivered => {
                        eprintln!("  {}. {}: delivered", i + 1, attempt.endpoint);
                    }
                }
            }
        }
        other => eprintln!("Error: {other}"),
    }
}

async fn run_diagnose(settings: &Settings) -> ExitCode {
    println!("Probing {} endpoint(s)...", settings.endpoints.len());
    let reports = probe_endpoints(&settings.endpoints, settings.probe_timeout).await;

    let mut reachable = 0usize;
    for report in &reports {
        match report.addr {
            Some(addr) => println!("  {} [{}]: {}", report.endpoint, addr, report.status),
            None => println!("  {}: {}", report.endpoint, report.status),
        }
        if report.is_reachable() {
            reachable += 1;
        }
    }

    println!("{reachable}/{} endpoints reachable", reports.len());
    if reachable == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
