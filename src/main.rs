//! Video Generation API smoke tester
//!
//! A CLI tool that runs a fixed battery of HTTP checks against one
//! deployment of the Video Generation API and writes a JSON report.
//!
//! ## Checks
//!
//! - Status, Upload, Generate Images, Generate Video
//! - Authentication (401 without credentials)
//! - Rate Limiting (counts 429 responses; always passes)
//!
//! ## Usage
//!
//! ```bash
//! # Run every check against the local deployment
//! videogen-api-tester
//!
//! # Point at another deployment
//! videogen-api-tester --base-url https://api.example.com/api/public --api-key sk-...
//!
//! # Run a subset and fail the process when a check fails
//! videogen-api-tester run --only status,authentication --strict
//!
//! # List available checks
//! videogen-api-tester list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::debug;

mod cli;
mod config;
mod http;
mod models;
mod output;
mod results;
mod tester;
mod utils;

use cli::{Args, Command, RunArgs};
use config::{EnvConfig, TesterConfig};
use models::TestCase;
use output::{OutputFormat, ResultFormatter};
use tester::ApiTester;
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    // Initialize logging
    init_logger(LogLevel::resolve(args.verbose, env.log.as_deref()));

    match args.into_command() {
        Command::Run(run_args) => {
            let all_passed = run_tests(run_args.clone(), &env).await?;
            if run_args.strict && !all_passed {
                std::process::exit(1);
            }
        }
        Command::List => {
            list_tests();
        }
        Command::Results { file, format } => {
            show_results(&file, &format)?;
        }
        Command::Init { path } => {
            TesterConfig::default().save(&path)?;
            println!("Wrote default configuration to {path}");
        }
    }

    Ok(())
}

/// Resolve configuration: defaults, then file, then environment, then flags
fn resolve_config(args: &RunArgs, env: &EnvConfig) -> Result<TesterConfig> {
    if env.has_any() {
        debug!("Applying {}_* environment overrides", config::ENV_PREFIX);
    }

    let config_file = args.config.as_ref().or(env.config_file.as_ref());

    let mut config = match config_file {
        Some(path) => {
            debug!("Loading configuration from {}", path);
            TesterConfig::load(path)?
        }
        None => TesterConfig::default(),
    };

    config = config.apply_env(env);

    if let Some(url) = &args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(key) = &args.api_key {
        config = config.with_api_key(key);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(output) = &args.output {
        config = config.with_output(output);
    }

    Ok(config)
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(format).ok_or_else(|| anyhow::anyhow!("Unknown output format: {format}"))
}

async fn run_tests(args: RunArgs, env: &EnvConfig) -> Result<bool> {
    let config = resolve_config(&args, env)?;
    let cases = args.selected_tests().map_err(anyhow::Error::msg)?;

    let mut formatter = ResultFormatter::new(parse_format(&args.format)?);
    if args.no_color {
        formatter = formatter.no_color();
    }

    debug!(
        "Timeout {}s, results file {}",
        config.timeout_secs, config.output
    );

    let output_path = config.output_path();
    let tester = ApiTester::new(config)
        .context("Failed to create API tester")?
        .with_formatter(formatter);

    let report = if args.only.is_some() {
        tester.run_selected(&cases).await
    } else {
        tester.run_all_tests().await
    };

    results::save_report(&report, &output_path)?;
    println!("\n📄 Results saved to {}", output_path.display());

    Ok(report.is_all_passed())
}

fn show_results(file: &str, format: &str) -> Result<()> {
    let formatter = ResultFormatter::new(parse_format(format)?);
    let report = results::load_report(Path::new(file))?;

    println!("Results from {} ({})", report.base_url, report.timestamp);
    println!("{}", formatter.format_report(&report));
    Ok(())
}

fn list_tests() {
    println!("\nVideo Generation API Checks ({} total)\n", TestCase::all().len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for case in TestCase::all() {
        println!(
            "  {:16} {:18} [{}]",
            case.key(),
            case.name(),
            case.endpoint()
        );
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
