//! CLI argument parsing
//!
//! Defines command-line interface using clap. With no subcommand the
//! tester runs every check, so a bare invocation behaves like `run`.

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::models::TestCase;

/// Smoke-test harness for the Video Generation API
#[derive(Parser, Debug)]
#[command(name = "videogen-api-tester")]
#[command(version)]
#[command(about = "Run smoke tests against a Video Generation API deployment")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    /// Resolve the command, defaulting to `run` with the top-level flags
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(self.run))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run API checks and write the results file
    Run(RunArgs),

    /// List available checks
    List,

    /// Show a previously written results file
    Results {
        /// Results file to read
        #[arg(default_value = "api_test_results.json")]
        file: String,

        /// Output format (table, json, summary)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Write a configuration file with the default settings
    Init {
        /// Destination (.yaml, .yml or .json)
        #[arg(default_value = "videogen-tester.yaml")]
        path: String,
    },
}

/// Arguments for the run command
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct RunArgs {
    /// Base URL of the API under test
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// API key sent as a bearer token
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Results file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Run only these checks (comma-separated keys, e.g. status,upload)
    #[arg(long)]
    pub only: Option<String>,

    /// Summary format (table, json, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl RunArgs {
    /// Checks to run, in the fixed execution order
    pub fn selected_tests(&self) -> Result<Vec<TestCase>, String> {
        let Some(only) = &self.only else {
            return Ok(TestCase::all());
        };

        let mut requested = Vec::new();
        for key in only.split(',').filter(|k| !k.trim().is_empty()) {
            let case = TestCase::from_key(key).ok_or_else(|| format!("Unknown test: {key}"))?;
            requested.push(case);
        }

        if requested.is_empty() {
            return Err("No tests selected".to_string());
        }

        Ok(TestCase::all()
            .into_iter()
            .filter(|case| requested.contains(case))
            .collect())
    }
}
