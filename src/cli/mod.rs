//! Command-line interface: argument parsing and command dispatch.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::entities::drug::{self, SearchOutcome, SearchQuery};
use crate::render;
use crate::sources::HttpConfig;
use crate::sources::openfda::{OpenFdaClient, OpenFdaConfig};

pub mod health;
pub mod interactive;

#[derive(Parser, Debug)]
#[command(
    name = "dawa",
    version,
    about = "Look up drug label information (indications, side effects, dosage) from openFDA"
)]
pub struct Cli {
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Connect and read timeout for openFDA requests, in seconds
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prompt for drug names on stdin and show one result per line entered
    Interactive,

    #[command(flatten)]
    OneShot(OneShotCommand),
}

/// Commands that produce a single rendered output and exit.
#[derive(Subcommand, Debug)]
pub enum OneShotCommand {
    /// Search drug labels by brand or generic name and show the first match
    Search {
        /// Drug name (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Check openFDA connectivity
    Health,

    /// Print version information
    Version,
}

impl Cli {
    pub(crate) fn openfda_config(&self) -> OpenFdaConfig {
        let http = HttpConfig::default().with_timeout(Duration::from_secs(self.timeout.max(1)));
        OpenFdaConfig::from_env(http)
    }
}

/// Error returned when a search ends in the failure outcome.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct SearchFailed {
    pub message: String,
    /// Rendered outcome, for `--json` callers that still want the payload.
    pub output: String,
}

pub(crate) fn render_outcome(outcome: &SearchOutcome, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(render::json::to_pretty(outcome)?);
    }
    Ok(render::markdown::outcome_markdown(outcome)?)
}

async fn search(config: &OpenFdaConfig, name: &[String], json: bool) -> anyhow::Result<String> {
    let query = SearchQuery::parse(&name.join(" "))?;
    let client = OpenFdaClient::new(config)?;
    let outcome = drug::lookup(&client, &query).await;
    let output = render_outcome(&outcome, json)?;

    match outcome {
        SearchOutcome::Failed { message } => Err(SearchFailed { message, output }.into()),
        _ => Ok(output),
    }
}

/// Runs a one-shot command and returns its rendered output.
///
/// `interactive` is started through [`interactive::run`] since it owns stdin and stdout.
///
/// # Errors
///
/// Returns an error for empty input, failed searches, or rendering failures.
pub async fn run(cli: &Cli, command: &OneShotCommand) -> anyhow::Result<String> {
    let config = cli.openfda_config();
    match command {
        OneShotCommand::Search { name } => search(&config, name, cli.json).await,
        OneShotCommand::Health => {
            let report = health::check(&config).await?;
            if cli.json {
                Ok(render::json::to_pretty(&report)?)
            } else {
                Ok(report.to_markdown())
            }
        }
        OneShotCommand::Version => Ok(format!("dawa {}", env!("CARGO_PKG_VERSION"))),
    }
}
