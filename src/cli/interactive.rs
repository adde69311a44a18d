//! Line-oriented prompt: one drug name per line, one result per search.
//!
//! Each search is awaited before the next line is read, so at most one request is
//! in flight at a time.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use super::Cli;
use crate::entities::drug::{self, EMPTY_QUERY_MESSAGE, SearchQuery};
use crate::sources::openfda::OpenFdaClient;

const PROMPT: &str = "Drug name (or 'quit'): ";
const SEARCHING: &str = "Searching…";

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_ascii_lowercase().as_str(), "quit" | "exit" | ":q")
}

/// Drives the prompt over arbitrary reader/writer pairs.
pub(crate) async fn run_with<R, W>(
    client: &OpenFdaClient,
    json: bool,
    mut input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            output.write_all(b"\n").await?;
            break;
        }

        let trimmed = line.trim();
        if is_exit_command(trimmed) {
            break;
        }

        let Ok(query) = SearchQuery::parse(trimmed) else {
            output
                .write_all(format!("{EMPTY_QUERY_MESSAGE}\n").as_bytes())
                .await?;
            continue;
        };

        output.write_all(format!("{SEARCHING}\n").as_bytes()).await?;
        output.flush().await?;

        let outcome = drug::lookup(client, &query).await;
        debug!(drug = query.as_str(), failed = outcome.is_failure(), "search finished");

        let rendered = super::render_outcome(&outcome, json)?;
        output.write_all(rendered.as_bytes()).await?;
        output.write_all(b"\n\n").await?;
    }
    output.flush().await?;
    Ok(())
}

/// Runs the interactive prompt on stdin/stdout.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be created or stdio fails.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let client = OpenFdaClient::new(&cli.openfda_config())?;
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    run_with(&client, cli.json, input, &mut output).await
}
