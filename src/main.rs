use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();

    let cli = dawa_cli::cli::Cli::parse();
    match &cli.command {
        dawa_cli::cli::Commands::Interactive => {
            match dawa_cli::cli::interactive::run(&cli).await {
                Ok(()) => std::process::ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::ExitCode::from(1)
                }
            }
        }
        dawa_cli::cli::Commands::OneShot(command) => {
            match dawa_cli::cli::run(&cli, command).await {
                Ok(output) => {
                    println!("{output}");
                    std::process::ExitCode::SUCCESS
                }
                Err(err) => {
                    if let Some(failed) = err.downcast_ref::<dawa_cli::cli::SearchFailed>() {
                        if cli.json {
                            println!("{}", failed.output);
                        }
                        eprintln!("{failed}");
                    } else if let Some(dawa_err) =
                        err.downcast_ref::<dawa_cli::error::DawaError>()
                    {
                        eprintln!("Error: {dawa_err}");
                    } else {
                        eprintln!("Error: {err}");
                    }
                    std::process::ExitCode::from(1)
                }
            }
        }
    }
}
