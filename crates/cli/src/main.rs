use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pushdown_cli::{run, Command, Context};
use pushdown_configuration::environment::ProcessEnvironment;
use tracing_subscriber::EnvFilter;

/// Translate push-down query trees into SQL for a remote database.
#[derive(Parser)]
#[command(version)]
struct Arguments {
    /// The directory holding `configuration.json`.
    #[arg(long = "context", env = "PUSHDOWN_CONTEXT", value_name = "DIRECTORY", default_value = ".")]
    context_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let arguments = Arguments::parse();
    let context = Context {
        context_path: arguments.context_path,
        environment: ProcessEnvironment,
    };
    match run(arguments.command, context).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
