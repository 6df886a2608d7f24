// bunker-dashboard entry point
use anyhow::Result;
use clap::Parser;
use engine::cli::{Cli, Command};
use engine::commands::{run_normalize, run_summary};
use engine::logging::{init_logging, LogConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format.into()))?;

    info!("Starting bunker dashboard...");

    let output = match &cli.command {
        Command::Summary(args) => run_summary(args).await?,
        Command::Normalize(args) => run_normalize(args),
    };
    print!("{}", output);
    Ok(())
}
