//! Command-line arguments for `bunker-dashboard`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use shared::models::Region;

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "bunker-dashboard",
    version,
    about = "Summarize regional bunkering spreadsheets by navigation type",
    long_about = "Reads one CSV export per region (AM, PA), recovers numbers written in either \
                  pt-BR or en-US notation, and reports completed operations, volume and value \
                  per navigation type."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load region sheets and print the consolidated summary.
    Summary(SummaryArgs),

    /// Normalize raw values and show the diagnostics for each.
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Region sheet as REGION=PATH (e.g. AM=amazonas.csv). Repeat per region.
    #[arg(short, long = "input", value_name = "REGION=PATH", value_parser = parse_region_input, required = true)]
    pub inputs: Vec<RegionInput>,

    /// JSON settings file (defaults to the embedded configuration).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for the summary.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw cell values, e.g. "1.234,56" "R$ 1,234.56".
    #[arg(value_name = "VALUE", required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionInput {
    pub region: Region,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn parse_region_input(s: &str) -> Result<RegionInput, String> {
    let (region, path) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected REGION=PATH, got '{}'", s))?;
    if path.trim().is_empty() {
        return Err(format!("Missing file path for region '{}'", region));
    }
    Ok(RegionInput { region: region.parse()?, path: PathBuf::from(path) })
}
