use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::{FalseyValueParser, NonEmptyStringValueParser};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, error};

use update_local::logging::{self, LogFormat};
use update_local::{run, SaveStrategy, Target};

/// Sets one local of an HCL file to a new string value.
///
/// Meant for CI actions: inputs come from the INPUT_* environment, flags
/// override them.
#[derive(Parser, Debug)]
#[command(name = "update_local", version)]
struct Cli {
    /// File to edit in place
    #[arg(long, env = "INPUT_FILEPATH")]
    filepath: PathBuf,

    /// Attribute of the locals block to update
    #[arg(long, env = "INPUT_VARNAME", value_parser = NonEmptyStringValueParser::new())]
    varname: String,

    /// New string value
    #[arg(long, env = "INPUT_VALUE")]
    value: String,

    /// Replace the file through a temp file and rename instead of rewriting it
    #[arg(long, env = "INPUT_ATOMIC", action = ArgAction::SetTrue, value_parser = FalseyValueParser::new())]
    atomic: bool,

    /// Set log level to debug
    #[arg(long)]
    debug: bool,

    /// Log output, text or json
    #[arg(long, env = "INPUT_LOG_FORMAT", default_value = "text", value_parser = parse_log_format)]
    log_format: LogFormat,
}

// CI runners pass unset optional inputs as empty strings
fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    if value.is_empty() {
        return Ok(LogFormat::default());
    }
    LogFormat::from_str(value, true)
}

fn update(cli: Cli) -> Result<()> {
    let target = Target {
        path: cli.filepath,
        attribute: cli.varname,
        value: cli.value,
    };
    debug!(
        filepath = %target.path.display(),
        varname = %target.attribute,
        value = %target.value,
        "env vars loaded"
    );

    let strategy = if cli.atomic {
        SaveStrategy::Atomic
    } else {
        SaveStrategy::InPlace
    };
    run(&target, strategy)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.debug, cli.log_format) {
        eprintln!("{:#}", err);
        return ExitCode::FAILURE;
    }

    match update(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "failed to update HCL file");
            ExitCode::FAILURE
        }
    }
}
