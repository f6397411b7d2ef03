//! Command-line interface for the tplgen binary.
//!
//! The CLI loads a configuration document, normalizes it and prints the
//! resulting program options as JSON on stdout. Diagnostics are logged to
//! stderr.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Parser};
use tplgen::{Error, ProgramOptions, load_program_options, logging};

/// Command line interface for normalizing generator program options.
#[derive(Debug, Parser,)]
#[command(name = "tplgen", version, about = "Normalize template generator program options")]
struct Cli
{
    /// Path to the JSON or YAML configuration file.
    #[arg(long = "config", short = 'c', value_name = "PATH", env = "TPLGEN_CONFIG")]
    config: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    /// Reject configurations that produce any warning.
    #[arg(long = "strict", action = ArgAction::SetTrue)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    let cli = Cli::parse();
    logging::init_logging(cli.verbose,);

    if let Err(error,) = run(cli,).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading and normalization.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let options = resolve_options(&cli,).await?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_program_options(&mut handle, &options, cli.pretty,)
}

async fn resolve_options(cli: &Cli,) -> Result<ProgramOptions, Error,>
{
    let normalized = load_program_options(&cli.config,).await?;
    if cli.strict {
        normalized.into_strict()
    } else {
        Ok(normalized.options,)
    }
}

fn write_program_options<W: io::Write,>(
    writer: &mut W,
    options: &ProgramOptions,
    pretty: bool,
) -> Result<(), Error,>
{
    let result = if pretty {
        serde_json::to_writer_pretty(writer, options,)
    } else {
        serde_json::to_writer(writer, options,)
    };

    result.map_err(|source| Error::Serialize {
        source,
    },)
}
