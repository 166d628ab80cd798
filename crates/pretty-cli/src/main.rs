#![warn(missing_docs)]

//! Entry point for the `trace-pretty` binary.

mod cli;
mod error;
mod input;

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::Path,
    process,
};

use clap::Parser;
use text_pretty::{Config, Printer, TerminalColors};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::Cli,
    error::{Error, Result},
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and pretty-print the input.
fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_spec = cli.log.spec();
    let env_filter = logging::env_filter_from_spec(&log_spec);
    registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .try_init()
        .ok();

    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let (config, out_colors, err_colors) = cli.resolve_colors(
        cli.apply(base),
        TerminalColors::detect_stdout(),
        TerminalColors::detect_stderr(),
    );
    let mut printer = Printer::with_terminal(config, out_colors, io::stdout(), io::stderr())
        .with_diagnostic_colors(err_colors);

    let summary = match cli.input_path() {
        Some(path) => {
            info!(path = %path.display(), "reading messages");
            input::pretty_print(BufReader::new(File::open(path)?), &mut printer, cli.keep_going)?
        }
        None => input::pretty_print(io::stdin().lock(), &mut printer, cli.keep_going)?,
    };
    if summary.skipped > 0 {
        return Err(Error::Skipped(summary.skipped));
    }
    Ok(())
}

/// Load printer options from a JSON file.
fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}
