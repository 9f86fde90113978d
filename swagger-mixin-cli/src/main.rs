//! `swagger-mixin` merges Swagger 2.0 documents into a single primary document.
//!
//! ```text
//! swagger-mixin [-c <expected-collisions>] [-o <output>] <primary> <mixin>...
//! ```
mod cli;

use std::{fs, io, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Exit code of a run that failed to read, merge or write documents.
const FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ExitCode::from(exit_status(cli.expected_collisions, run(&cli)))
}

/// Log the outcome of [`run`] and map it to the process exit code.
fn exit_status(expected: usize, outcome: anyhow::Result<usize>) -> u8 {
    match outcome {
        Ok(collisions) => {
            let code = cli::exit_code(expected, collisions);
            if code != 0 {
                tracing::error!(
                    expected,
                    actual = collisions,
                    "unexpected number of collisions"
                );
            }
            code
        }
        Err(error) => {
            tracing::error!("{error:#}");
            FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<usize> {
    let Some(output) = &cli.output else {
        let collisions =
            swagger_mixin::mixin_files(cli.primary(), cli.mixins(), io::stdout().lock())?;
        return Ok(collisions);
    };

    // merge in memory first so a failed load leaves an existing output file untouched
    let mut merged = Vec::new();
    let collisions = swagger_mixin::mixin_files(cli.primary(), cli.mixins(), &mut merged)?;
    fs::write(output, merged).with_context(|| format!("failed to write {}", output.display()))?;

    Ok(collisions)
}
