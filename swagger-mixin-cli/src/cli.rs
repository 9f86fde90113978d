use std::path::{Path, PathBuf};

use clap::Parser;

/// Exit code used when collisions were expected but none happened.
const NO_COLLISIONS: u8 = 254;
/// Exit code used when the collision count does not fit in an exit code.
const TOO_MANY_COLLISIONS: u8 = 255;

/// Merge mixin Swagger 2.0 documents into a primary document.
///
/// The merged document is written as JSON. Entries of the mixins whose key already exists are
/// skipped and counted as collisions. When the count differs from the expected one the process
/// exits with the actual count, 254 if there were none and 255 if there were more than 253.
#[derive(Debug, Parser)]
#[command(name = "swagger-mixin", version, about, long_about)]
pub struct Cli {
    /// Number of collisions the merge is expected to report.
    #[arg(
        short = 'c',
        long,
        default_value_t = 0,
        env = "SWAGGER_MIXIN_EXPECTED_COLLISIONS"
    )]
    pub expected_collisions: usize,

    /// Write the merged document to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log loaded documents and renamed operations.
    #[arg(short, long)]
    pub verbose: bool,

    /// Primary document followed by the mixins in priority order. Files ending in `.yml` or
    /// `.yaml` are read as YAML, others as JSON.
    #[arg(required = true, num_args = 2.., value_name = "DOCUMENT")]
    pub documents: Vec<PathBuf>,
}

impl Cli {
    pub fn primary(&self) -> &Path {
        &self.documents[0]
    }

    pub fn mixins(&self) -> &[PathBuf] {
        &self.documents[1..]
    }
}

/// Map the collision count of a merge to the process exit code.
pub fn exit_code(expected: usize, actual: usize) -> u8 {
    if actual == expected {
        0
    } else if actual == 0 {
        NO_COLLISIONS
    } else {
        u8::try_from(actual)
            .ok()
            .filter(|code| *code < NO_COLLISIONS)
            .unwrap_or(TOO_MANY_COLLISIONS)
    }
}
