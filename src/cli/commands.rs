//! CLI commands and argument parsing

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::types::{DEFAULT_CONFLICT_KEY, DEFAULT_INPUT_PATH, DEFAULT_TABLE};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Upload the merged firms dataset to the hosted table store
#[derive(Parser, Debug)]
#[command(name = "firm-upload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Environment file to load before reading settings
    /// (defaults to a `.env` in the working directory or its parents)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input file selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Parquet file produced by the merge step.
    /// Relative paths, including the default, are resolved from the
    /// current working directory, so run from the project root or pass
    /// an absolute path
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upsert every row into the remote table, batch by batch
    Upload {
        #[command(flatten)]
        input: InputArgs,

        /// Rows per upsert call
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Destination table
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Conflict target column for the upsert
        #[arg(long, default_value = DEFAULT_CONFLICT_KEY)]
        on_conflict: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },

    /// Print projected rows as JSON without uploading
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Number of rows to print
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },
}
