//! CLI module
//!
//! Command-line interface for the uploader.
//!
//! # Commands
//!
//! - `upload` - Load the dataset and upsert it into the remote table
//! - `preview` - Print the first projected rows without contacting the store

mod commands;
mod runner;

pub use commands::{Cli, Commands, InputArgs};
pub use runner::{print_report, Runner};
