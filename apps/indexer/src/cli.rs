//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "sift")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Enumerate, count and batch content types for indexing")]
pub struct Cli {
    /// Configuration file (`sift.toml` in the working directory by default)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List registered content types
    List {
        /// Only application-defined content types
        #[arg(long)]
        api_only: bool,
    },
    /// Count entries (all content types when none is given)
    Count {
        /// Content type uids or short names
        uids: Vec<String>,
    },
    /// Dry-run an indexing pass and report the documents per content type
    Sync {
        /// Content type uids or short names
        uids: Vec<String>,
        /// Entries per batch (configuration value by default)
        #[arg(short, long)]
        page_size: Option<usize>,
    },
}
