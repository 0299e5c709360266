//! CLI commands and argument parsing

use crate::client::DEFAULT_BASE_URL;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compile copy jobs into pipelines and publish them
#[derive(Parser, Debug)]
#[command(name = "fabric-copy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for status messages
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a copy job and print the pipeline document
    Compile {
        /// Copy job file (YAML or JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,

        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a copy job and its connector configurations
    Validate {
        /// Copy job file (YAML or JSON)
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Compile a copy job and create or update its pipeline
    Deploy {
        /// Copy job file (YAML or JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Bearer token for the orchestration API
        #[arg(long, env = "FABRIC_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Orchestration API root
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,
    },

    /// List connectors and whether they read, write or both
    Connectors,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
