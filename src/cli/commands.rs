//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch short-lived database credentials from a token service
#[derive(Parser, Debug)]
#[command(name = "db-credentials")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// URL template (overrides the settings file)
    #[arg(short, long, global = true)]
    pub url_template: Option<String>,

    /// Read timeout in milliseconds
    #[arg(long, global = true)]
    pub read_timeout_ms: Option<u64>,

    /// Connect timeout in milliseconds
    #[arg(long, global = true)]
    pub connect_timeout_ms: Option<u64>,

    /// Auth scheme name
    #[arg(short, long, global = true)]
    pub auth_scheme: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch credentials for a user on a database
    Get {
        /// Target database name
        db_name: String,

        /// Requesting username
        username: String,

        /// Token forwarded to the service
        token: String,
    },

    /// List registered auth schemes
    Schemes,

    /// Validate settings and the URL template
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON object
    Json,
    /// Human-readable output
    Pretty,
}
