//! CLI module
//!
//! Command-line interface for the credential client.
//!
//! # Commands
//!
//! - `get` - Fetch a credential pair
//! - `schemes` - List registered auth schemes
//! - `validate` - Check settings and compile the URL template

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
