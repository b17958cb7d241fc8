//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Embark using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Embark - Elasticsearch to Qdrant export tool
#[derive(Parser, Debug)]
#[command(name = "embark")]
#[command(version, about, long_about = None)]
#[command(author = "Embark Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "embark.toml", env = "EMBARK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EMBARK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export documents from Elasticsearch into a Qdrant collection
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show source document count and destination collection status
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
