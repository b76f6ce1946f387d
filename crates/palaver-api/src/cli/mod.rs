//! CLI command definitions for the `palaver` binary.

pub mod models;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use palaver_infra::config::DEFAULT_CONFIG_FILE;

/// Chat backend brokering conversations between a browser client and LLM providers.
#[derive(Parser)]
#[command(name = "palaver", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Config file path.
        #[arg(long, env = "PALAVER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Listen address (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides the config file).
        #[arg(long, short)]
        port: Option<u16>,

        /// Export spans to stdout through OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// List the model catalog.
    Models {
        /// Output machine-readable JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,palaver=debug",
            _ => "trace",
        }
    }
}
