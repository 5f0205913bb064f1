//! CLI argument definitions using clap
//!
//! Commands:
//! - dynaform init --config <path>
//! - dynaform serve --config <path> [--port <port>]
//! - dynaform validate --config <path> --values <file>
//! - dynaform export --config <path> [--output <file>] [--sort-order asc|desc] [--q <term>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::query::SortOrder;

/// dynaform - one field schema drives validation, rendering and storage
#[derive(Parser, Debug)]
#[command(name = "dynaform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory, an empty store and a default config
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./dynaform.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./dynaform.json")]
        config: PathBuf,

        /// Port override (wins over config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a JSON values file against the active form
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./dynaform.json")]
        config: PathBuf,

        /// JSON object of field id → value
        #[arg(long)]
        values: PathBuf,
    },

    /// Export submissions as CSV
    Export {
        /// Path to configuration file
        #[arg(long, default_value = "./dynaform.json")]
        config: PathBuf,

        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,

        /// Created-at order
        #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
        sort_order: SortOrder,

        /// Only rows matching this search term
        #[arg(long)]
        q: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
