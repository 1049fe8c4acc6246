//! schemata CLI: inspect and exercise a generated type catalog.
//!
//! Usage:
//!   schemata check                          - Validate the configured catalog
//!   schemata show <app/Type>                - Print a resolved type model
//!   schemata classify <app/Type> --at <v>   - Classify every member for version v
//!   schemata create <app/Type> [--set k=v]  - Create a defaulted instance
//!   schemata decode <record.json>           - Decode a stored wire record
//!   schemata fingerprint                    - Print the catalog fingerprint

mod commands;

use clap::{Parser, Subcommand};
use schemata::config::{Config, DEFAULT_CONFIG_FILE};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "schemata")]
#[command(about = "Schemata - versioned type catalog tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Validate the catalog and report its size
    Check,

    /// Print the model of one type as JSON
    Show {
        /// Type reference, e.g. `sys/WhitelabelConfig`
        type_ref: String,
    },

    /// Classify every member of a type for an instance version
    Classify {
        type_ref: String,

        /// Catalog version the instance was produced at
        #[arg(long)]
        at: u32,
    },

    /// Create a defaulted instance and print it as JSON
    Create {
        type_ref: String,

        /// Override a member, `name=<json>`; bare words are strings; repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Decode a JSON wire record and print the instance
    Decode {
        /// File holding one serialized wire record
        record: PathBuf,
    },

    /// Print the catalog fingerprint
    Fingerprint,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match commands::run(&cli.command, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
