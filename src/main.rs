//! API Doc Generator - Command-line tool for generating endpoint documentation.
//!
//! This binary provides a command-line interface for generating human-readable API
//! documentation from schema declaration files. It parses the declarations, resolves
//! type references, and renders a Markdown document (or a JSON/YAML dump of the
//! resolved schema).
//!
//! # Usage
//!
//! ```bash
//! apidoc-from-source [OPTIONS] <SCHEMA_FILE>
//! ```
//!
//! # Examples
//!
//! Generate Markdown documentation:
//! ```bash
//! apidoc-from-source ./schema.rs -o api.md
//! ```
//!
//! Dump the resolved schema as JSON:
//! ```bash
//! apidoc-from-source ./schema.rs -f json -o schema.json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! apidoc-from-source ./schema.rs -v
//! ```

mod cli;
mod context;
mod decl;
mod error;
mod extract;
mod lower;
mod model;
mod parser;
mod render;
mod serialize;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("API Doc Generator starting...");

    // Now do the full parse with validation
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("API documentation generation completed successfully");

    Ok(())
}
