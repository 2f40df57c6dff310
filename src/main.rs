//! Command-line tool for generating API documentation from annotated
//! controller sources.
//!
//! # Usage
//!
//! ```bash
//! apidoc-from-source [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation:
//! ```bash
//! apidoc-from-source ./my-api-project -o apidoc.yaml
//! ```
//!
//! Generate JSON documentation:
//! ```bash
//! apidoc-from-source ./my-api-project -f json -o apidoc.json
//! ```

use anyhow::Result;
use apidoc_from_source::cli;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse args once up front so the verbose flag can drive logger setup
    let parsed_args = cli::CliArgs::parse();

    let log_level = if parsed_args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let args = cli::parse_args_from_parsed(parsed_args)?;
    cli::run(args)?;

    info!("Documentation generation completed successfully");
    Ok(())
}
