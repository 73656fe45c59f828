//! mapf-bridge CLI Binary
//!
//! Command-line entry point for the MAPF conversion and validation tools.

use clap::Parser;
use mapf_bridge::logging::{init_logging, LoggingConfig};
use mapf_bridge::tooling::cli::{Cli, CliContext};
use std::path::PathBuf;
use std::process;

fn main() {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let context = match CliContext::new(working_dir, cli.config.clone()) {
        Ok(ctx) => ctx.verbose(cli.verbose),
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(e.exit_code());
        }
    };

    let logging = logging_overrides(&cli, context.config().logging.clone());
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(e.exit_code());
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

/// CLI flags win over the `[logging]` config section.
fn logging_overrides(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
