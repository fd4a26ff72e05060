//! utmkit CLI - Campaign nomenclature validation from the command line
//!
//! This is the main entry point for the utmkit CLI application, providing
//! commands for validating campaign names and UTM fields, building tracking
//! URLs, and managing the license catalog and campaign library.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Pick up UTMKIT_* variables from a local .env file
    dotenv::dotenv().ok();

    // The config carries logging and color settings, so it loads first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, cli.use_color()),
    };

    // Set up colored output
    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Initialize logging; the guard flushes the log file on exit
    let guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    match run(cli, config, use_color) {
        Ok(()) => {}
        Err(e) => {
            drop(guard);
            exit_with(&e, use_color);
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Create output writer
    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let mut output = OutputWriter::new(format, use_color, cli.quiet);
    let ctx = cli.validation_context();

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        today = %ctx.today(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &ctx, &mut output),
        Commands::Build(args) => handlers::handle_build(args, &config, &ctx, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &config, &ctx, &mut output),
        Commands::Channels => handlers::handle_channels(&mut output),
        Commands::Licenses(args) => handlers::handle_licenses(args, &config, &mut output),
        Commands::Library(args) => handlers::handle_library(args, &config, &ctx, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    // Create logging configuration from CLI args, config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_settings(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

/// Report an error on stderr and exit with its code
fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["utmkit", "-vv", "validate", "2025_08_sale"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["utmkit", "--quiet", "channels"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::Channels));
    }

    #[test]
    fn test_library_file_after_action() {
        let cli = Cli::parse_from(["utmkit", "library", "check", "--file", "campaigns.json"]);
        match cli.command {
            Commands::Library(args) => {
                assert_eq!(args.file.as_deref(), Some(Path::new("campaigns.json")));
                assert!(matches!(args.action, Some(cli::LibraryAction::Check)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
