//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use utmkit_core::{Field, ValidationContext, ValidationMode};

/// utmkit CLI - Campaign nomenclature validation and tracking URL building
///
/// Validates campaign names against the YYYY_MM_action[_variant] naming
/// convention and builds UTM tracking URLs from validated parameters.
#[derive(Parser, Debug)]
#[command(
    name = "utmkit",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "UTMKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to output.format from the config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Validate as if today were this date
    #[arg(long, global = true, value_name = "YYYY-MM-DD", env = "UTMKIT_TODAY")]
    pub today: Option<NaiveDate>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a single UTM field value
    Validate(ValidateArgs),

    /// Validate UTM parameters and print the tracking URL
    Build(BuildArgs),

    /// Validate every campaign name in a file
    Check(CheckArgs),

    /// List the marketing channels and their UTM defaults
    Channels,

    /// Search the license catalog
    Licenses(LicensesArgs),

    /// List and manage the campaign library
    Library(LibraryArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// The value to validate
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// UTM field the value belongs to (campaign, content, term, customParams)
    #[arg(short, long, default_value = "campaign", value_parser = parse_field)]
    pub field: Field,

    /// Campaign rule set (library or builder); defaults to defaults.mode
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ValidationMode>,

    /// Marketing channel, used for the placement-macro exemption in content
    #[arg(long)]
    pub channel: Option<String>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Marketing channel; defaults to defaults.channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Campaign name, optionally ending in a %searchterm license lookup
    #[arg(long)]
    pub campaign: String,

    /// utm_content value
    #[arg(long)]
    pub content: Option<String>,

    /// utm_term value (only used by channels that carry keywords)
    #[arg(long)]
    pub term: Option<String>,

    /// Additional key=value pairs joined by &
    #[arg(long)]
    pub params: Option<String>,

    /// Landing page URL; defaults to defaults.base_url
    #[arg(long)]
    pub base_url: Option<String>,

    /// License (name or UTM spelling) substituted for a %searchterm
    #[arg(long)]
    pub license: Option<String>,

    /// License catalog file; defaults to data.licenses_file
    #[arg(long, value_name = "FILE")]
    pub licenses_file: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// File with campaign names (JSON/YAML array, or one name per line)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Campaign rule set (library or builder); defaults to defaults.mode
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ValidationMode>,

    /// Only list names with errors
    #[arg(long)]
    pub errors_only: bool,
}

/// Arguments for the licenses command
#[derive(Parser, Debug)]
pub struct LicensesArgs {
    /// Case-insensitive search over category, name and tags
    #[arg(value_name = "SEARCH")]
    pub search: Option<String>,

    /// License catalog file; defaults to data.licenses_file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for the library command
#[derive(Parser, Debug)]
pub struct LibraryArgs {
    #[command(subcommand)]
    pub action: Option<LibraryAction>,

    /// Campaign library file; defaults to data.library_file
    #[arg(long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Case-insensitive search over name and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// List archived campaigns instead of active ones
    #[arg(long)]
    pub archived: bool,
}

/// Campaign library actions
#[derive(Subcommand, Debug)]
pub enum LibraryAction {
    /// Register a new campaign (the name must pass library-mode validation)
    Add(LibraryAddArgs),

    /// Archive or restore a campaign
    Archive(LibraryIdArgs),

    /// Remove a campaign
    Remove(LibraryIdArgs),

    /// Re-validate every stored campaign name
    Check,

    /// List the suggested campaign categories
    Categories,
}

/// Arguments for library add
#[derive(Parser, Debug)]
pub struct LibraryAddArgs {
    /// Campaign name
    pub name: String,

    /// Campaign category
    #[arg(long)]
    pub category: String,
}

/// Arguments for library actions addressing one campaign
#[derive(Parser, Debug)]
pub struct LibraryIdArgs {
    /// Campaign id
    pub id: u64,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),

    /// Get a configuration value
    Get(ConfigGetArgs),

    /// Validate current configuration
    Validate,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Target file (defaults to .utmkit.toml, or the user config with --user)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Write the user config instead of a project config
    #[arg(long, conflicts_with = "path")]
    pub user: bool,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Arguments for config get
#[derive(Parser, Debug)]
pub struct ConfigGetArgs {
    /// Configuration key (e.g., defaults.base_url, output.format)
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "value")]
    pub format: ConfigGetFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Configuration get output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigGetFormat {
    /// Just the value
    Value,
    /// JSON formatted
    Json,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }

    /// Date context for the recency warnings
    pub fn validation_context(&self) -> ValidationContext {
        self.today
            .map(ValidationContext::at)
            .unwrap_or_else(ValidationContext::now)
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

fn parse_field(value: &str) -> Result<Field, String> {
    value.parse().map_err(|e: utmkit_core::Error| e.to_string())
}

fn parse_mode(value: &str) -> Result<ValidationMode, String> {
    value.parse().map_err(|e: utmkit_core::Error| e.to_string())
}
