//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod build;
mod channels;
mod check;
mod completions;
mod config;
mod library;
mod licenses;
mod utils;
mod validate;

pub use build::handle_build;
pub use channels::handle_channels;
pub use check::handle_check;
pub use completions::handle_completions;
pub use config::handle_config;
pub use library::handle_library;
pub use licenses::handle_licenses;
pub use validate::handle_validate;
