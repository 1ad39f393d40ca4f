//! Plotboard CLI library.
//!
//! Provides the command-line surface for Plotboard: importing markdown
//! manuscripts into project files, running entity extraction against a
//! configured generation service, and inspecting project files.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
