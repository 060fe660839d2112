//! CLI command definitions
//!
//! Defines the clap commands for the posts smoke runner.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::config::OutputMode;
use crate::scenario::Check;

/// Flags accepted by every command
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config dir / config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the service, overriding the configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Where progress lines go
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputMode>,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log each request and response status
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every check in order (the default)
    Run,

    /// Run the named checks in the given order
    Check {
        /// Checks to run
        #[arg(value_enum, required = true)]
        checks: Vec<Check>,
    },

    /// List checks in run order
    List,
}
