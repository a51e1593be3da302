use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::lang::Lang;

#[derive(Parser, Debug)]
#[command(
    name = "stack-preflight",
    about = "Pre-flight readiness checks for the backend/frontend stack"
)]
pub struct Cli {
    /// Project root the checks run against
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/preflight.toml, optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interpreter used to import backend modules (overrides the config file)
    #[arg(long, global = true)]
    pub python: Option<String>,

    /// Print the report as JSON instead of console text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Spinners share stderr with verbose output, so they are only drawn when
    /// neither verbose logging nor JSON output is on.
    pub fn show_progress(&self) -> bool {
        !self.json && !self.verbose
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check required files and directories, then load the backend configuration
    Validate,

    /// Import the backend configuration and route modules, then list what the
    /// stack would serve
    Probe {
        /// Language of the console report
        #[arg(long, value_enum, default_value = "zh-tw")]
        lang: Lang,

        /// Exit 1 when any check fails (the probe is advisory by default)
        #[arg(long)]
        strict: bool,
    },
}
