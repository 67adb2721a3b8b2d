use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unex-portal")]
#[command(about = "Terminal student portal for UNEX freshmen")]
pub struct Cli {
    /// SQLite database holding the stored session and preferences
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive portal (default)
    Run,
    /// Show the stored session and preferences
    Status,
    /// Sign out the stored session
    Reset {
        /// Also clear the theme and tutorial preferences
        #[arg(long)]
        all: bool,
    },
}
