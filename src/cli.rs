use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subrules")]
#[command(author, version, about = "Rule subscription parser and formatter")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a subscription and report its contents
    Check {
        /// Subscription file to check
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Rewrite a subscription in canonical form
    Fmt {
        /// Subscription file to format
        #[arg(required = true)]
        file: PathBuf,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
