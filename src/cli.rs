use crate::io::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cqs-analyzer")]
#[command(about = "Command-Query Separation analyzer for methods and lambdas", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a syntax snapshot produced by a front end
    Check {
        /// Snapshot file (JSON)
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .cqs-analyzer.toml)
        #[arg(short, long, env = "CQS_ANALYZER_CONFIG")]
        config: Option<PathBuf>,

        /// Number of worker threads (defaults to all cores)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List the rules and their messages
    Rules,

    /// Write a default .cqs-analyzer.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
