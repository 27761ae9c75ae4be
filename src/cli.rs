use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autograde")]
#[command(about = "Weighted quality score for test, mutation and static analysis results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade a set of parsed report records
    Grade {
        /// JSON document with report records and failure details
        input: PathBuf,

        /// Configuration file (defaults to the nearest .autograde.toml)
        #[arg(short, long, env = "AUTOGRADE_CONFIG")]
        config: Option<PathBuf>,

        /// Output format (inferred from the output file extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a default .autograde.toml into the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}
