use anyhow::Result;
use autograde::cli::{Cli, Commands};
use autograde::commands::grade::{handle_grade, GradeConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    autograde::observability::init(cli.verbose)?;

    match cli.command {
        Commands::Grade {
            input,
            config,
            format,
            output,
        } => {
            handle_grade(GradeConfig {
                input,
                config,
                format,
                output,
            })?;
            Ok(())
        }
        Commands::Init { force } => autograde::commands::init::init_config(force),
    }
}
