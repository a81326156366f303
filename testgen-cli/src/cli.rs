use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Generate verification test plans and execution sequences from requirement sources"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full generation pipeline described by a configuration file
    Run {
        /// Path to the run configuration YAML
        #[clap(long, short = 'c')]
        config: PathBuf,
    },

    /// Verify that a template workbook carries the required header row
    CheckTemplate {
        /// Path to the template workbook YAML
        template: PathBuf,
    },
}
