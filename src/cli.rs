use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "vocab", version, about = "Terminal vocabulary trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the vocabulary store service
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the trainer
    Start {
        /// Offer a retry when sending practice results fails
        #[arg(long)]
        retry_submit: bool,
    },
    /// Export vocab to a CSV
    Export {
        /// Destination CSV file
        #[arg(long)]
        file: PathBuf,
    },
    /// Import vocab from a CSV
    Import {
        /// Source CSV file
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Environment configuration with this invocation's flags applied on top.
    pub fn config(&self) -> Config {
        let retry_submit = matches!(self.command, Commands::Start { retry_submit: true });
        Config::from_env().with_overrides(self.url.clone(), self.log_file.clone(), retry_submit)
    }
}
