//! Command-line interface wiring for symptom-match.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod query;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Symptom to health condition matcher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Query(args) => query::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Index the catalogue and serve the JSON API.
    Serve(serve::Args),
    /// Index the catalogue and print matches for one symptom description.
    Query(query::Args),
}
