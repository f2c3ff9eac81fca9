//! One-shot matching from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::{
    api::{error::ApiError, types::PredictResponse},
    config::Settings,
    matcher::Readiness,
};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Free-text symptom description.
    pub symptoms: String,
    /// Dataset path, overriding `DATA_PATH`.
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Print the JSON body `/predict` would return for `args.symptoms`.
pub fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(data) = args.data {
        settings.data_path = data;
    }
    let readiness = Readiness::initialise(&settings);
    let index = readiness.index().map_err(ApiError::from)?;
    let matches = index
        .query(&args.symptoms, &settings.rank_options())
        .map_err(ApiError::from)?;
    let response = PredictResponse::new(args.symptoms.as_str(), matches);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
