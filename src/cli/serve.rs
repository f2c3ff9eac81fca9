//! CLI entry-point for serving the HTTP API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::{self, AppState},
    config::Settings,
    matcher::Readiness,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind, overriding `PORT`.
    #[arg(long)]
    pub port: Option<u16>,
    /// Host address, overriding `HOST`.
    #[arg(long)]
    pub host: Option<String>,
    /// Dataset path, overriding `DATA_PATH`.
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(data) = args.data {
        settings.data_path = data;
    }
    let host = args.host.unwrap_or_else(|| settings.host.clone());
    let port = args.port.unwrap_or(settings.port);

    // Indexing finishes before the listener is bound.
    let readiness = Readiness::initialise(&settings);
    let state = AppState::new(readiness, settings.rank_options());
    api::serve(state, &host, port).await
}
