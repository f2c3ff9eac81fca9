//! Entry point wiring CLI dispatch to the matcher service.

use anyhow::Result;
use symptom_match::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load();
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
