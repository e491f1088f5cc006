mod bootstrap;
mod cli;

use clap::Parser;
use tracing::debug;

use bootstrap::config::{load_config_or_empty, resolve_config};
use bootstrap::wiring::{build_deps, wire_session};
use cli::Cli;
use ju_infra::DirsAppDirsAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_empty(cli.config.clone())?;
    let resolved = resolve_config(&config, &DirsAppDirsAdapter::new())?;
    bootstrap::tracing::init_tracing_subscriber(
        resolved.log_dir.as_deref(),
        resolved.log_filter.as_deref(),
    )?;
    debug!(?resolved, "configuration resolved");

    let session = wire_session(build_deps(&resolved)).await;
    let view = cli::execute(cli.command, &session).await?;
    session.flush().await;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
