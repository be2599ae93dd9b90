use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use gatepass_config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod display;
pub mod events;
pub mod io;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::{AppState, build_session};

/// Console front end for the visitor-management translation layer
#[derive(Parser, Debug)]
#[command(name = "gatepass", version)]
struct Args {
    /// JSON config file; defaults plus environment overrides when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Switch to this language on startup
    #[arg(short, long)]
    language: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let config = Config::new();
            config.validate()?;
            config
        }
    };

    let session = build_session(&config).await?;

    if let Some(code) = &args.language {
        if let Err(e) = session.change_language(code).await {
            tracing::warn!("Startup language ignored: {}", e);
        }
    }

    let state = Arc::new(AppState::new(config, session));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Event loop finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited with error: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    let drained = tokio::time::timeout(Duration::from_secs(1), async {
        while tasks.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        tracing::warn!("Tasks did not stop in time, aborting");
        tasks.abort_all();
    }

    Ok(())
}
