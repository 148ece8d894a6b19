use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use explorer_core::{event_ids, EventDataset, DEFAULT_SLIDES};
use tracing::{error, info};

mod config;
mod error;
mod export;
mod handlers;
mod logging;
mod metrics;
mod models;
mod router;
mod state;
mod templates;
mod views;

use crate::config::WebConfig;
use crate::state::AppState;
use crate::views::CarouselViews;

#[derive(Parser)]
#[command(name = "explorer-web")]
#[command(about = "Events Explorer - browse, filter and view events")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./explorer.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the events JSON dataset
    #[arg(long, global = true)]
    events: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site over HTTP (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Pre-render the site into a directory of static files
    Export {
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// Print every route the site serves
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = WebConfig::load(cli.config.as_deref())?;
    if let Some(events) = cli.events {
        config.events_path = events;
    }

    let _log_guard = logging::init_logging(&config.log_dir);

    let dataset = EventDataset::load(&config.events_path)
        .with_context(|| format!("loading events from {}", config.events_path.display()))?;

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(dataset, config).await?;
        }
        Commands::Export { out } => {
            let summary = export::export_site(&dataset, &DEFAULT_SLIDES, &config.static_dir, &out)?;
            println!(
                "Exported {} pages and {} assets to {}",
                summary.pages,
                summary.assets,
                out.display()
            );
        }
        Commands::Routes => {
            println!("/");
            for id in event_ids(dataset.events()) {
                println!("/events/{}", id);
            }
        }
    }

    Ok(())
}

async fn serve(dataset: EventDataset, config: WebConfig) -> anyhow::Result<()> {
    let state = AppState::new(dataset, &config).with_metrics(metrics::init_metrics());
    let views = state.views.clone();
    let app = router::app_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;

    info!(
        addr = %bind_addr,
        carousel_interval_ms = config.carousel_interval.as_millis() as u64,
        "Events Explorer listening (visit http://127.0.0.1:{})",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(views))
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C once every live carousel has been stopped; open SSE
/// streams would otherwise keep the graceful shutdown waiting forever.
async fn shutdown_signal(views: CarouselViews) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!(views = views.len(), "Shutdown signal received, stopping carousels");
    views.shutdown_all().await;
}
