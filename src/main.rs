use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carelink::config::Config;
use carelink::AppState;

#[derive(Parser, Debug)]
#[command(name = "carelink")]
#[command(author, version, about = "Multi-role telehealth consultation service", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "carelink.toml")]
    config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Skip seeding the demo dataset
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Carelink v{}", env!("CARGO_PKG_VERSION"));

    // Create app state
    let state = Arc::new(AppState::new(config.clone()));

    // Populate the in-memory stores with the demo dataset
    if !cli.no_seed {
        carelink::store::seed::seed_demo_data(&state.store)?;
    }

    // Ensure default admin user exists
    carelink::api::auth::ensure_admin_user(
        &state.store,
        &config.auth.admin_email,
        &config.auth.admin_password,
    )?;

    // Create API router
    let app = carelink::api::create_router(state);

    // Start API server
    let api_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;

    tracing::info!("API server listening on http://{}", api_addr);
    tracing::info!("Bootstrap token: {}", config.auth.bootstrap_token);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
