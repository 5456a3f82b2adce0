use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use queue_log_report::web::{router, AppState};

/// Runtime configuration, read from the environment with workable defaults.
#[derive(Debug)]
struct Config {
    bind: SocketAddr,
    upload_dir: PathBuf,
    events_path: PathBuf,
}

impl Config {
    fn from_env() -> Result<Self> {
        let bind = env::var("QLR_BIND")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .context("invalid QLR_BIND address")?;
        let upload_dir =
            PathBuf::from(env::var("QLR_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));
        let events_path =
            PathBuf::from(env::var("QLR_EVENTOS").unwrap_or_else(|_| "eventos.json".to_string()));
        Ok(Self {
            bind,
            upload_dir,
            events_path,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("creating upload dir {}", config.upload_dir.display()))?;

    let state = AppState {
        upload_dir: config.upload_dir.clone(),
        events_path: config.events_path.clone(),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(
        bind = %config.bind,
        upload_dir = %config.upload_dir.display(),
        eventos = %config.events_path.display(),
        "generador de reportes listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}
