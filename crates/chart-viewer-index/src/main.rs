use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chart_viewer_core::Database;

/// Local patient index service.
#[derive(Parser, Debug)]
#[command(name = "chart-viewer-index", version, about)]
struct Cli {
    /// SQLite database file, created if missing
    #[arg(long, env = "INDEX_DB", default_value = "patients.db")]
    db: PathBuf,

    /// Address to listen on
    #[arg(long, env = "INDEX_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let db = Database::open(&cli.db)?;
    info!(path = %cli.db.display(), "Opened patient index");

    let app = chart_viewer_index::router(Arc::new(Mutex::new(db)));

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(addr = %cli.bind, "Patient index listening");

    axum::serve(listener, app).await?;

    Ok(())
}
