//! File Passer server binary.
//!
//! Serves an upload page, accepts base64 JSON uploads into a directory tree
//! under a single root, and lists that tree. Uploads never replace existing
//! files. The main entry point builds the Axum router and runs the HTTP
//! listener until Ctrl+C or SIGTERM.

mod config;
mod error;
mod files;
mod frontend;
mod http;
mod logging;
mod router;
mod storage;
mod upload;

use axum_server::Handle;
use clap::Parser;
use shadow_rs::shadow;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use crate::config::Args;
use crate::router::build_router;
use crate::storage::Storage;

shadow!(build);

/// Starts the server and blocks until shutdown.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    logging::init_logging();

    let args = Args::parse();
    let storage = Arc::new(Storage::new(PathBuf::from(&args.root)));
    storage.ensure_root().await?;
    let app = build_router(storage.clone(), args.max_body_size);

    let host = args
        .bind
        .parse::<IpAddr>()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;
    let http_addr = SocketAddr::new(host, args.port);
    let handle = Handle::new();

    info!(root = ?storage.root_path(), "🚀 Starting HTTP server at {}", http_addr);

    let server = axum_server::bind(http_addr)
        .handle(handle.clone())
        .serve(app.into_make_service_with_connect_info::<SocketAddr>());

    tokio::spawn(shutdown_signal(handle));
    server.await?;

    info!("Exiting");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received termination signal shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
