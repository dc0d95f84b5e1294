use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, ServerConfig};
use crate::handlers::AppState;
use crate::routes;
use crate::store::MemoryStore;

/// Seed the store, build the router and serve until Ctrl-C
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting restdb-api with {:?}", config.server);

    let store = MemoryStore::seeded(&config.store.seed_users).await;
    let state = AppState::new(Arc::new(store), &config.routing);
    let app = routes::app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve(listener, app, &config.server).await
}

/// Serve `app` on an already-bound listener until Ctrl-C.
///
/// Connections speak HTTP/1.1. A keep-alive connection that starts no new
/// request within the idle timeout is closed by the server.
pub async fn serve(listener: TcpListener, app: Router, server: &ServerConfig) -> anyhow::Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(server.idle_timeout());

    let graceful = GracefulShutdown::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, remote_addr) = match result {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let service = TowerToHyperService::new(app.clone());
                let conn = graceful.watch(builder.serve_connection(TokioIo::new(stream), service));
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        debug!("Connection from {} closed: {}", remote_addr, e);
                    }
                });
            }

            _ = &mut shutdown => break,
        }
    }

    drop(listener);

    tokio::select! {
        _ = graceful.shutdown() => info!("All connections closed"),
        _ = tokio::time::sleep(server.idle_timeout()) => {
            warn!("Gave up waiting for open connections after {:?}", server.idle_timeout());
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
