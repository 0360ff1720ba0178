use std::sync::Arc;

use anyhow::{Context, Result};
use article_backend::config::AppConfig;
use article_backend::storage::{SnapshotFile, load_or_seed, spawn_snapshot_worker};
use article_backend::web::{AppState, build_router};
use article_backend::ArticleStore;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let store = Arc::new(ArticleStore::new());
    let snapshot_file = SnapshotFile::new(&config.data_file);

    load_or_seed(&store, &snapshot_file).await;
    let count = store.count().await;
    info!(articles = count, "store initialized");

    let worker = spawn_snapshot_worker(store.clone(), snapshot_file);
    store.attach_persistence(worker.save_signal());

    let app = build_router(AppState::new(store));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, data_file = %config.data_file.display(), "article backend started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Err(err) = worker.stop().await {
        error!(error = %err, "snapshot worker did not stop cleanly");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("article_backend=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
