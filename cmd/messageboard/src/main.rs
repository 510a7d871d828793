//! # Message board binary
//!
//! Assembles the application from configuration and compile-time features.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::web::{router, AppState};
use configs::{LogFormat, LoggingSettings, Settings, StorageBackend, StorageSettings};
use domains::ThreadRepository;
use storage_adapters::InMemoryThreadRepository;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.logging);

    let repo = build_repository(&settings.storage).await?;
    let app = router(AppState::new(repo));

    let addr = settings.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, backend = ?settings.storage.backend, "message board listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_repository(storage: &StorageSettings) -> anyhow::Result<Arc<dyn ThreadRepository>> {
    match storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store; threads are lost on restart");
            Ok(Arc::new(InMemoryThreadRepository::new()))
        }
        #[cfg(feature = "db-postgres")]
        StorageBackend::Postgres => {
            use secrecy::ExposeSecret;

            let url = storage
                .database_url
                .as_ref()
                .context("storage.database_url is not set")?;
            let repo = storage_adapters::PgThreadRepository::connect(
                url.expose_secret(),
                storage.max_connections,
            )
            .await
            .context("failed to connect to postgres")?;
            repo.migrate().await.context("failed to create the threads table")?;
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "db-postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("storage.backend = \"postgres\" requires the db-postgres feature")
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
