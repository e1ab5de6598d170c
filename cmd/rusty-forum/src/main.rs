//! # Rusty-Forum Binary
//!
//! The entry point that assembles the application from settings: tracing,
//! the configured store, and the HTTP router.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, serve, shutdown_signal, AppState};
use configs::{LogFormat, LogSettings, Settings, StoreBackend};
use storage_adapters::MemoryStore;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    init_tracing(&settings.log)?;

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    match settings.database.backend {
        StoreBackend::Memory => {
            warn!("using the in-memory store; posts are lost on shutdown");
            let state = AppState::new(Arc::new(MemoryStore::new()));
            let app = router(state, settings.server.max_body_bytes);
            serve(listener, app, shutdown_signal()).await?;
        }
        StoreBackend::Postgres => run_postgres(listener, &settings).await?,
    }

    info!("rusty-forum stopped");
    Ok(())
}

#[cfg(feature = "db-postgres")]
async fn run_postgres(listener: TcpListener, settings: &Settings) -> anyhow::Result<()> {
    use secrecy::ExposeSecret;
    use storage_adapters::PgStore;

    let url = settings
        .database
        .url
        .as_ref()
        .context("database.url is not set")?;
    let store = PgStore::connect(url.expose_secret(), settings.database.max_connections)
        .await
        .context("failed to connect to postgres")?;
    let store = Arc::new(store);

    let app = router(AppState::new(store.clone()), settings.server.max_body_bytes);
    let served = serve(listener, app, shutdown_signal()).await;

    // The pool outlives the server so in-flight requests can finish.
    store.close().await;
    served.context("server error")
}

#[cfg(not(feature = "db-postgres"))]
async fn run_postgres(_listener: TcpListener, _settings: &Settings) -> anyhow::Result<()> {
    anyhow::bail!("database.backend = \"postgres\" requires the `db-postgres` feature")
}

/// `RUST_LOG` wins over `log.filter` when set.
fn init_tracing(log: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .with_context(|| format!("invalid log filter {:?}", log.filter))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match log.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| anyhow::anyhow!(err))
}
