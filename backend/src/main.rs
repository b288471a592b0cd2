//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API with health probes and (in debug builds) Swagger UI.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookstore::domain::starter_catalogue;
use bookstore::inbound::http::health::HealthState;
use bookstore::outbound::memory::InMemoryBookstore;
use bookstore::outbound::persistence::{DbPool, DieselBookCatalogue, run_pending_migrations};
use bookstore::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, StorageBackend, create_server};

async fn prepare_storage(settings: &AppSettings) -> std::io::Result<StorageBackend> {
    let Some(database_url) = settings
        .database_url()
        .map_err(std::io::Error::other)?
    else {
        warn!("no database configured; using in-memory storage");
        let store = Arc::new(InMemoryBookstore::new());
        let seeded = store.seed_books(starter_catalogue());
        info!(books = seeded.len(), "in-memory catalogue seeded");
        return Ok(StorageBackend::Memory(store));
    };

    if settings.run_migrations {
        run_pending_migrations(&database_url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .map_err(std::io::Error::other)?;

    if settings.seed_catalogue {
        let inserted = DieselBookCatalogue::new(pool.clone())
            .seed_if_empty(&starter_catalogue())
            .await
            .map_err(std::io::Error::other)?;
        info!(inserted, "catalogue seeding finished");
    }

    Ok(StorageBackend::Postgres {
        pool,
        operation_timeout: settings.operation_timeout(),
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let storage = prepare_storage(&settings).await?;

    let bind_addr = settings.bind_addr();
    info!(host = %bind_addr.0, port = bind_addr.1, "starting server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, storage))?;
    server.await
}
