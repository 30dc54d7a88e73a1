//! Process startup: logging, store selection, catalog seeding.
//!
//! Everything here returns [`StartupError`]; only `main` decides to exit.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pricebook_core::catalog::NewProduct;
use pricebook_core::error::CoreError;
use pricebook_core::memory::InMemoryStore;
use pricebook_core::service::ResolutionService;
use pricebook_core::store::{AccountStore, CatalogStore};
use pricebook_db::{PgAccountStore, PgCatalogStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, ServerConfig, StoreBackend};
use crate::state::AppState;

/// Default `RUST_LOG`-style filter when none is set.
const DEFAULT_LOG_FILTER: &str = "pricebook_api=debug,pricebook_core=debug,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DATABASE_URL must be set when STORE_BACKEND=postgres")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to read catalog seed {}: {source}", .path.display())]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog seed {}: {source}", .path.display())]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid catalog product '{sku}': {reasons}")]
    SeedProduct { sku: String, reasons: String },

    #[error("Store error: {0}")]
    Store(#[from] CoreError),

    #[error("Invalid bind address '{0}'")]
    BindAddress(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`; `json` switches the fmt layer to JSON lines.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect the configured store backend and assemble the [`AppState`].
pub async fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let (catalog, accounts) = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(StartupError::MissingDatabaseUrl)?;

            let pool = pricebook_db::create_pool(database_url, config.db_max_connections).await?;
            tracing::info!("Database connection pool created");

            pricebook_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            pricebook_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let catalog: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(pool.clone()));
            let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(pool));
            (catalog, accounts)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            let catalog: Arc<dyn CatalogStore> = store.clone();
            let accounts: Arc<dyn AccountStore> = store;
            (catalog, accounts)
        }
    };

    if let Some(path) = &config.catalog_seed_path {
        let count = seed_catalog(catalog.as_ref(), path).await?;
        tracing::info!(count, path = %path.display(), "Catalog seeded");
    }

    Ok(AppState {
        service: Arc::new(ResolutionService::new(catalog, accounts)),
        config: Arc::new(config.clone()),
    })
}

/// Upsert every product in the JSON array at `path`.
///
/// The whole file is checked before anything is written.
pub async fn seed_catalog(catalog: &dyn CatalogStore, path: &Path) -> Result<usize, StartupError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
    let products: Vec<NewProduct> =
        serde_json::from_str(&raw).map_err(|source| StartupError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;

    let products: Vec<NewProduct> = products.iter().map(NewProduct::normalized).collect();
    if let Some(bad) = products.iter().find(|p| !p.violations().is_empty()) {
        return Err(StartupError::SeedProduct {
            sku: bad.sku.clone(),
            reasons: bad.violations().join(", "),
        });
    }

    for product in &products {
        catalog.upsert_product(product).await?;
    }
    Ok(products.len())
}
