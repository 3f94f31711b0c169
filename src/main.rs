//! Gatehouse server: user registration and cookie-carried session tokens.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gatehouse_api::AppState;
use gatehouse_auth::SessionController;
use gatehouse_core::config::{AppConfig, StoreBackend};
use gatehouse_core::error::AppError;
use gatehouse_database::migration::run_migrations;
use gatehouse_database::{DatabasePool, MemoryUserStore, PgUserRepository, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("GATEHOUSE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(%env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Gatehouse v{}", env!("CARGO_PKG_VERSION"));

    let (users, db_pool) = open_user_store(&config).await?;
    let sessions = SessionController::from_config(&config.auth, users)?;

    let result = gatehouse_api::serve(AppState::new(config, sessions)).await;

    if let Some(pool) = db_pool {
        pool.close().await;
    }
    result
}

/// Opens the configured user store. The pool is returned so it can be closed
/// on shutdown.
async fn open_user_store(
    config: &AppConfig,
) -> Result<(Arc<dyn UserStore>, Option<DatabasePool>), AppError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            run_migrations(&pool).await?;
            let users: Arc<dyn UserStore> = Arc::new(PgUserRepository::new(&pool));
            Ok((users, Some(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory user store; accounts are lost on restart");
            Ok((Arc::new(MemoryUserStore::new()), None))
        }
    }
}
