//! Account Service Library
//!
//! This crate provides account registration, lookup and credential
//! validation over HTTP, backed by Postgres.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AccountServiceConfig;
use crate::infra::Database;
use crate::repository::AccountStore;
use crate::service::AccountManager;
use domain::Argon2Hasher;

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    db.close().await?;
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server with the given configuration until Ctrl-C.
pub async fn run_with_config(config: AccountServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database (applies pending migrations)
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    // Create repository, hasher and service
    let account_repo = Arc::new(AccountStore::new(db.shared_connection()));
    let cost = config.password_hash;
    let hasher = Arc::new(Argon2Hasher::with_cost(
        cost.memory_kib,
        cost.iterations,
        cost.parallelism,
    )?);
    let account_service = Arc::new(AccountManager::new(account_repo, hasher));

    let state = AppState::new(account_service, config.service.service_name.clone());
    let app = create_router(
        state,
        Duration::from_secs(config.service.request_timeout_secs),
    );

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(service = %config.service.service_name, "Account service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing database pool");
    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
