//! Persistence startup and shutdown hooks.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::{AppConfig, DatabaseBackend};
use crate::error::DatabaseError;

/// Connect to the configured backend and bring the schema up to date.
///
/// Any failure is logged and returned; callers are expected to abort startup.
#[tracing::instrument(skip_all)]
pub async fn init_db(config: &AppConfig) -> Result<DatabaseConnection, DatabaseError> {
    tracing::info!("Initializing database connection...");
    let backend = config.database_backend();
    if let DatabaseBackend::Sqlite { path } = &backend {
        tracing::info!(
            path = %path.display(),
            "DATABASE_URL not provided or not PostgreSQL, using SQLite"
        );
    }
    tracing::info!(backend = backend.name(), "Using {} database", backend.name());

    let db = connect(&backend.connection_url()).await.inspect_err(|e| {
        tracing::error!(error = %e, "Failed to initialize database");
    })?;
    tracing::info!("Database initialized successfully");
    Ok(db)
}

/// Open a connection and apply all pending migrations.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DatabaseError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(DatabaseError::Connect)?;
    Migrator::up(&db, None)
        .await
        .map_err(DatabaseError::Migrate)?;
    Ok(db)
}

/// Close all pooled connections.
#[tracing::instrument(skip_all)]
pub async fn close_db(db: DatabaseConnection) -> Result<(), DatabaseError> {
    tracing::info!("Closing database connections...");
    db.close().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to close database connections");
        DatabaseError::Close(e)
    })?;
    tracing::info!("Database connections closed successfully");
    Ok(())
}
