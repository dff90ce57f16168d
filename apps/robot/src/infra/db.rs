use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, redact_db_url, DbProfile};
use crate::error::AppError;

/// Connects to the database for `profile`. Does not run migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    info!(url = %redact_db_url(&url), ?profile, "Connecting to database");

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await?;
    Ok(conn)
}

/// Applies pending migrations.
pub async fn migrate_up(conn: &DatabaseConnection) -> Result<(), AppError> {
    migrate(conn, MigrationCommand::Up).await?;
    Ok(())
}
