#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh in-memory database with both tables in place; every call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::ensure_counter_schema(&db).await?;
    migration::ensure_album_schema(&db).await?;
    Ok(db)
}
