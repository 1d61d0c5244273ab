//! Table definitions for both services.
//!
//! Each service only ever needs its own table to exist, so instead of a
//! history-tracking `Migrator` the definitions are applied directly with
//! `CREATE TABLE IF NOT EXISTS`. Re-running them, or running them from several
//! replicas at once, is harmless.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_test_table;
mod m20250101_000002_create_albums;

use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::info;

/// Ensure `test_table` exists.
pub async fn ensure_counter_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let manager = SchemaManager::new(db);
    m20250101_000001_create_test_table::Migration.up(&manager).await?;
    info!(table = "test_table", "schema ensured");
    Ok(())
}

/// Ensure `albums` exists.
pub async fn ensure_album_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let manager = SchemaManager::new(db);
    m20250101_000002_create_albums::Migration.up(&manager).await?;
    info!(table = "albums", "schema ensured");
    Ok(())
}
