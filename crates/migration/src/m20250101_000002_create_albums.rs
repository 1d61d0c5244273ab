//! Create `albums` table.
//!
//! `albumID` keeps its mixed-case name. `image` and `profile` are both raw bytes;
//! the profile is echoed back exactly as uploaded, so it must not go through a
//! text column's charset handling.
use sea_orm_migration::{prelude::*, schema::*};
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(Albums::Table)
                    .if_not_exists()
                    .col(string_len(Albums::AlbumId, 36).primary_key())
                    .col(large_blob(backend, Albums::Image))
                    .col(large_blob(backend, Albums::Profile))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Albums::Table).to_owned()).await
    }
}

fn large_blob(backend: DatabaseBackend, col: Albums) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    match backend {
        // plain BLOB caps out at 64 KiB
        DatabaseBackend::MySql => def.custom(Alias::new("LONGBLOB")),
        _ => def.blob(),
    };
    def.not_null();
    def
}

#[derive(DeriveIden)]
enum Albums {
    Table,
    #[sea_orm(iden = "albumID")]
    AlbumId,
    Image,
    Profile,
}
