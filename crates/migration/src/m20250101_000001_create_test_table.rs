//! Create `test_table`.
//!
//! Backing table of the counter service.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestTable::Table)
                    .if_not_exists()
                    .col(pk_auto(TestTable::Id))
                    .col(integer_null(TestTable::SomeValue))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TestTable::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TestTable { Table, Id, SomeValue }
