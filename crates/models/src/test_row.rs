//! Row of the counter service's `test_table`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_table")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub some_value: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Upper bound (exclusive) of `some_value`.
pub const SOME_VALUE_BOUND: i32 = 1000;

/// Fresh row with the given value; `id` is left to the database.
pub fn new_row(some_value: i32) -> ActiveModel {
    ActiveModel {
        some_value: sea_orm::Set(Some(some_value)),
        ..Default::default()
    }
}
