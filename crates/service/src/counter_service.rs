use rand::Rng;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::{debug, instrument};

use models::test_row;
use crate::errors::ServiceError;

/// Number of rows in `test_table`.
pub async fn count_rows(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    Ok(test_row::Entity::find().count(db).await?)
}

/// Insert a row with a random `some_value` in `[0, 1000)` and return its id.
#[instrument(skip(db))]
pub async fn insert_random_row(db: &DatabaseConnection) -> Result<i32, ServiceError> {
    let value = rand::thread_rng().gen_range(0..test_row::SOME_VALUE_BOUND);
    let res = test_row::Entity::insert(test_row::new_row(value)).exec(db).await?;
    debug!(row_id = res.last_insert_id, some_value = value, "inserted row");
    Ok(res.last_insert_id)
}
