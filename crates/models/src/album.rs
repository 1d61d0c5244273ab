//! An album: an image blob plus an opaque profile, keyed by a generated UUID.
use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "albumID")]
    pub album_id: String,
    pub image: Vec<u8>,
    /// JSON text as uploaded, kept as raw bytes; never parsed or re-encoded.
    pub profile: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Canonical hyphenated UUID v4, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub fn new_album_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn new_album(album_id: String, image: Vec<u8>, profile: Vec<u8>) -> ActiveModel {
    ActiveModel {
        album_id: Set(album_id),
        image: Set(image),
        profile: Set(profile),
    }
}
