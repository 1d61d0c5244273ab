use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};
use tracing::{info, instrument};

use models::album;
use crate::errors::ServiceError;

/// Result of a stored album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAlbum {
    pub album_id: String,
    pub image_size: usize,
}

/// Store `image` and `profile` under a freshly generated id.
///
/// One INSERT; an id collision surfaces as [`ServiceError::Db`] and is not retried.
#[instrument(skip(db, image, profile), fields(image_size = image.len()))]
pub async fn create_album(
    db: &DatabaseConnection,
    image: Vec<u8>,
    profile: Vec<u8>,
) -> Result<CreatedAlbum, ServiceError> {
    let album_id = album::new_album_id();
    let image_size = image.len();
    album::Entity::insert(album::new_album(album_id.clone(), image, profile))
        .exec_without_returning(db)
        .await?;
    info!(album_id = %album_id, image_size, "album stored");
    Ok(CreatedAlbum { album_id, image_size })
}

/// Stored profile bytes of `album_id`, exactly as they were written.
pub async fn get_profile(db: &DatabaseConnection, album_id: &str) -> Result<Vec<u8>, ServiceError> {
    if album_id.is_empty() {
        return Err(ServiceError::Validation("album id is required".into()));
    }
    album::Entity::find_by_id(album_id.to_string())
        .select_only()
        .column(album::Column::Profile)
        .into_tuple::<Vec<u8>>()
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("album"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_then_get_profile() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let profile = r#"{"artist":"Sex Pistols","title":"Never Mind The Bollocks!","year":"1977"}"#;
        let created = create_album(&db, vec![0u8; 1234], profile.as_bytes().to_vec()).await?;
        assert_eq!(created.image_size, 1234);
        assert_eq!(created.album_id.len(), 36);
        assert_eq!(get_profile(&db, &created.album_id).await?, profile.as_bytes());
        Ok(())
    }

    #[tokio::test]
    async fn profile_is_not_validated() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let profiles: [&[u8]; 6] = [
            b"",
            b"not json at all",
            b"{\"unterminated\": ",
            b"  {\"a\" : 1}  ",
            b"\xEF\xBB\xBF{\"bom\":true}",
            b"{\xff\xfe}",
        ];
        for profile in profiles {
            let created = create_album(&db, b"img".to_vec(), profile.to_vec()).await?;
            assert_eq!(get_profile(&db, &created.album_id).await?, profile);
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = get_profile(&db, "00000000-0000-0000-0000-000000000000").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "album not found");
        Ok(())
    }

    #[tokio::test]
    async fn empty_id_is_validation_error() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = get_profile(&db, "").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_distinct() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_album(&db, vec![1], Vec::new()).await?;
        let b = create_album(&db, vec![2], Vec::new()).await?;
        assert_ne!(a.album_id, b.album_id);
        assert_eq!(album::Entity::find().count(&db).await?, 2);
        Ok(())
    }
}
