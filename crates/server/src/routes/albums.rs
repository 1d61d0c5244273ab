use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service::{album_service, errors::ServiceError};
use tracing::{error, warn};

use crate::{errors::ApiError, state::AppState};

const IMAGE_FIELD: &str = "image";
const PROFILE_FIELD: &str = "profile";
const IMAGE_REQUIRED: &str = "image file is required";

#[derive(Debug, Serialize)]
pub struct CreateAlbumOutput {
    #[serde(rename = "albumID")]
    pub album_id: String,
    /// Decimal byte count, serialized as a JSON string.
    #[serde(rename = "imageSize")]
    pub image_size: String,
}

/// Parts of the upload form we care about. First occurrence of each field wins.
/// Both are kept as raw bytes: no charset decoding, BOM stripping or UTF-8 repair.
#[derive(Debug, Default)]
struct AlbumForm {
    image: Option<Vec<u8>>,
    profile: Option<Vec<u8>>,
}

fn read_error(e: MultipartError) -> ApiError {
    error!(err = %e, "failed to read multipart body");
    ApiError::internal(format!("failed to read upload: {e}"))
}

async fn read_form(multipart: &mut Multipart) -> Result<AlbumForm, ApiError> {
    let mut form = AlbumForm::default();
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(IMAGE_FIELD) if form.image.is_none() => {
                form.image = Some(field.bytes().await.map_err(read_error)?.to_vec());
            }
            Some(PROFILE_FIELD) if form.profile.is_none() => {
                form.profile = Some(field.bytes().await.map_err(read_error)?.to_vec());
            }
            _ => {}
        }
    }
    Ok(form)
}

/// `POST /albums` (multipart: `image` required, `profile` optional)
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateAlbumOutput>), ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(err = %e, "album upload is not a multipart form");
        ApiError::bad_request(IMAGE_REQUIRED)
    })?;
    let form = read_form(&mut multipart).await?;
    let image = form.image.ok_or_else(|| ApiError::bad_request(IMAGE_REQUIRED))?;

    let created = album_service::create_album(&state.db, image, form.profile.unwrap_or_default())
        .await
        .map_err(|e| {
            error!(err = %e, "album insert failed");
            ApiError::internal(format!("failed to insert album: {e}"))
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAlbumOutput {
            album_id: created.album_id,
            image_size: created.image_size.to_string(),
        }),
    ))
}

/// `GET /albums/:albumID`: the stored profile, byte for byte.
pub async fn get(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> Result<Response, ApiError> {
    let profile = album_service::get_profile(&state.db, &album_id)
        .await
        .map_err(|e| match e {
            ServiceError::Db(_) => {
                error!(album_id = %album_id, err = %e, "album lookup failed");
                ApiError::internal(format!("failed to fetch album: {e}"))
            }
            other => other.into(),
        })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], profile).into_response())
}
