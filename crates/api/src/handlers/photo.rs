//! Handlers for the `/photo` resource, including multipart upload.

use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use myfamily_core::error::CoreError;
use myfamily_core::types::DbId;
use myfamily_core::upload::{
    probe_image, stored_file_name, validate_extension, validate_external_url, validate_size,
};
use myfamily_db::models::photo::{CreatePhoto, Photo, StoredUpload, UpdatePhoto};
use myfamily_db::repositories::PhotoRepo;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::family::{ensure_family_exists, find_family};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{ensure_owner_or_admin, RequireAuth};
use crate::query::FamilyScopeParams;
use crate::state::AppState;

/// URL prefix under which the upload directory is served.
const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// POST /api/photo
///
/// Register a photo that is already hosted somewhere (`image_url`).
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreatePhoto>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    input.validate()?;
    validate_external_url(&input.image_url)?;
    ensure_family_exists(&state, input.family_id).await?;
    let photo = PhotoRepo::create(&state.pool, user.user_id, &input, None).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// POST /api/photo/upload (multipart/form-data)
///
/// Fields: `file` (required), `family_id`, `title`, and optional
/// `description`, `date_taken` (`YYYY-MM-DD`), `location`.
pub async fn upload(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Photo>)> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            form.file = Some((file_name, bytes.to_vec()));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
            form.set_text(&name, value);
        }
    }

    let (file_name, data) = form
        .file
        .take()
        .ok_or_else(|| CoreError::Validation("Missing 'file' field".into()))?;
    let ext = validate_extension(&file_name)?;
    validate_size(data.len(), state.config.max_upload_bytes)?;
    let info = probe_image(&data)?;

    let mut input = form.into_create()?;
    let relative = stored_file_name(input.family_id, &Uuid::new_v4().simple().to_string(), &ext);
    input.image_url = format!("{UPLOADS_URL_PREFIX}{relative}");
    input.validate()?;
    ensure_family_exists(&state, input.family_id).await?;

    let path = state.config.upload_dir.join(&relative);
    write_upload(&path, &data).await?;

    let stored = StoredUpload {
        storage_path: relative,
        width: info.width as i32,
        height: info.height as i32,
    };
    let photo = match PhotoRepo::create(&state.pool, user.user_id, &input, Some(&stored)).await {
        Ok(photo) => photo,
        Err(e) => {
            remove_upload(&path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        photo_id = photo.id,
        family_id = photo.family_id,
        format = info.format,
        bytes = data.len(),
        "Photo uploaded"
    );
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /api/photo?family_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FamilyScopeParams>,
) -> AppResult<Json<Vec<Photo>>> {
    Ok(Json(PhotoRepo::list(&state.pool, params.family_id).await?))
}

/// GET /api/photo/family/{family_id}
pub async fn list_by_family(
    State(state): State<AppState>,
    Path(family_id): Path<DbId>,
) -> AppResult<Json<Vec<Photo>>> {
    find_family(&state, family_id).await?;
    Ok(Json(PhotoRepo::list(&state.pool, Some(family_id)).await?))
}

/// GET /api/photo/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Photo>> {
    Ok(Json(find_photo(&state, id).await?))
}

/// PUT /api/photo/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<Photo>> {
    input.validate()?;
    if let Some(url) = &input.image_url {
        validate_external_url(url)?;
    }
    let existing = find_photo(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Photo")?;

    let photo = PhotoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Photo", id))?;
    Ok(Json(photo))
}

/// DELETE /api/photo/{id}
///
/// A file stored by `upload` is removed from disk as well. `image_url` is
/// never used to locate it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_photo(&state, id).await?;
    ensure_owner_or_admin(&user, existing.created_by_user_id, "Photo")?;

    if !PhotoRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Photo", id).into());
    }
    if let Some(relative) = existing.storage_path.as_deref() {
        remove_upload(&state.config.upload_dir.join(relative)).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_photo(state: &AppState, id: DbId) -> AppResult<Photo> {
    PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Photo", id).into())
}

/// Text fields collected from the multipart body.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Vec<u8>)>,
    family_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    date_taken: Option<String>,
    location: Option<String>,
}

impl UploadForm {
    fn set_text(&mut self, name: &str, value: String) {
        let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
        match name {
            "family_id" | "familyId" => self.family_id = value,
            "title" => self.title = value,
            "description" => self.description = value,
            "date_taken" | "dateTaken" => self.date_taken = value,
            "location" => self.location = value,
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    /// The photo DTO with an empty `image_url`; the caller fills it in.
    fn into_create(self) -> Result<CreatePhoto, CoreError> {
        let family_id = self
            .family_id
            .ok_or_else(|| CoreError::Validation("Missing 'family_id' field".into()))?
            .parse::<DbId>()
            .map_err(|_| CoreError::Validation("'family_id' must be an integer".into()))?;
        let title = self
            .title
            .ok_or_else(|| CoreError::Validation("Missing 'title' field".into()))?;
        let date_taken = self
            .date_taken
            .map(|d| {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|_| {
                    CoreError::Validation(format!("'date_taken' must be YYYY-MM-DD, got '{d}'"))
                })
            })
            .transpose()?;

        Ok(CreatePhoto {
            family_id,
            title,
            description: self.description,
            image_url: String::new(),
            date_taken,
            location: self.location,
        })
    }
}

async fn write_upload(path: &FsPath, data: &[u8]) -> AppResult<()> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create {}: {e}", dir.display())))?;
    }
    tokio::fs::write(path, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write {}: {e}", path.display())))
}

async fn remove_upload(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove uploaded file");
    }
}
