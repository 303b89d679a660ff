//! File operations routes
//!
//! Upload, paged listing, download, replace-contents, soft delete, metadata,
//! and rename. These operate on the metadata store directly; the folder tree
//! is not consulted here.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::store::{FileMetadata, ListOptions};

use super::error::ApiError;

/// Filename recorded when the client sends a blank one.
const UNNAMED_FILE: &str = "Безымянный файл";

const MAX_FILENAME_CHARS: usize = 50;

// ============================================================================
// ROUTES
// ============================================================================

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(upload_file))
        .route("/files/list", post(list_files))
        .route(
            "/files/:id",
            get(download_file).post(replace_file).delete(delete_file),
        )
        .route("/files/:id/meta", get(file_meta))
        .route("/files/:id/name", post(rename_file))
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Deserialize)]
struct UpdateFilenameRequest {
    #[serde(default)]
    filename: String,
}

/// The `file` part of a multipart upload, as received.
struct UploadedFile {
    filename: String,
    content_type: String,
    content: Vec<u8>,
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FileMetadata>, ApiError> {
    let upload = read_file_field(multipart).await?;

    let filename = if upload.filename.is_empty() {
        UNNAMED_FILE.to_string()
    } else {
        upload.filename
    };
    let content_type = if upload.content_type.is_empty() {
        guess_content_type(&filename)
    } else {
        upload.content_type
    };

    let metadata = state.files.create(upload.content, &filename, &content_type);
    tracing::info!(file_id = %metadata.uuid, size = metadata.size, "file uploaded");
    Ok(Json(metadata))
}

async fn list_files(
    State(state): State<AppState>,
    body: Result<Json<ListOptions>, JsonRejection>,
) -> Result<Json<Vec<FileMetadata>>, ApiError> {
    let Json(options) = body.map_err(|_| ApiError::BadRequest("Wrong JSON format".into()))?;

    if options.limit.is_some_and(|limit| limit < 0)
        || options.offset.is_some_and(|offset| offset < 0)
    {
        return Err(ApiError::BadRequest("Invalid URL params".into()));
    }

    Ok(Json(state.files.list(options)))
}

async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let (metadata, content) = state
        .files
        .content(id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;

    if metadata.is_deleted {
        return Err(ApiError::Forbidden("User have no access to this content".into()));
    }

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&metadata.filename)
    );
    Ok((
        [
            (header::CONTENT_TYPE, metadata.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response())
}

async fn replace_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    ensure_available(&state, id)?;

    let upload = read_file_field(multipart).await?;
    state
        .files
        .replace_contents(id, upload.content, &upload.filename, &upload.content_type)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;

    tracing::info!(file_id = %id, "file contents replaced");
    Ok(Json(serde_json::Value::Null))
}

async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    state
        .files
        .soft_delete(id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;

    tracing::info!(file_id = %id, "file soft-deleted");
    Ok(Json(serde_json::Value::Null))
}

async fn file_meta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileMetadata>, ApiError> {
    let id = parse_id(&id)?;
    let metadata = state
        .files
        .get(id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;
    Ok(Json(metadata))
}

async fn rename_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateFilenameRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::BadRequest("Wrong JSON format".into()))?;

    let filename = req.filename.trim();
    if filename.is_empty() || filename.chars().count() > MAX_FILENAME_CHARS {
        return Err(ApiError::BadRequest(
            "Filename must have length between 1 and 50".into(),
        ));
    }

    let id = parse_id(&id)?;
    ensure_available(&state, id)?;

    state
        .files
        .rename(id, filename)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;

    tracing::info!(file_id = %id, "file renamed");
    Ok(Json(serde_json::Value::Null))
}

// ============================================================================
// HELPERS
// ============================================================================

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid ID format".into()))
}

/// Unknown id is 400, soft-deleted content is 403.
fn ensure_available(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    let metadata = state
        .files
        .get(id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".into()))?;
    if metadata.is_deleted {
        return Err(ApiError::Forbidden("User have no access to this content".into()));
    }
    Ok(())
}

/// Pull the `file` field out of a multipart form.
async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedFile, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::BadRequest("Wrong form format".into()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Wrong form format".into()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|_| ApiError::BadRequest("Wrong form format".into()))?
            .to_vec();

        return Ok(UploadedFile { filename, content_type, content });
    }

    Err(ApiError::BadRequest("Wrong form format".into()))
}

fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}
