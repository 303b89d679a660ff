//! Storage browsing route
//!
//! Resolves a slash-delimited folder path against the static tree and joins
//! the node's file references with live metadata from the store.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::store::{FileMetadata, FileStore};
use crate::tree::{Breadcrumb, FileRef, FolderNode};

use super::error::ApiError;

// ============================================================================
// ROUTES
// ============================================================================

pub fn storage_routes() -> Router<AppState> {
    Router::new().route("/storage", get(browse))
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Deserialize)]
struct StorageQuery {
    #[serde(default)]
    path: String,
}

#[derive(Debug, Serialize)]
pub struct FolderItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct FileItem {
    pub id: Uuid,
    pub label: String,
    pub meta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Serialize)]
pub struct StorageResponse {
    pub id: String,
    pub label: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub folders: Vec<FolderItem>,
    pub files: Vec<FileItem>,
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn browse(
    State(state): State<AppState>,
    Query(query): Query<StorageQuery>,
) -> Result<Json<StorageResponse>, ApiError> {
    let segments: Vec<&str> = query.path.split('/').filter(|s| !s.is_empty()).collect();

    let resolved = state
        .tree
        .resolve(&segments)
        .ok_or_else(|| ApiError::NotFound("Папка не найдена".into()))?;

    Ok(Json(build_listing(resolved.node, resolved.breadcrumbs, &state.files)))
}

// ============================================================================
// RESPONSE BUILDER
// ============================================================================

/// Project a resolved folder node into the externally visible listing.
pub fn build_listing(
    node: &FolderNode,
    breadcrumbs: Vec<Breadcrumb>,
    files: &FileStore,
) -> StorageResponse {
    let folders = node
        .folders
        .iter()
        .map(|child| FolderItem { id: child.id.to_string(), label: child.label.to_string() })
        .collect();

    let files = node
        .files
        .iter()
        .filter_map(|reference| build_file_item(reference, files))
        .collect();

    StorageResponse {
        id: node.id.to_string(),
        label: node.label.to_string(),
        breadcrumbs,
        folders,
        files,
    }
}

/// Join one file reference against the store.
///
/// A reference whose metadata is missing or soft-deleted is omitted from the
/// listing; deletes rely on this lazy-consistency view.
fn build_file_item(reference: &FileRef, files: &FileStore) -> Option<FileItem> {
    let metadata = match files.get(reference.file_id) {
        Some(metadata) if !metadata.is_deleted => metadata,
        Some(_) => {
            tracing::debug!(file_id = %reference.file_id, "reference omitted: metadata deleted");
            return None;
        }
        None => {
            tracing::debug!(file_id = %reference.file_id, "reference omitted: metadata missing");
            return None;
        }
    };

    let preview = if metadata.content_type.starts_with("image/") {
        Some(format!("/api/files/{}", metadata.uuid))
    } else {
        reference.preview.map(str::to_string)
    };

    Some(FileItem {
        id: metadata.uuid,
        label: metadata.filename.clone(),
        meta: display_meta(&metadata),
        preview,
    })
}

/// `"<EXTENSION> • <human size>"`; falls back to the content type when the
/// filename has no suffix.
fn display_meta(metadata: &FileMetadata) -> String {
    let extension = match metadata.filename.rsplit_once('.') {
        Some((_, suffix)) => suffix.to_uppercase(),
        None => metadata.content_type.to_uppercase(),
    };
    format!("{extension} • {}", format_size(metadata.size))
}

/// Binary-prefix size with Russian unit labels. Whole numbers at ten units
/// and above (and always in bytes), one decimal place below.
fn format_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["Б", "КБ", "МБ", "ГБ"];

    if size == 0 {
        return "0 Б".to_string();
    }

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value >= 10.0 || unit == 0 {
        format!("{} {}", value.round() as u64, UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn sizes_use_binary_russian_units() {
        assert_eq!(format_size(0), "0 Б");
        assert_eq!(format_size(1), "1 Б");
        assert_eq!(format_size(1023), "1023 Б");
        assert_eq!(format_size(1024), "1.0 КБ");
        assert_eq!(format_size(8 * 1024), "8.0 КБ");
        assert_eq!(format_size(860 * 1024), "860 КБ");
        assert_eq!(format_size(5 * 1024 * 1024 + 200 * 1024), "5.2 МБ");
        assert_eq!(format_size(230 * 1024 * 1024), "230 МБ");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 ГБ");
        // ГБ is the last unit; it never rolls over.
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5120 ГБ");
    }

    #[test]
    fn meta_prefers_the_filename_suffix() {
        assert_eq!(display_meta(&metadata("Moodboard.png", "image/png", 100)), "PNG • 100 Б");
        assert_eq!(
            display_meta(&metadata("archive.tar.gz", "application/gzip", 2048)),
            "GZ • 2.0 КБ"
        );
    }

    #[test]
    fn meta_falls_back_to_content_type() {
        assert_eq!(display_meta(&metadata("README", "text/plain", 10)), "TEXT/PLAIN • 10 Б");
    }

    #[test]
    fn image_files_get_direct_previews() {
        let store = FileStore::standard();
        let id = crate::store::seed::id_for_alias("moodboard").unwrap();
        let reference = FileRef { file_id: id, preview: Some("/window.svg") };

        let item = build_file_item(&reference, &store).unwrap();
        assert_eq!(item.preview.as_deref(), Some(format!("/api/files/{id}").as_str()));
    }

    #[test]
    fn non_image_files_use_the_static_hint() {
        let store = FileStore::standard();
        let deck = crate::store::seed::id_for_alias("marketing-deck").unwrap();
        let item = build_file_item(&FileRef { file_id: deck, preview: Some("/globe.svg") }, &store)
            .unwrap();
        assert_eq!(item.preview.as_deref(), Some("/globe.svg"));

        let roadmap = crate::store::seed::id_for_alias("roadmap").unwrap();
        let item = build_file_item(&FileRef { file_id: roadmap, preview: None }, &store).unwrap();
        assert!(item.preview.is_none());
    }

    #[test]
    fn deleted_and_dangling_references_are_omitted() {
        let store = FileStore::standard();
        let id = crate::store::seed::id_for_alias("roadmap").unwrap();
        store.soft_delete(id).unwrap();
        assert!(build_file_item(&FileRef { file_id: id, preview: None }, &store).is_none());

        let dangling = FileRef { file_id: Uuid::new_v4(), preview: None };
        assert!(build_file_item(&dangling, &store).is_none());
    }

    fn metadata(filename: &str, content_type: &str, size: u64) -> FileMetadata {
        let now = Utc::now();
        FileMetadata {
            uuid: Uuid::new_v4(),
            owner_id: 101,
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            size,
            is_deleted: false,
            upload_time: now,
            update_time: now,
            deleted_time: None,
        }
    }
}
