//! In-memory file metadata and content store.
//!
//! The store is constructed explicitly with its seed data and passed around
//! through application state; there is no hidden process-wide singleton.
//! Deletion is soft: content stays in the map and listings filter on the flag.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::seed::{FileSeed, DEFAULT_OWNER_ID, FILE_SEEDS};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// Minutes between the staggered timestamps of consecutive seed entries.
/// Keeps the seeded listing order deterministic (earlier seed = more recent).
const SEED_STAGGER_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub uuid: Uuid,
    pub owner_id: i64,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub is_deleted: bool,
    pub upload_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub deleted_time: Option<DateTime<Utc>>,
}

/// Metadata plus raw content, exclusively owned by the store.
#[derive(Debug, Clone)]
struct StoredFile {
    metadata: FileMetadata,
    content: Vec<u8>,
}

/// Listing options as they arrive on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub with_deleted: bool,
}

pub struct FileStore {
    files: RwLock<HashMap<Uuid, StoredFile>>,
    seeds: &'static [FileSeed],
}

impl FileStore {
    /// Build a store populated from the given seed table.
    pub fn with_seeds(seeds: &'static [FileSeed]) -> Self {
        let store = FileStore {
            files: RwLock::new(HashMap::new()),
            seeds,
        };
        store.reset();
        store
    }

    /// The standard store backing the mock API.
    pub fn standard() -> Self {
        Self::with_seeds(FILE_SEEDS)
    }

    /// Drop everything and re-seed. Used for test isolation.
    pub fn reset(&self) {
        let mut files = self.files.write();
        files.clear();

        let now = Utc::now();
        for (index, seed) in self.seeds.iter().enumerate() {
            let Ok(uuid) = Uuid::parse_str(seed.uuid) else {
                tracing::warn!(alias = seed.alias, "skipping seed with malformed uuid");
                continue;
            };
            let content = seed.content.as_bytes().to_vec();
            let timestamp = now - Duration::minutes(index as i64 * SEED_STAGGER_MINUTES);
            let metadata = FileMetadata {
                uuid,
                owner_id: DEFAULT_OWNER_ID,
                filename: seed.filename.to_string(),
                content_type: seed.content_type.to_string(),
                size: content.len() as u64,
                is_deleted: false,
                upload_time: timestamp,
                update_time: timestamp,
                deleted_time: None,
            };
            files.insert(uuid, StoredFile { metadata, content });
        }
    }

    /// Store a new file under a fresh identifier.
    pub fn create(&self, content: Vec<u8>, filename: &str, content_type: &str) -> FileMetadata {
        let now = Utc::now();
        let metadata = FileMetadata {
            uuid: Uuid::new_v4(),
            owner_id: DEFAULT_OWNER_ID,
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            size: content.len() as u64,
            is_deleted: false,
            upload_time: now,
            update_time: now,
            deleted_time: None,
        };

        let mut files = self.files.write();
        files.insert(metadata.uuid, StoredFile { metadata: metadata.clone(), content });
        metadata
    }

    pub fn get(&self, id: Uuid) -> Option<FileMetadata> {
        self.files.read().get(&id).map(|stored| stored.metadata.clone())
    }

    /// Metadata together with the raw bytes, for downloads.
    pub fn content(&self, id: Uuid) -> Option<(FileMetadata, Vec<u8>)> {
        self.files
            .read()
            .get(&id)
            .map(|stored| (stored.metadata.clone(), stored.content.clone()))
    }

    /// Page through metadata, most recently touched first.
    ///
    /// Soft-deleted entries are filtered out unless `with_deleted` is set.
    /// Limit is clamped to [0, 100] with a default of 20; a limit of zero
    /// yields an empty page regardless of offset.
    pub fn list(&self, options: ListOptions) -> Vec<FileMetadata> {
        let limit = clamp_limit(options.limit);
        let offset = clamp_offset(options.offset);

        let files = self.files.read();
        let mut items: Vec<FileMetadata> = files
            .values()
            .filter(|stored| options.with_deleted || !stored.metadata.is_deleted)
            .map(|stored| stored.metadata.clone())
            .collect();
        items.sort_by(|a, b| b.update_time.cmp(&a.update_time));

        if limit == 0 {
            return Vec::new();
        }
        items.into_iter().skip(offset).take(limit).collect()
    }

    /// Swap the filename. The endpoint layer is responsible for validating
    /// length and non-emptiness before calling.
    pub fn rename(&self, id: Uuid, filename: &str) -> Option<FileMetadata> {
        let mut files = self.files.write();
        let stored = files.get_mut(&id)?;
        stored.metadata.filename = filename.to_string();
        stored.metadata.update_time = Utc::now();
        Some(stored.metadata.clone())
    }

    /// Atomically swap content and the metadata derived from it.
    ///
    /// An empty filename or content type keeps the existing value. Clears the
    /// deletion flag, so re-uploading over a deleted id revives it.
    pub fn replace_contents(
        &self,
        id: Uuid,
        content: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Option<FileMetadata> {
        let mut files = self.files.write();
        let stored = files.get_mut(&id)?;

        if !filename.is_empty() {
            stored.metadata.filename = filename.to_string();
        }
        if !content_type.is_empty() {
            stored.metadata.content_type = content_type.to_string();
        }
        stored.metadata.size = content.len() as u64;
        stored.metadata.update_time = Utc::now();
        stored.metadata.is_deleted = false;
        stored.metadata.deleted_time = None;
        stored.content = content;
        Some(stored.metadata.clone())
    }

    /// Mark a file deleted without discarding its content.
    pub fn soft_delete(&self, id: Uuid) -> Option<FileMetadata> {
        let mut files = self.files.write();
        let stored = files.get_mut(&id)?;
        let now = Utc::now();
        stored.metadata.is_deleted = true;
        stored.metadata.deleted_time = Some(now);
        stored.metadata.update_time = now;
        Some(stored.metadata.clone())
    }
}

fn clamp_limit(limit: Option<i64>) -> usize {
    match limit {
        None => DEFAULT_LIMIT,
        Some(value) if value < 0 => 0,
        Some(value) => (value as usize).min(MAX_LIMIT),
    }
}

fn clamp_offset(offset: Option<i64>) -> usize {
    match offset {
        Some(value) if value > 0 => value as usize,
        _ => 0,
    }
}
