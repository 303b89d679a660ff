//! Client-side upload orchestration.
//!
//! One upload request per selected file, dispatched concurrently with no cap
//! and no retry; a failed task stays failed. The visible file list is updated
//! optimistically on success and later reconciled against an authoritative
//! listing fetch.

use std::collections::HashSet;

use serde::Deserialize;
use uuid::Uuid;

use crate::store::FileMetadata;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The server answered non-2xx with a decodable status message.
    #[error("{0}")]
    Rejected(String),
    /// Transport failure or an undecodable response.
    #[error("Не удалось загрузить файл")]
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error { message: String },
}

/// Ephemeral per-file upload state. Discarded when the upload dialog goes
/// away; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: Uuid,
    pub filename: String,
    pub size: u64,
    pub status: UploadStatus,
    /// Server-assigned identifier, recorded on success.
    pub file_id: Option<Uuid>,
}

impl UploadTask {
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        UploadTask {
            id: Uuid::new_v4(),
            filename: filename.into(),
            size,
            status: UploadStatus::Pending,
            file_id: None,
        }
    }

    /// The task's request has been dispatched.
    pub fn start(&mut self) {
        if self.status == UploadStatus::Pending {
            self.status = UploadStatus::Uploading;
        }
    }

    /// 2xx response carrying the created metadata. Terminal.
    pub fn complete(&mut self, metadata: &FileMetadata) {
        if self.status == UploadStatus::Uploading {
            self.file_id = Some(metadata.uuid);
            self.status = UploadStatus::Success;
        }
    }

    /// Non-2xx response or transport failure. Terminal.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status == UploadStatus::Uploading {
            self.status = UploadStatus::Error { message: message.into() };
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, UploadStatus::Success | UploadStatus::Error { .. })
    }
}

/// A file picked for upload: display name plus its bytes.
#[derive(Debug, Clone)]
pub struct Selection {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    status: String,
}

impl UploadClient {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        UploadClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload every selection concurrently and return the settled tasks.
    pub async fn dispatch(&self, selections: Vec<Selection>) -> Vec<UploadTask> {
        let uploads = selections.into_iter().map(|selection| {
            let mut task = UploadTask::new(selection.filename.clone(), selection.content.len() as u64);
            async move {
                task.start();
                match self.upload(selection).await {
                    Ok(metadata) => task.complete(&metadata),
                    Err(err) => task.fail(err.to_string()),
                }
                task
            }
        });

        futures::future::join_all(uploads).await
    }

    async fn upload(&self, selection: Selection) -> Result<FileMetadata, UploadError> {
        let mut part = reqwest::multipart::Part::bytes(selection.content)
            .file_name(selection.filename.clone());
        if let Some(content_type) = &selection.content_type {
            part = part.mime_str(content_type).map_err(|_| UploadError::Transport)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/files", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|_| UploadError::Transport)?;

        if response.status().is_success() {
            response
                .json::<FileMetadata>()
                .await
                .map_err(|_| UploadError::Transport)
        } else {
            // Prefer the server's status text when the body decodes.
            match response.json::<ErrorBody>().await {
                Ok(body) => Err(UploadError::Rejected(body.status)),
                Err(_) => Err(UploadError::Transport),
            }
        }
    }
}

/// Merge the optimistic local list with an authoritative server listing.
///
/// Local entries whose id also appears in the server list are dropped; the
/// remainder is concatenated ahead of the authoritative list, so the server
/// wins on every collision.
pub fn reconcile(local: Vec<FileMetadata>, authoritative: Vec<FileMetadata>) -> Vec<FileMetadata> {
    let server_ids: HashSet<Uuid> = authoritative.iter().map(|item| item.uuid).collect();

    let mut merged: Vec<FileMetadata> = local
        .into_iter()
        .filter(|item| !server_ids.contains(&item.uuid))
        .collect();
    merged.extend(authoritative);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn metadata(uuid: Uuid, filename: &str) -> FileMetadata {
        let now = Utc::now();
        FileMetadata {
            uuid,
            owner_id: 101,
            filename: filename.to_string(),
            content_type: "text/plain".to_string(),
            size: 4,
            is_deleted: false,
            upload_time: now,
            update_time: now,
            deleted_time: None,
        }
    }

    #[test]
    fn happy_path_transitions() {
        let mut task = UploadTask::new("a.txt", 4);
        assert_eq!(task.status, UploadStatus::Pending);

        task.start();
        assert_eq!(task.status, UploadStatus::Uploading);

        let meta = metadata(Uuid::new_v4(), "a.txt");
        task.complete(&meta);
        assert_eq!(task.status, UploadStatus::Success);
        assert_eq!(task.file_id, Some(meta.uuid));
        assert!(task.is_settled());
    }

    #[test]
    fn failure_carries_the_message() {
        let mut task = UploadTask::new("a.txt", 4);
        task.start();
        task.fail(UploadError::Rejected("Wrong form format".into()).to_string());
        assert_eq!(task.status, UploadStatus::Error { message: "Wrong form format".into() });
        assert!(task.is_settled());
    }

    #[test]
    fn transport_failures_use_the_generic_message() {
        assert_eq!(UploadError::Transport.to_string(), "Не удалось загрузить файл");
    }

    #[test]
    fn terminal_states_are_sticky() {
        let mut task = UploadTask::new("a.txt", 4);
        task.start();
        task.fail("boom");
        let meta = metadata(Uuid::new_v4(), "a.txt");
        task.complete(&meta);
        assert_eq!(task.status, UploadStatus::Error { message: "boom".into() });
        assert!(task.file_id.is_none());

        // complete/fail do nothing before dispatch either
        let mut idle = UploadTask::new("b.txt", 1);
        idle.complete(&meta);
        idle.fail("late");
        assert_eq!(idle.status, UploadStatus::Pending);
    }

    #[test]
    fn reconcile_drops_confirmed_optimistic_entries() {
        let shared = Uuid::new_v4();
        let local_only = Uuid::new_v4();
        let server_only = Uuid::new_v4();

        let local = vec![metadata(shared, "local copy.txt"), metadata(local_only, "pending.txt")];
        let server = vec![metadata(shared, "server copy.txt"), metadata(server_only, "old.txt")];

        let merged = reconcile(local, server);
        let names: Vec<_> = merged.iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(names, ["pending.txt", "server copy.txt", "old.txt"]);
    }

    #[test]
    fn reconcile_with_empty_sides() {
        let item = metadata(Uuid::new_v4(), "a.txt");
        assert_eq!(reconcile(vec![item.clone()], Vec::new()), vec![item.clone()]);
        assert_eq!(reconcile(Vec::new(), vec![item.clone()]), vec![item]);
    }
}
