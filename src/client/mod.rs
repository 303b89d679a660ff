//! Client-side helpers: upload task orchestration and list reconciliation.

pub mod uploads;

pub use uploads::{reconcile, Selection, UploadClient, UploadError, UploadStatus, UploadTask};
