//! In-memory stores backing the mock API.

pub mod files;
pub mod seed;
pub mod users;

pub use files::{FileMetadata, FileStore, ListOptions};
pub use users::{AuthUser, UserStore};
