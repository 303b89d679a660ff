pub mod rest;

use std::sync::Arc;

use crate::config::Config;
use crate::store::{FileStore, UserStore};
use crate::tree::FolderTree;

#[derive(Clone)]
pub struct AppState {
    pub files: Arc<FileStore>,
    pub users: Arc<UserStore>,
    pub tree: Arc<FolderTree>,
    pub config: Config,
    /// Client used by the remote passthrough.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            files: Arc::new(FileStore::standard()),
            users: Arc::new(UserStore::standard()),
            tree: Arc::new(FolderTree::standard()),
            config,
            http: reqwest::Client::new(),
        }
    }
}
