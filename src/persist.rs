use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::error::LookupError;
use crate::model::Bookmark;

/// Durable storage for the bookmark collection.
///
/// The whole collection lives in a single named record that is read once at
/// startup and rewritten wholesale on every bookmark mutation.
pub trait BookmarkStore: Send + Sync {
    fn load(&self) -> Result<Vec<Bookmark>, LookupError>;
    fn save(&self, bookmarks: &[Bookmark]) -> Result<(), LookupError>;
}

/// Bookmark record stored as a JSON file on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BookmarkStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Bookmark>, LookupError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<(), LookupError> {
        debug!("writing {} bookmark(s) to {:?}", bookmarks.len(), self.path);
        let raw = serde_json::to_string(bookmarks)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    bookmarks: Mutex<Vec<Bookmark>>,
}

impl BookmarkStore for MemoryStore {
    fn load(&self) -> Result<Vec<Bookmark>, LookupError> {
        let guard = self
            .bookmarks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, bookmarks: &[Bookmark]) -> Result<(), LookupError> {
        let mut guard = self
            .bookmarks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = bookmarks.to_vec();
        Ok(())
    }
}
