// SPDX-License-Identifier: MPL-2.0
//! Local key-value persistence.
//!
//! Values are JSON strings stored under fixed keys. Persistence is best
//! effort: callers log failures and keep their in-memory state.

mod local;
mod recent_downloads;

pub use local::LocalStorage;
pub use recent_downloads::RecentDownloads;

use crate::editor::HatTransform;
use crate::error::StorageError;

/// Key of the last settled hat transform.
pub const LAST_HAT_KEY: &str = "pfp-editor-last-hat";
/// Key of the recent-downloads thumbnail list.
pub const DOWNLOADS_KEY: &str = "pfp-editor-downloads";

/// String key-value store.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Reads the persisted transform.
///
/// `Ok(None)` when nothing is stored; `Err` when the stored value is
/// malformed and should be ignored.
pub fn load_transform(storage: &dyn Storage) -> Result<Option<HatTransform>, StorageError> {
    let Some(raw) = storage.get(LAST_HAT_KEY) else {
        return Ok(None);
    };
    serde_json::from_str::<HatTransform>(&raw)
        .map(Some)
        .map_err(|e| StorageError::Read(format!("{LAST_HAT_KEY}: {e}")))
}

pub fn save_transform(
    storage: &mut dyn Storage,
    transform: &HatTransform,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(transform).map_err(|e| StorageError::Write(e.to_string()))?;
    storage.set(LAST_HAT_KEY, json)
}
