// SPDX-License-Identifier: MPL-2.0
//! Bounded list of thumbnails for recent downloads, newest first.

use super::{Storage, DOWNLOADS_KEY};
use crate::app::config::{DEGRADED_RECENT_DOWNLOADS, MAX_RECENT_DOWNLOADS};
use crate::error::StorageError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentDownloads {
    thumbnails: Vec<String>,
    degraded: bool,
}

impl RecentDownloads {
    /// Reads the stored list.
    ///
    /// Missing or malformed content yields an empty list; the parse error is
    /// returned alongside for logging.
    pub fn load(storage: &dyn Storage) -> (Self, Option<StorageError>) {
        let Some(raw) = storage.get(DOWNLOADS_KEY) else {
            return (Self::default(), None);
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut thumbnails) => {
                thumbnails.truncate(MAX_RECENT_DOWNLOADS);
                (
                    Self {
                        thumbnails,
                        degraded: false,
                    },
                    None,
                )
            }
            Err(err) => (
                Self::default(),
                Some(StorageError::Read(format!("{DOWNLOADS_KEY}: {err}"))),
            ),
        }
    }

    /// Prepends `thumbnail` and persists the list.
    ///
    /// On write failure the list shrinks to the newest
    /// `DEGRADED_RECENT_DOWNLOADS` entries and is kept in memory only.
    pub fn record(
        &mut self,
        thumbnail: String,
        storage: &mut dyn Storage,
    ) -> Result<(), StorageError> {
        self.thumbnails.insert(0, thumbnail);
        self.thumbnails.truncate(MAX_RECENT_DOWNLOADS);

        let result = serde_json::to_string(&self.thumbnails)
            .map_err(|e| StorageError::Write(e.to_string()))
            .and_then(|json| storage.set(DOWNLOADS_KEY, json));

        match result {
            Ok(()) => {
                self.degraded = false;
                Ok(())
            }
            Err(err) => {
                self.thumbnails.truncate(DEGRADED_RECENT_DOWNLOADS);
                self.degraded = true;
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.thumbnails
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Whether the last write failed and the list is memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}
