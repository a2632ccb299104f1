// SPDX-License-Identifier: MPL-2.0
//! Append-only cache of rasterized hat overlays.
//!
//! The first request for a hat starts a background rasterization; the
//! result is delivered through a callback and recorded with
//! [`OverlayCache::complete`]. Entries are never evicted.

use super::overlay::{HatAsset, OverlayBitmap};
use crate::error::Result;
use std::collections::{HashMap, HashSet};

/// Outcome of a preload request.
#[derive(Debug, Clone)]
pub enum Preload {
    /// Bitmap already cached.
    Ready(OverlayBitmap),
    /// A load for this hat is already running.
    Pending,
    /// A new background load was started.
    Started,
}

#[derive(Debug)]
pub struct OverlayCache {
    bitmaps: HashMap<&'static str, OverlayBitmap>,
    pending: HashSet<&'static str>,
    raster_size: u32,
}

impl OverlayCache {
    #[must_use]
    pub fn new(raster_size: u32) -> Self {
        Self {
            bitmaps: HashMap::new(),
            pending: HashSet::new(),
            raster_size: raster_size.max(1),
        }
    }

    /// Returns the cached bitmap for `asset`, if any.
    #[must_use]
    pub fn get(&self, asset: HatAsset) -> Option<OverlayBitmap> {
        self.bitmaps.get(asset.path()).cloned()
    }

    #[must_use]
    pub fn is_pending(&self, asset: HatAsset) -> bool {
        self.pending.contains(asset.path())
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }

    /// Requests `asset`. Only the first request for an uncached hat spawns a
    /// rasterization on tokio's blocking pool; `on_done` receives its result.
    ///
    /// Must be called from within a tokio runtime when a load is started.
    pub fn preload<F>(&mut self, asset: HatAsset, on_done: F) -> Preload
    where
        F: FnOnce(HatAsset, Result<OverlayBitmap>) + Send + 'static,
    {
        if let Some(bitmap) = self.get(asset) {
            return Preload::Ready(bitmap);
        }
        if !self.pending.insert(asset.path()) {
            return Preload::Pending;
        }

        let size = self.raster_size;
        tokio::task::spawn_blocking(move || {
            let result = asset.rasterize(size);
            on_done(asset, result);
        });
        Preload::Started
    }

    /// Preloads every hat in the catalog.
    pub fn preload_all<F>(&mut self, on_done: F)
    where
        F: Fn(HatAsset, Result<OverlayBitmap>) + Clone + Send + 'static,
    {
        for asset in HatAsset::ALL {
            self.preload(asset, on_done.clone());
        }
    }

    /// Records the result of a background load.
    ///
    /// A failed load clears the pending mark so a later request retries.
    pub fn complete(
        &mut self,
        asset: HatAsset,
        result: Result<OverlayBitmap>,
    ) -> Result<OverlayBitmap> {
        self.pending.remove(asset.path());
        let bitmap = result?;
        Ok(self
            .bitmaps
            .entry(asset.path())
            .or_insert(bitmap)
            .clone())
    }

    /// Rasterizes `asset` synchronously if it is not cached yet.
    pub fn load_now(&mut self, asset: HatAsset) -> Result<OverlayBitmap> {
        if let Some(bitmap) = self.get(asset) {
            return Ok(bitmap);
        }
        let bitmap = asset.rasterize(self.raster_size)?;
        Ok(self
            .bitmaps
            .entry(asset.path())
            .or_insert(bitmap)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    #[test]
    fn load_now_caches_bitmap() {
        let mut cache = OverlayCache::new(32);
        let first = cache.load_now(HatAsset::Crown).expect("crown should load");
        let second = cache.load_now(HatAsset::Crown).expect("crown should load");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.width(), 32);
    }

    #[test]
    fn failed_completion_clears_pending() {
        let mut cache = OverlayCache::new(32);
        cache.pending.insert(HatAsset::Party.path());

        let result = cache.complete(HatAsset::Party, Err(Error::Svg("broken".into())));
        assert!(result.is_err());
        assert!(!cache.is_pending(HatAsset::Party));
        assert!(cache.get(HatAsset::Party).is_none());
    }

    #[test]
    fn completion_does_not_replace_existing_entry() {
        let mut cache = OverlayCache::new(16);
        let cached = cache.load_now(HatAsset::Beanie).expect("beanie");
        let other = HatAsset::Beanie.rasterize(16).expect("beanie");

        let kept = cache
            .complete(HatAsset::Beanie, Ok(other))
            .expect("completion");
        assert!(Arc::ptr_eq(&kept, &cached));
    }

    #[tokio::test]
    async fn preload_starts_once_then_reports_pending() {
        let mut cache = OverlayCache::new(32);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let tx_first = tx.clone();
        let first = cache.preload(HatAsset::Party, move |asset, result| {
            let _ = tx_first.send((asset, result));
        });
        assert!(matches!(first, Preload::Started));

        let second = cache.preload(HatAsset::Party, move |asset, result| {
            let _ = tx.send((asset, result));
        });
        assert!(matches!(second, Preload::Pending));

        let (asset, result) = rx.recv().await.expect("one completion");
        assert_eq!(asset, HatAsset::Party);
        cache.complete(asset, result).expect("party should rasterize");

        assert!(!cache.has_pending());
        let third = cache.preload(HatAsset::Party, |_, _| {});
        assert!(matches!(third, Preload::Ready(_)));
    }

    #[tokio::test]
    async fn preload_all_fills_the_catalog() {
        let mut cache = OverlayCache::new(16);
        let (tx, mut rx) = mpsc::unbounded_channel();

        cache.preload_all(move |asset, result| {
            let _ = tx.send((asset, result));
        });

        for _ in 0..HatAsset::ALL.len() {
            let (asset, result) = rx.recv().await.expect("completion");
            cache.complete(asset, result).expect("hat should rasterize");
        }
        assert_eq!(cache.len(), HatAsset::ALL.len());
        assert!(!cache.has_pending());
    }
}
