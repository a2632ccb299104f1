// SPDX-License-Identifier: MPL-2.0
//! Media handling: photo decoding, hat assets, compositing, export and share.

pub mod compositor;
pub mod export;
pub mod image;
pub mod overlay;
pub mod overlay_cache;
pub mod share;

pub use self::image::{load_photo, LoadedImage};
pub use overlay::{HatAsset, OverlayBitmap};
pub use overlay_cache::{OverlayCache, Preload};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token type for background tasks.
pub type CancellationToken = Arc<AtomicBool>;

/// Creates a fresh, untriggered token.
#[must_use]
pub fn cancellation_token() -> CancellationToken {
    Arc::new(AtomicBool::new(false))
}

/// Checks if the cancellation token has been triggered.
#[inline]
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::SeqCst)
}

/// Triggers the token; the task observing it stops at its next check.
pub fn cancel(token: &CancellationToken) {
    token.store(true, Ordering::SeqCst);
}
