// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Editing Box**: Geometry of the on-screen editing square
//! - **Hat**: Default transform and sizing heuristics for the overlay
//! - **Export**: Output resolution and thumbnail encoding
//! - **Storage**: Local storage quota and recent-downloads bounds
//! - **Share**: Preset share title, text and web intent
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Editing Box Defaults
// ==========================================================================

/// Side length of the square editing box, in on-screen pixels.
///
/// Hat coordinates are expressed in this space.
pub const EDIT_BOX_SIZE: f32 = 400.0;

// ==========================================================================
// Hat Defaults
// ==========================================================================

/// Default hat width after a reset.
pub const DEFAULT_HAT_WIDTH: f32 = 100.0;

/// Default hat height after a reset.
pub const DEFAULT_HAT_HEIGHT: f32 = 100.0;

/// Default hat left edge after a reset.
pub const DEFAULT_HAT_X: f32 = 100.0;

/// Default hat top edge after a reset.
pub const DEFAULT_HAT_Y: f32 = 100.0;

/// Default hat rotation after a reset (degrees).
pub const DEFAULT_HAT_ROTATION: f32 = 0.0;

/// Smallest width or height a resize gesture may produce.
pub const MIN_HAT_SIZE: f32 = 10.0;

/// "Fit to head" sizes the hat to this fraction of the displayed image height.
pub const FIT_TO_HEAD_DIVISOR: f32 = 6.0;

/// Side length at which hat assets are rasterized before scaling.
pub const OVERLAY_RASTER_SIZE: u32 = 512;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default side length of the exported PNG.
pub const DEFAULT_OUTPUT_SIZE: u32 = 1200;

/// Minimum allowed export side length.
pub const MIN_OUTPUT_SIZE: u32 = 100;

/// Maximum allowed export side length.
pub const MAX_OUTPUT_SIZE: u32 = 4096;

/// Side length of the history thumbnail.
pub const THUMBNAIL_SIZE: u32 = 150;

/// JPEG quality used for history thumbnails (1-100).
pub const THUMBNAIL_JPEG_QUALITY: u8 = 50;

// ==========================================================================
// Storage Defaults
// ==========================================================================

/// Byte quota of the local key-value store.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Number of thumbnails kept in the recent downloads list.
pub const MAX_RECENT_DOWNLOADS: usize = 4;

/// Number of thumbnails kept in memory after the list failed to persist.
pub const DEGRADED_RECENT_DOWNLOADS: usize = 3;

// ==========================================================================
// Share Defaults
// ==========================================================================

/// Title attached to natively shared images.
pub const DEFAULT_SHARE_TITLE: &str = "My new profile picture";

/// Text attached to shares and used for the web intent fallback.
pub const DEFAULT_SHARE_TEXT: &str = "Check out my new profile picture!";

/// Web intent endpoint opened when no native share target is available.
pub const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(EDIT_BOX_SIZE > 0.0);
    assert!(MIN_HAT_SIZE > 0.0);
    assert!(DEFAULT_HAT_WIDTH >= MIN_HAT_SIZE);
    assert!(DEFAULT_HAT_HEIGHT >= MIN_HAT_SIZE);
    assert!(FIT_TO_HEAD_DIVISOR > 0.0);

    assert!(MIN_OUTPUT_SIZE > 0);
    assert!(MAX_OUTPUT_SIZE >= MIN_OUTPUT_SIZE);
    assert!(DEFAULT_OUTPUT_SIZE >= MIN_OUTPUT_SIZE);
    assert!(DEFAULT_OUTPUT_SIZE <= MAX_OUTPUT_SIZE);
    assert!(THUMBNAIL_SIZE > 0);
    assert!(THUMBNAIL_JPEG_QUALITY > 0 && THUMBNAIL_JPEG_QUALITY <= 100);

    assert!(DEGRADED_RECENT_DOWNLOADS < MAX_RECENT_DOWNLOADS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
