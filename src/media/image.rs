// SPDX-License-Identifier: MPL-2.0
//! Photo loading and decoding (PNG, JPEG, GIF, SVG, etc.).

use super::{is_cancelled, CancellationToken};
use crate::error::{Error, Result};
use image_rs::{ImageError, RgbaImage};
use resvg::usvg;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tiny_skia::{ColorU8, Pixmap};

/// A decoded photo, ready to be composited.
///
/// Pixels are stored premultiplied in a shared pixmap; dropping the last
/// `LoadedImage` clone releases them.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pixels: Arc<Pixmap>,
    path: Option<PathBuf>,
}

impl LoadedImage {
    #[must_use]
    pub fn new(pixels: Pixmap, path: Option<PathBuf>) -> Self {
        Self {
            pixels: Arc::new(pixels),
            path,
        }
    }

    /// Builds an image from straight (non-premultiplied) RGBA pixels.
    pub fn from_rgba(image: &RgbaImage, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(pixmap_from_rgba(image)?, path))
    }

    /// Natural width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixels
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Weak reference to the pixel buffer, used to observe its release.
    #[must_use]
    pub fn downgrade(&self) -> Weak<Pixmap> {
        Arc::downgrade(&self.pixels)
    }
}

/// Converts straight RGBA pixels into a premultiplied pixmap.
pub fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Canvas(format!("cannot allocate {width}x{height} pixmap")))?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Converts a premultiplied pixmap back into straight RGBA pixels.
#[must_use]
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut bytes = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        bytes.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), bytes)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

/// Rasterizes SVG data. With `target` set, the drawing is scaled to fill it;
/// otherwise it keeps its intrinsic size.
pub fn rasterize_svg(data: &[u8], target: Option<(u32, u32)>) -> Result<Pixmap> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let intrinsic = tree.size().to_int_size();
    if intrinsic.width() == 0 || intrinsic.height() == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }
    let (width, height) = target.unwrap_or((intrinsic.width(), intrinsic.height()));

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    let transform = tiny_skia::Transform::from_scale(
        width as f32 / tree.size().width(),
        height as f32 / tree.size().height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Loads and decodes a photo from disk.
///
/// The token is checked before and after decoding so a superseded upload
/// stops as early as possible.
///
/// # Errors
///
/// - [`Error::Cancelled`] if the token was triggered
/// - [`Error::ImageLoad`] if the file cannot be read or decoded
pub fn load_photo(path: &Path, cancel: &CancellationToken) -> Result<LoadedImage> {
    if is_cancelled(cancel) {
        return Err(Error::Cancelled);
    }

    let bytes = fs::read(path).map_err(|e| Error::ImageLoad(e.to_string()))?;
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let pixmap = if extension.eq_ignore_ascii_case("svg") {
        rasterize_svg(&bytes, None).map_err(|e| Error::ImageLoad(e.to_string()))?
    } else {
        let decoded = image_rs::load_from_memory(&bytes)?;
        if is_cancelled(cancel) {
            return Err(Error::Cancelled);
        }
        pixmap_from_rgba(&decoded.to_rgba8())?
    };

    if is_cancelled(cancel) {
        return Err(Error::Cancelled);
    }
    Ok(LoadedImage::new(pixmap, Some(path.to_path_buf())))
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::ImageLoad(err.to_string())
    }
}
