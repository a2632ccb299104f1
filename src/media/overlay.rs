// SPDX-License-Identifier: MPL-2.0
//! Built-in hat overlays.
//!
//! Hats ship as SVG files embedded in the binary and are rasterized into
//! square premultiplied bitmaps on demand.

use super::image::rasterize_svg;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tiny_skia::Pixmap;

#[derive(RustEmbed)]
#[folder = "assets/hats/"]
struct HatFiles;

/// A rasterized overlay shared between the cache and in-flight renders.
pub type OverlayBitmap = Arc<Pixmap>;

/// The hat catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatAsset {
    #[default]
    Beanie,
    Party,
    Crown,
}

impl HatAsset {
    pub const ALL: [HatAsset; 3] = [HatAsset::Beanie, HatAsset::Party, HatAsset::Crown];

    /// Asset path, also used as the cache key.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            HatAsset::Beanie => "hats/beanie.svg",
            HatAsset::Party => "hats/party.svg",
            HatAsset::Crown => "hats/crown.svg",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HatAsset::Beanie => "beanie",
            HatAsset::Party => "party",
            HatAsset::Crown => "crown",
        }
    }

    /// Translation key of the hat's display label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            HatAsset::Beanie => "hat-beanie",
            HatAsset::Party => "hat-party",
            HatAsset::Crown => "hat-crown",
        }
    }

    fn file_name(self) -> &'static str {
        self.path().trim_start_matches("hats/")
    }

    /// Raw SVG bytes of the embedded asset.
    pub fn svg_data(self) -> Result<std::borrow::Cow<'static, [u8]>> {
        HatFiles::get(self.file_name())
            .map(|file| file.data)
            .ok_or_else(|| Error::OverlayLoad {
                path: self.path().to_string(),
                reason: "asset not embedded".to_string(),
            })
    }

    /// Rasterizes the hat into a `size`x`size` bitmap.
    pub fn rasterize(self, size: u32) -> Result<OverlayBitmap> {
        let data = self.svg_data()?;
        rasterize_svg(&data, Some((size, size)))
            .map(Arc::new)
            .map_err(|e| Error::OverlayLoad {
                path: self.path().to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for HatAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HatAsset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HatAsset::ALL
            .into_iter()
            .find(|hat| hat.name().eq_ignore_ascii_case(s.trim()) || hat.path() == s.trim())
            .ok_or_else(|| format!("unknown hat '{s}' (expected beanie, party or crown)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hat_is_embedded() {
        for hat in HatAsset::ALL {
            let data = hat.svg_data().expect("hat should be embedded");
            assert!(!data.is_empty(), "{hat} has empty data");
        }
    }

    #[test]
    fn every_hat_rasterizes_to_requested_size() {
        for hat in HatAsset::ALL {
            let bitmap = hat.rasterize(64).expect("hat should rasterize");
            assert_eq!((bitmap.width(), bitmap.height()), (64, 64));
            assert!(
                bitmap.pixels().iter().any(|p| p.alpha() > 0),
                "{hat} rendered fully transparent"
            );
        }
    }

    #[test]
    fn parse_accepts_names_and_paths() {
        assert_eq!("party".parse::<HatAsset>(), Ok(HatAsset::Party));
        assert_eq!("CROWN".parse::<HatAsset>(), Ok(HatAsset::Crown));
        assert_eq!("hats/beanie.svg".parse::<HatAsset>(), Ok(HatAsset::Beanie));
        assert!("sombrero".parse::<HatAsset>().is_err());
    }

    #[test]
    fn paths_are_unique() {
        let mut paths: Vec<_> = HatAsset::ALL.iter().map(|h| h.path()).collect();
        paths.dedup();
        assert_eq!(paths.len(), HatAsset::ALL.len());
    }
}
