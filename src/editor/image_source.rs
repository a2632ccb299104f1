// SPDX-License-Identifier: MPL-2.0
//! Where the loaded photo sits inside the editing box.

use crate::app::config::EDIT_BOX_SIZE;
use crate::media::compositor::fit_ratio;
use crate::media::LoadedImage;

/// The letterboxed photo rectangle, in editing-box units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBox {
    pub fit_ratio: f32,
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl DisplayBox {
    #[must_use]
    pub fn of(image: &LoadedImage) -> Self {
        Self::for_size(image.width(), image.height())
    }

    #[must_use]
    pub fn for_size(natural_width: u32, natural_height: u32) -> Self {
        let ratio = fit_ratio(natural_width, natural_height);
        let width = natural_width as f32 * ratio;
        let height = natural_height as f32 * ratio;
        Self {
            fit_ratio: ratio,
            width,
            height,
            x: (EDIT_BOX_SIZE - width) / 2.0,
            y: (EDIT_BOX_SIZE - height) / 2.0,
        }
    }
}
