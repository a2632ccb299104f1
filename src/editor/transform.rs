// SPDX-License-Identifier: MPL-2.0
//! Hat placement within the editing box.

use crate::app::config::{
    DEFAULT_HAT_HEIGHT, DEFAULT_HAT_ROTATION, DEFAULT_HAT_WIDTH, DEFAULT_HAT_X, DEFAULT_HAT_Y,
};
use serde::{Deserialize, Serialize};

/// Size, position and rotation of the hat, in editing-box units.
///
/// `x`/`y` is the top-left corner of the unrotated hat; rotation (degrees)
/// is applied about the hat's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatTransform {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl Default for HatTransform {
    fn default() -> Self {
        Self {
            width: DEFAULT_HAT_WIDTH,
            height: DEFAULT_HAT_HEIGHT,
            x: DEFAULT_HAT_X,
            y: DEFAULT_HAT_Y,
            rotation: DEFAULT_HAT_ROTATION,
        }
    }
}

impl HatTransform {
    /// Overwrites the fields that are set in `patch`.
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
    }

    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rotation folded into `[0, 360)`.
    #[must_use]
    pub fn normalized_rotation(&self) -> f32 {
        normalize_degrees(self.rotation)
    }
}

/// Folds an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Partial update of a [`HatTransform`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
}

impl TransformPatch {
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<HatTransform> for TransformPatch {
    fn from(t: HatTransform) -> Self {
        Self {
            width: Some(t.width),
            height: Some(t.height),
            x: Some(t.x),
            y: Some(t.y),
            rotation: Some(t.rotation),
        }
    }
}
