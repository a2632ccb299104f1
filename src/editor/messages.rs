// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types.

use super::transform::{HatTransform, TransformPatch};
use crate::error::Error;
use crate::media::{HatAsset, LoadedImage};

/// Toolbar actions.
#[derive(Debug, Clone)]
pub enum ToolbarMessage {
    SelectHat(HatAsset),
    FitToHead,
    Reset,
    /// Rotate by the given number of degrees.
    RotateBy(f32),
    /// Keep the width/height ratio while resizing. Not an undoable edit.
    LockAspect(bool),
    Undo,
    Redo,
    RemoveImage,
    Download,
    Share,
}

/// Pointer gestures on the hat.
///
/// A gesture records a single history entry on its first movement and is
/// persisted once it ends.
#[derive(Debug, Clone)]
pub enum CanvasMessage {
    DragStarted,
    DragMoved { dx: f32, dy: f32 },
    ResizeStarted,
    ResizeMoved { dw: f32, dh: f32 },
    GestureEnded,
}

#[derive(Debug, Clone)]
pub enum Message {
    Toolbar(ToolbarMessage),
    Canvas(CanvasMessage),
    /// Numeric entry of one or more transform fields.
    SetTransform(TransformPatch),
    /// A photo upload began decoding.
    UploadStarted,
    ImageLoaded(LoadedImage),
    ImageLoadFailed(Error),
    /// A hat bitmap could not be produced.
    OverlayFailed(Error),
    /// An export or share run completed.
    ProcessingFinished(Result<(), Error>),
    DismissError,
}

impl From<ToolbarMessage> for Message {
    fn from(message: ToolbarMessage) -> Self {
        Message::Toolbar(message)
    }
}

impl From<CanvasMessage> for Message {
    fn from(message: CanvasMessage) -> Self {
        Message::Canvas(message)
    }
}

/// Side effects requested from the host.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The transform settled and should be persisted.
    TransformSettled(HatTransform),
    /// The selected hat changed; its bitmap should be loaded.
    PreloadRequested(HatAsset),
    /// The photo was replaced or removed.
    ImageChanged,
    DownloadRequested,
    ShareRequested,
    /// A user-visible failure to report.
    Failed(Error),
}
