// SPDX-License-Identifier: MPL-2.0
//! Hat editor: transform state, history and the loaded photo.
//!
//! This module follows a "state down, messages up" pattern. [`State::update`]
//! applies a [`Message`] and returns an [`Event`] telling the host which side
//! effect to run (persist, preload, export, share, report).

mod history;
mod image_source;
mod messages;
mod routing;
mod transform;

pub use history::History;
pub use image_source::DisplayBox;
pub use messages::{CanvasMessage, Event, Message, ToolbarMessage};
pub use transform::{normalize_degrees, HatTransform, TransformPatch};

use crate::app::config::{EDIT_BOX_SIZE, FIT_TO_HEAD_DIVISOR, MIN_HAT_SIZE};
use crate::error::Error;
use crate::media::{HatAsset, LoadedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureKind {
    Drag,
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    kind: GestureKind,
    /// Set once the first movement recorded history.
    moved: bool,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    image: Option<LoadedImage>,
    hat: HatAsset,
    transform: HatTransform,
    history: History,
    gesture: Option<Gesture>,
    lock_aspect: bool,
    is_loading: bool,
    is_processing: bool,
    error: Option<Error>,
}

impl State {
    #[must_use]
    pub fn new(lock_aspect: bool) -> Self {
        Self {
            lock_aspect,
            ..Self::default()
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Toolbar(msg) => self.handle_toolbar_message(msg),
            Message::Canvas(msg) => self.handle_canvas_message(msg),
            Message::SetTransform(patch) => {
                self.set_transform(&patch);
                Event::TransformSettled(self.transform)
            }
            Message::UploadStarted => {
                self.is_loading = true;
                Event::None
            }
            Message::ImageLoaded(image) => {
                self.load_image(image);
                Event::ImageChanged
            }
            Message::ImageLoadFailed(err) => {
                self.is_loading = false;
                self.fail(err)
            }
            Message::OverlayFailed(err) => self.fail(err),
            Message::ProcessingFinished(result) => {
                self.is_processing = false;
                match result {
                    Ok(()) => Event::None,
                    Err(err) => self.fail(err),
                }
            }
            Message::DismissError => {
                self.error = None;
                Event::None
            }
        }
    }

    /// Restores a persisted transform without touching history.
    pub fn restore_transform(&mut self, transform: HatTransform) {
        self.transform = transform;
    }

    /// Records history, then merges the set fields of `patch`.
    ///
    /// Values are not validated.
    pub fn set_transform(&mut self, patch: &TransformPatch) {
        self.record();
        self.transform.apply(patch);
    }

    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.transform) {
            Some(previous) => {
                self.transform = previous;
                self.rearm_gesture();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.transform) {
            Some(next) => {
                self.transform = next;
                self.rearm_gesture();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.record();
        self.transform = HatTransform::default();
    }

    /// Sizes the hat to a sixth of the displayed photo height and places it
    /// centered horizontally around the upper quarter of the box.
    ///
    /// Returns `false` without a loaded image.
    pub fn fit_to_head(&mut self) -> bool {
        let Some(image) = &self.image else {
            return false;
        };
        let size = DisplayBox::of(image).height / FIT_TO_HEAD_DIVISOR;

        self.record();
        self.transform.width = size;
        self.transform.height = size;
        self.transform.x = (EDIT_BOX_SIZE - size) / 2.0;
        self.transform.y = EDIT_BOX_SIZE / 4.0 - size / 2.0;
        true
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.record();
        self.transform.rotation = normalize_degrees(self.transform.rotation + degrees);
    }

    /// Replaces the photo. The previous one is released; history is kept.
    pub fn load_image(&mut self, image: LoadedImage) {
        self.image = Some(image);
        self.is_loading = false;
        self.error = None;
    }

    /// Releases the photo and clears both history stacks.
    pub fn remove_image(&mut self) {
        self.image = None;
        self.history.clear();
        self.gesture = None;
    }

    pub fn select_hat(&mut self, hat: HatAsset) {
        self.hat = hat;
    }

    /// Records history for a discrete edit. An active gesture records
    /// again on its next step so its movement stays undoable on its own.
    fn record(&mut self) {
        self.history.record(self.transform);
        self.rearm_gesture();
    }

    /// Undo and redo move across history, so the next gesture step must
    /// record a fresh entry and clear redo.
    fn rearm_gesture(&mut self) {
        if let Some(gesture) = &mut self.gesture {
            gesture.moved = false;
        }
    }

    fn move_hat(&mut self, dx: f32, dy: f32) {
        self.transform.x += dx;
        self.transform.y += dy;
    }

    fn resize_hat(&mut self, dw: f32, dh: f32) {
        let width = (self.transform.width + dw).max(MIN_HAT_SIZE);
        let height = if self.lock_aspect && self.transform.width > 0.0 {
            (self.transform.height * width / self.transform.width).max(MIN_HAT_SIZE)
        } else {
            (self.transform.height + dh).max(MIN_HAT_SIZE)
        };
        self.transform.width = width;
        self.transform.height = height;
    }

    fn fail(&mut self, err: Error) -> Event {
        if err.is_user_visible() {
            self.error = Some(err.clone());
            Event::Failed(err)
        } else {
            Event::None
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn display_box(&self) -> Option<DisplayBox> {
        self.image.as_ref().map(DisplayBox::of)
    }

    #[must_use]
    pub fn hat(&self) -> HatAsset {
        self.hat
    }

    #[must_use]
    pub fn transform(&self) -> HatTransform {
        self.transform
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn lock_aspect(&self) -> bool {
        self.lock_aspect
    }

    pub fn set_lock_aspect(&mut self, lock: bool) {
        self.lock_aspect = lock;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether an export or share is running.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests;
