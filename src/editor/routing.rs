// SPDX-License-Identifier: MPL-2.0
//! Message routing helpers that keep the editor facade slim.

use super::{CanvasMessage, Event, Gesture, GestureKind, State, ToolbarMessage};

impl State {
    pub(super) fn handle_toolbar_message(&mut self, message: ToolbarMessage) -> Event {
        match message {
            ToolbarMessage::SelectHat(hat) => {
                self.select_hat(hat);
                Event::PreloadRequested(hat)
            }
            ToolbarMessage::FitToHead => {
                if self.fit_to_head() {
                    Event::TransformSettled(self.transform)
                } else {
                    Event::None
                }
            }
            ToolbarMessage::Reset => {
                self.reset();
                Event::TransformSettled(self.transform)
            }
            ToolbarMessage::RotateBy(degrees) => {
                self.rotate_by(degrees);
                Event::TransformSettled(self.transform)
            }
            ToolbarMessage::LockAspect(lock) => {
                self.set_lock_aspect(lock);
                Event::None
            }
            ToolbarMessage::Undo => {
                if self.undo() {
                    Event::TransformSettled(self.transform)
                } else {
                    Event::None
                }
            }
            ToolbarMessage::Redo => {
                if self.redo() {
                    Event::TransformSettled(self.transform)
                } else {
                    Event::None
                }
            }
            ToolbarMessage::RemoveImage => {
                if self.image.is_none() {
                    return Event::None;
                }
                self.remove_image();
                Event::ImageChanged
            }
            ToolbarMessage::Download => self.begin_processing(Event::DownloadRequested),
            ToolbarMessage::Share => self.begin_processing(Event::ShareRequested),
        }
    }

    pub(super) fn handle_canvas_message(&mut self, message: CanvasMessage) -> Event {
        match message {
            CanvasMessage::DragStarted => {
                self.start_gesture(GestureKind::Drag);
                Event::None
            }
            CanvasMessage::ResizeStarted => {
                self.start_gesture(GestureKind::Resize);
                Event::None
            }
            CanvasMessage::DragMoved { dx, dy } => {
                self.gesture_step(GestureKind::Drag);
                self.move_hat(dx, dy);
                Event::None
            }
            CanvasMessage::ResizeMoved { dw, dh } => {
                self.gesture_step(GestureKind::Resize);
                self.resize_hat(dw, dh);
                Event::None
            }
            CanvasMessage::GestureEnded => match self.gesture.take() {
                Some(gesture) if gesture.moved => Event::TransformSettled(self.transform),
                _ => Event::None,
            },
        }
    }

    fn start_gesture(&mut self, kind: GestureKind) {
        self.gesture = Some(Gesture { kind, moved: false });
    }

    /// Records history on the first step of a gesture. A step without a
    /// matching start begins a gesture implicitly.
    fn gesture_step(&mut self, kind: GestureKind) {
        match &mut self.gesture {
            Some(gesture) if gesture.kind == kind => {
                if !gesture.moved {
                    gesture.moved = true;
                    self.history.record(self.transform);
                }
            }
            _ => {
                self.history.record(self.transform);
                self.gesture = Some(Gesture { kind, moved: true });
            }
        }
    }

    /// Ignored while processing or without a photo.
    fn begin_processing(&mut self, request: Event) -> Event {
        if self.is_processing || self.image.is_none() {
            return Event::None;
        }
        self.is_processing = true;
        request
    }
}
