// SPDX-License-Identifier: MPL-2.0

use super::*;
use image_rs::{Rgba, RgbaImage};

fn image(width: u32, height: u32) -> LoadedImage {
    LoadedImage::from_rgba(&RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])), None)
        .expect("test image")
}

fn editor_with_image(width: u32, height: u32) -> State {
    let mut state = State::new(false);
    state.update(Message::ImageLoaded(image(width, height)));
    state
}

fn nth_patch(i: usize) -> TransformPatch {
    let v = i as f32;
    TransformPatch {
        width: Some(50.0 + v),
        height: Some(60.0 + v),
        x: Some(v * 3.0),
        y: Some(v * 2.0),
        rotation: Some(v * 10.0),
    }
}

#[test]
fn new_editor_starts_with_defaults() {
    let state = State::new(false);
    assert_eq!(state.transform(), HatTransform::default());
    assert_eq!(state.hat(), HatAsset::Beanie);
    assert!(!state.can_undo());
    assert!(!state.can_redo());
    assert!(state.image().is_none());
    assert!(!state.is_processing());
}

#[test]
fn n_set_transforms_fill_undo_and_leave_redo_empty() {
    let mut state = State::new(false);
    for i in 0..7 {
        state.update(Message::SetTransform(nth_patch(i)));
    }
    assert_eq!(state.history().undo_len(), 7);
    assert_eq!(state.history().redo_len(), 0);
}

#[test]
fn undo_redo_sequences_land_on_expected_state() {
    const N: usize = 6;
    // expected[k] is the transform after k set_transform calls.
    let mut expected = vec![HatTransform::default()];
    let mut reference = HatTransform::default();
    for i in 0..N {
        reference.apply(&nth_patch(i));
        expected.push(reference);
    }

    for undos in 0..=N {
        for redos in 0..=undos {
            let mut state = State::new(false);
            for i in 0..N {
                state.set_transform(&nth_patch(i));
            }
            for _ in 0..undos {
                assert!(state.undo());
            }
            for _ in 0..redos {
                assert!(state.redo());
            }
            assert_eq!(
                state.transform(),
                expected[N - undos + redos],
                "undos={undos} redos={redos}"
            );
            assert_eq!(state.history().undo_len(), N - undos + redos);
            assert_eq!(state.history().redo_len(), undos - redos);
        }
    }
}

#[test]
fn undo_and_redo_on_empty_stacks_are_no_ops() {
    let mut state = State::new(false);
    assert!(matches!(state.update(ToolbarMessage::Undo.into()), Event::None));
    assert!(matches!(state.update(ToolbarMessage::Redo.into()), Event::None));
    assert_eq!(state.transform(), HatTransform::default());
}

#[test]
fn new_action_after_undo_clears_redo() {
    let mut state = State::new(false);
    state.set_transform(&nth_patch(1));
    state.set_transform(&nth_patch(2));
    state.undo();
    assert!(state.can_redo());

    state.update(ToolbarMessage::RotateBy(15.0).into());
    assert!(!state.can_redo());
}

#[test]
fn set_transform_merges_partial_patch_without_validation() {
    let mut state = State::new(false);
    let event = state.update(Message::SetTransform(TransformPatch::size(-5.0, 1e6)));

    let t = state.transform();
    assert_eq!((t.width, t.height), (-5.0, 1e6));
    assert_eq!((t.x, t.y), (100.0, 100.0));
    assert!(matches!(event, Event::TransformSettled(settled) if settled == t));
}

#[test]
fn reset_restores_defaults_and_is_undoable() {
    let mut state = State::new(false);
    state.set_transform(&nth_patch(3));
    let before = state.transform();

    state.update(ToolbarMessage::Reset.into());
    assert_eq!(state.transform(), HatTransform::default());

    state.undo();
    assert_eq!(state.transform(), before);
}

#[test]
fn fit_to_head_sizes_from_displayed_height() {
    for (w, h) in [(800, 600), (300, 900), (64, 64), (4000, 100)] {
        let mut state = editor_with_image(w, h);
        state.set_transform(&nth_patch(9));
        let rotation = state.transform().rotation;

        assert!(state.fit_to_head());

        let ratio = (EDIT_BOX_SIZE / w as f32).min(EDIT_BOX_SIZE / h as f32);
        let expected = h as f32 * ratio / 6.0;
        let t = state.transform();
        assert!((t.height - expected).abs() < 1e-3, "{w}x{h}: {t:?}");
        assert!((t.width - expected).abs() < 1e-3);
        assert!((t.x - (EDIT_BOX_SIZE - expected) / 2.0).abs() < 1e-3);
        assert!((t.y - (EDIT_BOX_SIZE / 4.0 - expected / 2.0)).abs() < 1e-3);
        assert_eq!(t.rotation, rotation);
    }
}

#[test]
fn fit_to_head_is_independent_of_current_transform() {
    let mut a = editor_with_image(640, 480);
    let mut b = editor_with_image(640, 480);
    b.set_transform(&nth_patch(4));

    a.fit_to_head();
    b.fit_to_head();
    assert_eq!(a.transform().height, b.transform().height);
}

#[test]
fn fit_to_head_without_image_does_nothing() {
    let mut state = State::new(false);
    let event = state.update(ToolbarMessage::FitToHead.into());
    assert!(matches!(event, Event::None));
    assert!(!state.can_undo());
}

#[test]
fn rotate_by_normalizes() {
    let mut state = State::new(false);
    state.rotate_by(-90.0);
    assert_eq!(state.transform().rotation, 270.0);
    state.rotate_by(450.0);
    assert_eq!(state.transform().rotation, 0.0);
    assert_eq!(state.history().undo_len(), 2);
}

#[test]
fn remove_image_releases_it_and_clears_history() {
    let mut state = editor_with_image(10, 10);
    let weak = state.image().expect("image").downgrade();
    state.set_transform(&nth_patch(1));
    state.set_transform(&nth_patch(2));
    state.undo();

    let event = state.update(ToolbarMessage::RemoveImage.into());

    assert!(matches!(event, Event::ImageChanged));
    assert!(state.image().is_none());
    assert!(weak.upgrade().is_none());
    assert!(!state.can_undo());
    assert!(!state.can_redo());
}

#[test]
fn replacing_image_releases_previous_and_keeps_history() {
    let mut state = editor_with_image(10, 10);
    let weak = state.image().expect("image").downgrade();
    state.set_transform(&nth_patch(1));

    state.update(Message::ImageLoaded(image(20, 20)));

    assert!(weak.upgrade().is_none());
    assert_eq!(state.image().map(LoadedImage::width), Some(20));
    assert!(state.can_undo());
}

#[test]
fn drag_gesture_records_once_and_settles_on_end() {
    let mut state = State::new(false);
    assert!(matches!(state.update(CanvasMessage::DragStarted.into()), Event::None));
    for _ in 0..5 {
        let event = state.update(CanvasMessage::DragMoved { dx: 2.0, dy: -1.0 }.into());
        assert!(matches!(event, Event::None));
    }
    assert!(state.is_gesture_active());
    assert_eq!(state.history().undo_len(), 1);

    let event = state.update(CanvasMessage::GestureEnded.into());
    assert!(matches!(event, Event::TransformSettled(t) if t.x == 110.0 && t.y == 95.0));
    assert!(!state.is_gesture_active());

    state.undo();
    assert_eq!(state.transform(), HatTransform::default());
}

#[test]
fn gesture_without_movement_leaves_history_alone() {
    let mut state = State::new(false);
    state.update(CanvasMessage::ResizeStarted.into());
    let event = state.update(CanvasMessage::GestureEnded.into());
    assert!(matches!(event, Event::None));
    assert!(!state.can_undo());
}

#[test]
fn dragging_after_undo_mid_gesture_clears_redo() {
    let mut state = State::new(false);
    state.set_transform(&TransformPatch::position(10.0, 10.0));
    state.update(CanvasMessage::DragStarted.into());
    state.update(CanvasMessage::DragMoved { dx: 5.0, dy: 0.0 }.into());

    state.update(ToolbarMessage::Undo.into());
    assert_eq!(state.transform().x, 10.0);
    assert!(state.can_redo());

    state.update(CanvasMessage::DragMoved { dx: 40.0, dy: 0.0 }.into());
    let event = state.update(CanvasMessage::GestureEnded.into());

    assert!(matches!(event, Event::TransformSettled(t) if t.x == 50.0));
    assert!(!state.can_redo());
    assert_eq!(state.history().undo_len(), 2);
    assert!(state.undo());
    assert_eq!(state.transform().x, 10.0);
}

#[test]
fn resizing_after_redo_mid_gesture_records_again() {
    let mut state = State::new(false);
    state.set_transform(&TransformPatch::size(80.0, 80.0));
    state.undo();
    state.update(CanvasMessage::ResizeStarted.into());
    state.update(CanvasMessage::ResizeMoved { dw: 10.0, dh: 10.0 }.into());
    // The resize already cleared redo, so redo is a no-op here.
    assert!(!state.redo());

    state.set_transform(&TransformPatch::rotation(45.0));
    assert!(state.undo());
    state.update(CanvasMessage::ResizeMoved { dw: 5.0, dh: 5.0 }.into());
    state.update(CanvasMessage::GestureEnded.into());

    assert!(!state.can_redo());
    let t = state.transform();
    assert_eq!((t.width, t.height), (115.0, 115.0));
    assert!(state.undo());
    assert_eq!(state.transform().width, 110.0);
}

#[test]
fn discrete_edit_mid_gesture_keeps_later_steps_undoable() {
    let mut state = State::new(false);
    state.update(CanvasMessage::DragStarted.into());
    state.update(CanvasMessage::DragMoved { dx: 10.0, dy: 0.0 }.into());
    state.update(ToolbarMessage::RotateBy(90.0).into());
    state.update(CanvasMessage::DragMoved { dx: 10.0, dy: 0.0 }.into());
    state.update(CanvasMessage::GestureEnded.into());

    assert_eq!(state.history().undo_len(), 3);
    assert!(state.undo());
    let t = state.transform();
    assert_eq!((t.x, t.rotation), (110.0, 90.0));
}

#[test]
fn resize_respects_minimum_size() {
    let mut state = State::new(false);
    state.update(CanvasMessage::ResizeStarted.into());
    state.update(CanvasMessage::ResizeMoved { dw: -500.0, dh: 20.0 }.into());
    let t = state.transform();
    assert_eq!(t.width, MIN_HAT_SIZE);
    assert_eq!(t.height, 120.0);
}

#[test]
fn locked_resize_keeps_aspect_ratio() {
    let mut state = State::new(true);
    state.set_transform(&TransformPatch::size(100.0, 50.0));
    state.update(CanvasMessage::ResizeStarted.into());
    state.update(CanvasMessage::ResizeMoved { dw: 100.0, dh: 0.0 }.into());
    let t = state.transform();
    assert_eq!((t.width, t.height), (200.0, 100.0));
}

#[test]
fn select_hat_requests_preload_without_history() {
    let mut state = State::new(false);
    let event = state.update(ToolbarMessage::SelectHat(HatAsset::Crown).into());
    assert!(matches!(event, Event::PreloadRequested(HatAsset::Crown)));
    assert_eq!(state.hat(), HatAsset::Crown);
    assert!(!state.can_undo());
}

#[test]
fn download_is_guarded_while_processing() {
    let mut state = editor_with_image(10, 10);
    assert!(matches!(
        state.update(ToolbarMessage::Download.into()),
        Event::DownloadRequested
    ));
    assert!(state.is_processing());
    assert!(matches!(state.update(ToolbarMessage::Share.into()), Event::None));

    state.update(Message::ProcessingFinished(Ok(())));
    assert!(!state.is_processing());
    assert!(matches!(
        state.update(ToolbarMessage::Share.into()),
        Event::ShareRequested
    ));
}

#[test]
fn download_without_image_is_ignored() {
    let mut state = State::new(false);
    assert!(matches!(state.update(ToolbarMessage::Download.into()), Event::None));
    assert!(!state.is_processing());
}

#[test]
fn failures_fill_error_slot_until_dismissed() {
    let mut state = editor_with_image(10, 10);
    state.update(ToolbarMessage::Download.into());
    let event = state.update(Message::ProcessingFinished(Err(Error::Canvas("no".into()))));

    assert!(matches!(event, Event::Failed(Error::Canvas(_))));
    assert!(!state.is_processing());
    assert_eq!(state.error().map(Error::i18n_key), Some("error-canvas-unavailable"));

    state.update(Message::DismissError);
    assert!(state.error().is_none());
}

#[test]
fn cancelled_upload_is_silent() {
    let mut state = State::new(false);
    state.update(Message::UploadStarted);
    assert!(state.is_loading());

    let event = state.update(Message::ImageLoadFailed(Error::Cancelled));
    assert!(matches!(event, Event::None));
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}

#[test]
fn restore_transform_does_not_record_history() {
    let mut state = State::new(false);
    state.restore_transform(HatTransform {
        rotation: 45.0,
        ..HatTransform::default()
    });
    assert_eq!(state.transform().rotation, 45.0);
    assert!(!state.can_undo());
}
