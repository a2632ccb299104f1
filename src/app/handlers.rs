// SPDX-License-Identifier: MPL-2.0
//! Side effects requested by the editor: persistence, overlay preloading,
//! export, share and error reporting.

use super::{App, Message};
use crate::editor::{self, Event, HatTransform};
use crate::error::{Error, Result};
use crate::media::image::rgba_from_pixmap;
use crate::media::share::{self, ShareOutcome, SharePayload, ShareTarget};
use crate::media::{compositor, export, HatAsset};
use crate::notifications::Notification;
use crate::storage;
use chrono::Utc;
use std::path::PathBuf;
use tiny_skia::Pixmap;

impl App {
    pub(super) fn handle_editor_event(&mut self, event: Event) {
        match event {
            Event::None | Event::ImageChanged => {}
            Event::TransformSettled(transform) => self.persist_transform(&transform),
            Event::PreloadRequested(hat) => self.preload_hat(hat),
            Event::DownloadRequested => {
                let result = self.download().map(|_| ());
                self.finish_processing(result);
            }
            Event::ShareRequested => {
                let result = self.share().map(|_| ());
                self.finish_processing(result);
            }
            Event::Failed(err) => self.report(&err),
        }
    }

    fn finish_processing(&mut self, result: Result<()>) {
        let event = self
            .editor
            .update(editor::Message::ProcessingFinished(result));
        self.handle_editor_event(event);
    }

    /// Best effort: a failed write only reaches diagnostics.
    fn persist_transform(&mut self, transform: &HatTransform) {
        if let Err(err) = storage::save_transform(self.storage.as_mut(), transform) {
            self.log
                .log_warning(format!("transform not persisted: {err}"));
        }
    }

    pub(super) fn preload_all_hats(&mut self) {
        let sender = self.sender.clone();
        self.overlays.preload_all(move |asset, result| {
            let _ = sender.send(Message::OverlayRasterized { asset, result });
        });
    }

    fn preload_hat(&mut self, hat: HatAsset) {
        let sender = self.sender.clone();
        self.overlays.preload(hat, move |asset, result| {
            let _ = sender.send(Message::OverlayRasterized { asset, result });
        });
    }

    fn report(&mut self, err: &Error) {
        self.notifications
            .push(Notification::error(err.i18n_key()).with_arg("detail", err.to_string()));
    }

    /// Composites the current photo, hat and transform at the output size.
    ///
    /// A hat that has not finished loading is rasterized on the spot.
    pub(super) fn render_current(&mut self) -> Result<Pixmap> {
        let image = self
            .editor
            .image()
            .cloned()
            .ok_or_else(|| Error::Canvas("no image loaded".into()))?;
        let hat = self.editor.hat();
        let overlay = match self.overlays.get(hat) {
            Some(bitmap) => bitmap,
            None => self
                .overlays
                .load_now(hat)
                .map_err(|e| Error::MissingOverlay(format!("{}: {e}", hat.path())))?,
        };

        compositor::render(
            image.pixmap(),
            &self.editor.transform(),
            &overlay,
            self.config.output_size(),
        )
    }

    fn download(&mut self) -> Result<PathBuf> {
        let canvas = self.render_current()?;
        let png = compositor::encode_png(&canvas)?;
        let directory = self
            .export_dir
            .clone()
            .ok_or_else(|| Error::Io("no export directory available".into()))?;
        let path = export::write_export(&directory, &png, Utc::now())?;

        self.remember_download(&canvas);
        self.notifications.push(
            Notification::success("export-saved").with_arg("path", path.display().to_string()),
        );
        Ok(path)
    }

    fn remember_download(&mut self, canvas: &Pixmap) {
        let thumbnail = match compositor::encode_thumbnail(canvas) {
            Ok(thumbnail) => thumbnail,
            Err(err) => {
                self.log.log_warning(format!("thumbnail skipped: {err}"));
                return;
            }
        };
        if let Err(err) = self.downloads.record(thumbnail, self.storage.as_mut()) {
            self.log
                .log_warning(format!("recent downloads kept in memory: {err}"));
        }
    }

    fn share(&mut self) -> Result<ShareOutcome> {
        let canvas = self.render_current()?;
        let rgba = rgba_from_pixmap(&canvas);

        let payload = SharePayload {
            text: self.config.share_text(),
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.as_raw(),
        };
        let target = self
            .share_target
            .as_mut()
            .map(|target| &mut **target as &mut dyn ShareTarget);
        let outcome = share::share(target, self.url_opener.as_mut(), &payload)?;

        let notification = match &outcome {
            // The clipboard only holds the picture; the caption goes in the notice.
            ShareOutcome::Native => Notification::success("share-clipboard")
                .with_arg("title", self.config.share_title())
                .with_arg("text", self.config.share_text()),
            ShareOutcome::WebIntent { url } => {
                Notification::info("share-web-intent").with_arg("url", url.clone())
            }
        };
        self.notifications.push(notification);
        Ok(outcome)
    }
}
