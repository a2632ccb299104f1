// SPDX-License-Identifier: MPL-2.0
//! Application root: owns the editor and every service it drives.
//!
//! The `App` runs a single cooperative loop. Messages are applied one at a
//! time; slow work (photo decoding, hat rasterization) runs on tokio's
//! blocking pool and reports back by sending a [`Message`] into the loop.
//! Editor [`Event`](crate::editor::Event)s are turned into side effects in
//! [`handlers`].

pub mod config;
mod handlers;
mod message;
pub mod paths;

pub use message::{Flags, Message};

use crate::diagnostics::{DiagnosticsCollector, DiagnosticsHandle, UserAction};
use crate::editor;
use crate::error::Result;
use crate::i18n::I18n;
use crate::media::share::{BrowserOpener, ClipboardShare, ShareTarget, UrlOpener};
use crate::media::{self, CancellationToken, OverlayCache};
use crate::notifications::{self, Notification};
use crate::storage::{self, LocalStorage, RecentDownloads, Storage};
use config::{Config, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, OVERLAY_RASTER_SIZE};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// An upload whose decode is still running.
#[derive(Debug)]
struct Upload {
    generation: u64,
    cancel: CancellationToken,
}

pub struct App {
    pub i18n: I18n,
    config: Config,
    editor: editor::State,
    overlays: OverlayCache,
    storage: Box<dyn Storage>,
    downloads: RecentDownloads,
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
    log: DiagnosticsHandle,
    share_target: Option<Box<dyn ShareTarget>>,
    url_opener: Box<dyn UrlOpener>,
    export_dir: Option<PathBuf>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    upload: Option<Upload>,
    upload_generation: u64,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("editor", &self.editor)
            .field("overlays", &self.overlays)
            .field("downloads", &self.downloads.len())
            .field("export_dir", &self.export_dir)
            .field("upload", &self.upload)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the application, rehydrates persisted state and starts loading
    /// every hat in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(flags: Flags) -> Self {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.as_ref().map(PathBuf::from));
        let i18n = I18n::new(flags.lang.clone(), &config);

        let diagnostics = DiagnosticsCollector::new(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        let log = diagnostics.handle();
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(log.clone());

        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let storage_path =
            paths::local_storage_file_with_override(flags.data_dir.as_ref().map(PathBuf::from));
        let storage = match storage_path {
            Some(path) => {
                let (storage, warning) = LocalStorage::open(path, config.storage_quota());
                if let Some(err) = warning {
                    log.log_warning(format!("local storage reset: {err}"));
                }
                storage
            }
            None => {
                log.log_warning("no data directory, local storage kept in memory");
                LocalStorage::in_memory(config.storage_quota())
            }
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        let mut app = Self {
            i18n,
            editor: editor::State::new(config.lock_aspect()),
            overlays: OverlayCache::new(OVERLAY_RASTER_SIZE),
            storage: Box::new(storage),
            downloads: RecentDownloads::default(),
            notifications,
            diagnostics,
            log,
            share_target: Some(Box::new(ClipboardShare::new())),
            url_opener: Box::new(BrowserOpener),
            export_dir: config.export_directory(),
            config,
            sender,
            receiver,
            upload: None,
            upload_generation: 0,
        };

        app.rehydrate();
        app.preload_all_hats();

        if let Some(path) = flags.file_path {
            app.update(Message::OpenImage(PathBuf::from(path)));
        }
        app.diagnostics.process_pending();
        app
    }

    fn rehydrate(&mut self) {
        match storage::load_transform(self.storage.as_ref()) {
            Ok(Some(transform)) => self.editor.restore_transform(transform),
            Ok(None) => {}
            Err(err) => self.log.log_warning(format!("ignored stored transform: {err}")),
        }

        let (downloads, warning) = RecentDownloads::load(self.storage.as_ref());
        if let Some(err) = warning {
            self.log
                .log_warning(format!("ignored stored downloads: {err}"));
        }
        self.downloads = downloads;
    }

    /// Applies one message and flushes pending diagnostics.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Editor(msg) => {
                // User input drives the display clock for timed notifications.
                self.notifications
                    .handle_message(&notifications::NotificationMessage::Tick);
                self.log_editor_action(&msg);
                if matches!(msg, editor::Message::DismissError) {
                    self.notifications.dismiss_errors();
                }
                let event = self.editor.update(msg);
                self.handle_editor_event(event);
            }
            Message::OpenImage(path) => self.start_upload(path),
            Message::ImageDecoded { generation, result } => {
                self.finish_upload(generation, result);
            }
            Message::OverlayRasterized { asset, result } => {
                if let Err(err) = self.overlays.complete(asset, result) {
                    let event = self.editor.update(editor::Message::OverlayFailed(err));
                    self.handle_editor_event(event);
                }
            }
            Message::Notification(msg) => self.notifications.handle_message(&msg),
        }
        self.diagnostics.process_pending();
    }

    /// Whether a background decode or rasterization is still outstanding.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.upload.is_some() || self.overlays.has_pending()
    }

    /// Processes loop messages until no background work is outstanding.
    pub async fn run_until_idle(&mut self) {
        while self.has_pending_work() {
            match self.receiver.recv().await {
                Some(message) => self.update(message),
                None => break,
            }
        }
        while let Ok(message) = self.receiver.try_recv() {
            self.update(message);
        }
    }

    fn start_upload(&mut self, path: PathBuf) {
        if let Some(previous) = self.upload.take() {
            media::cancel(&previous.cancel);
        }
        self.upload_generation += 1;
        let generation = self.upload_generation;
        let token = media::cancellation_token();
        self.upload = Some(Upload {
            generation,
            cancel: token.clone(),
        });

        self.log.log_action_with_details(
            UserAction::LoadImage,
            Some(path.display().to_string()),
        );
        self.editor.update(editor::Message::UploadStarted);

        let sender = self.sender.clone();
        tokio::task::spawn_blocking(move || {
            let result = media::load_photo(&path, &token);
            let _ = sender.send(Message::ImageDecoded { generation, result });
        });
    }

    fn finish_upload(&mut self, generation: u64, result: Result<media::LoadedImage>) {
        // Completions of superseded uploads are dropped.
        if self.upload.as_ref().map(|u| u.generation) != Some(generation) {
            return;
        }
        self.upload = None;

        let message = match result {
            Ok(image) => editor::Message::ImageLoaded(image),
            Err(err) => editor::Message::ImageLoadFailed(err),
        };
        let event = self.editor.update(message);
        self.handle_editor_event(event);
    }

    fn log_editor_action(&self, message: &editor::Message) {
        use editor::{CanvasMessage, Message as EditorMessage, ToolbarMessage};

        let (action, details) = match message {
            EditorMessage::Toolbar(ToolbarMessage::SelectHat(hat)) => {
                (UserAction::SelectHat, Some(hat.path().to_string()))
            }
            EditorMessage::Toolbar(ToolbarMessage::FitToHead) => (UserAction::FitToHead, None),
            EditorMessage::Toolbar(ToolbarMessage::Reset) => (UserAction::ResetHat, None),
            EditorMessage::Toolbar(ToolbarMessage::RotateBy(degrees)) => {
                (UserAction::RotateHat, Some(format!("{degrees}")))
            }
            EditorMessage::Toolbar(ToolbarMessage::LockAspect(lock)) => {
                (UserAction::LockAspect, Some(lock.to_string()))
            }
            EditorMessage::Toolbar(ToolbarMessage::Undo) => (UserAction::Undo, None),
            EditorMessage::Toolbar(ToolbarMessage::Redo) => (UserAction::Redo, None),
            EditorMessage::Toolbar(ToolbarMessage::RemoveImage) => (UserAction::RemoveImage, None),
            EditorMessage::Toolbar(ToolbarMessage::Download) => (UserAction::Download, None),
            EditorMessage::Toolbar(ToolbarMessage::Share) => (UserAction::Share, None),
            EditorMessage::Canvas(CanvasMessage::DragStarted) => (UserAction::MoveHat, None),
            EditorMessage::Canvas(CanvasMessage::ResizeStarted) => (UserAction::ResizeHat, None),
            EditorMessage::SetTransform(_) => (UserAction::SetTransform, None),
            EditorMessage::DismissError => (UserAction::DismissError, None),
            _ => return,
        };
        self.log.log_action_with_details(action, details);
    }

    /// Replaces the share backends (clipboard and browser by default).
    pub fn set_share_backends(
        &mut self,
        target: Option<Box<dyn ShareTarget>>,
        opener: Box<dyn UrlOpener>,
    ) {
        self.share_target = target;
        self.url_opener = opener;
    }

    pub fn set_export_directory(&mut self, directory: PathBuf) {
        self.export_dir = Some(directory);
    }

    /// Resolves a notification into display text for the current locale.
    ///
    /// A `detail` argument is appended on its own line.
    #[must_use]
    pub fn notification_text(&self, notification: &Notification) -> String {
        let args = notification.message_args();
        let text = self.i18n.tr_with_args(notification.message_key(), args);
        match args.iter().find(|(name, _)| name == "detail") {
            Some(detail) => format!(
                "{text}\n{}",
                self.i18n.tr_with_args("error-detail", std::slice::from_ref(detail))
            ),
            None => text,
        }
    }

    /// Writes the diagnostics report as JSON.
    pub fn export_diagnostics(&mut self, path: &Path) -> Result<()> {
        self.diagnostics.process_pending();
        self.diagnostics.export_to_file(path)
    }

    #[must_use]
    pub fn editor(&self) -> &editor::State {
        &self.editor
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn overlays(&self) -> &OverlayCache {
        &self.overlays
    }

    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn downloads(&self) -> &RecentDownloads {
        &self.downloads
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut notifications::Manager {
        &mut self.notifications
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }
}
