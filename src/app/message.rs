// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::editor;
use crate::error::Error;
use crate::media::{HatAsset, LoadedImage, OverlayBitmap};
use crate::notifications::NotificationMessage;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Editor(editor::Message),
    /// Start decoding a photo; supersedes any upload in flight.
    OpenImage(PathBuf),
    /// Result of a background decode, tagged with its upload generation.
    ImageDecoded {
        generation: u64,
        result: Result<LoadedImage, Error>,
    },
    OverlayRasterized {
        asset: HatAsset,
        result: Result<OverlayBitmap, Error>,
    },
    Notification(NotificationMessage),
}

impl From<editor::Message> for Message {
    fn from(message: editor::Message) -> Self {
        Message::Editor(message)
    }
}

impl From<editor::ToolbarMessage> for Message {
    fn from(message: editor::ToolbarMessage) -> Self {
        Message::Editor(message.into())
    }
}

impl From<editor::CanvasMessage> for Message {
    fn from(message: editor::CanvasMessage) -> Self {
        Message::Editor(message.into())
    }
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional photo path to load on startup.
    pub file_path: Option<String>,
    /// Optional data directory override (for local storage).
    /// Takes precedence over `PFP_EDITOR_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PFP_EDITOR_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
