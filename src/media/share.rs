// SPDX-License-Identifier: MPL-2.0
//! Sharing the composited picture.
//!
//! A native target (the system clipboard) is tried first when it can carry
//! images. Otherwise, or when it refuses the image, a web intent URL with the
//! share text is opened in the browser.

use crate::app::config::SHARE_INTENT_URL;
use crate::error::{Error, Result};
use std::borrow::Cow;

/// What gets shared.
#[derive(Debug, Clone, Copy)]
pub struct SharePayload<'a> {
    /// Preset text for the web intent.
    pub text: &'a str,
    pub width: u32,
    pub height: u32,
    /// Straight RGBA pixels, row-major.
    pub rgba: &'a [u8],
}

/// A destination that can receive the picture as a file or image.
pub trait ShareTarget {
    /// Whether this target can currently accept image attachments.
    fn can_share_files(&self) -> bool;

    fn share(&mut self, payload: &SharePayload<'_>) -> Result<()>;
}

/// Opens URLs for the web fallback.
pub trait UrlOpener {
    fn open_url(&mut self, url: &str) -> Result<()>;
}

/// How a share request was fulfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Native,
    WebIntent { url: String },
}

/// Builds the tweet-intent URL carrying `text`.
#[must_use]
pub fn web_intent_url(text: &str) -> String {
    format!("{SHARE_INTENT_URL}?text={}", urlencoding::encode(text))
}

/// Shares through `target` when possible, otherwise opens the web intent.
///
/// A native failure falls back to the web intent; only a failure to open
/// the fallback is returned as an error.
pub fn share(
    target: Option<&mut dyn ShareTarget>,
    opener: &mut dyn UrlOpener,
    payload: &SharePayload<'_>,
) -> Result<ShareOutcome> {
    if let Some(target) = target {
        if target.can_share_files() && target.share(payload).is_ok() {
            return Ok(ShareOutcome::Native);
        }
    }

    let url = web_intent_url(payload.text);
    opener.open_url(&url)?;
    Ok(ShareOutcome::WebIntent { url })
}

/// Copies the picture to the system clipboard.
pub struct ClipboardShare {
    clipboard: Option<arboard::Clipboard>,
}

impl ClipboardShare {
    /// Connects to the clipboard; the target stays unavailable if that fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clipboard: arboard::Clipboard::new().ok(),
        }
    }
}

impl Default for ClipboardShare {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareTarget for ClipboardShare {
    fn can_share_files(&self) -> bool {
        self.clipboard.is_some()
    }

    fn share(&mut self, payload: &SharePayload<'_>) -> Result<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| Error::Share("clipboard unavailable".into()))?;
        clipboard
            .set_image(arboard::ImageData {
                width: payload.width as usize,
                height: payload.height as usize,
                bytes: Cow::Borrowed(payload.rgba),
            })
            .map_err(|e| Error::Share(e.to_string()))
    }
}

/// Opens URLs in the default browser.
#[derive(Debug, Default)]
pub struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open_url(&mut self, url: &str) -> Result<()> {
        open::that(url).map_err(|e| Error::Share(e.to_string()))
    }
}
