// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    /// The uploaded photo could not be decoded.
    ImageLoad(String),
    /// A hat asset could not be loaded or rasterized.
    OverlayLoad { path: String, reason: String },
    Svg(String),
    /// No drawing surface could be allocated for the requested size.
    Canvas(String),
    /// The selected hat bitmap was still unavailable at export time.
    MissingOverlay(String),
    Share(String),
    Storage(StorageError),
    Config(String),
    /// A background operation was superseded before it completed.
    Cancelled,
}

/// Failures of the local key-value store.
///
/// These never reach the user: the in-memory editor state stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The write would push the store past its byte quota.
    QuotaExceeded { needed: usize, quota: usize },
    /// The backing file could not be written.
    Write(String),
    /// The backing file exists but could not be read or decoded.
    Read(String),
}

impl Error {
    /// Returns the i18n message key shown to the user for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::ImageLoad(_) => "error-image-load",
            Error::OverlayLoad { .. } | Error::Svg(_) => "error-overlay-load",
            Error::Canvas(_) => "error-canvas-unavailable",
            Error::MissingOverlay(_) => "error-overlay-missing",
            Error::Share(_) => "error-share-failed",
            Error::Storage(_) => "error-storage",
            Error::Config(_) => "error-config",
            Error::Cancelled => "error-cancelled",
        }
    }

    /// Whether this error should be surfaced to the user.
    ///
    /// Storage failures are only logged and cancellations are expected.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Error::Storage(_) | Error::Cancelled)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QuotaExceeded { needed, quota } => {
                write!(f, "quota exceeded ({needed} bytes needed, quota is {quota})")
            }
            StorageError::Write(msg) => write!(f, "write failed: {msg}"),
            StorageError::Read(msg) => write!(f, "read failed: {msg}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::ImageLoad(e) => write!(f, "Image Error: {}", e),
            Error::OverlayLoad { path, reason } => {
                write!(f, "Overlay Error: {}: {}", path, reason)
            }
            Error::Svg(e) => write!(f, "SVG Error: {}", e),
            Error::Canvas(e) => write!(f, "Canvas Error: {}", e),
            Error::MissingOverlay(path) => write!(f, "Overlay not loaded: {}", path),
            Error::Share(e) => write!(f, "Share Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
