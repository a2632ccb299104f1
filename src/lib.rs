// SPDX-License-Identifier: MPL-2.0
//! `pfp_editor` puts a hat on a profile picture.
//!
//! Load a photo, drag, resize and rotate one of the built-in hats over it,
//! then export a square PNG or share it. The editor follows a message/event
//! design so any front end can drive it; the bundled binary drives it from
//! the command line.

#![doc(html_root_url = "https://docs.rs/pfp_editor/0.1.0")]

pub mod app;
pub mod diagnostics;
pub mod editor;
pub mod error;
pub mod i18n;
pub mod media;
pub mod notifications;
pub mod storage;
