// SPDX-License-Identifier: MPL-2.0
//! User-facing notifications.
//!
//! Failures are surfaced as notifications carrying an i18n key; errors stay
//! until the user dismisses them, other severities expire on their own.
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for queuing and lifecycle management

mod manager;
mod notification;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
