// SPDX-License-Identifier: MPL-2.0
//! Diagnostics: the application's logging channel.
//!
//! Events (user actions, warnings, errors) are captured through a
//! [`DiagnosticsHandle`], kept in a memory-bounded [`CircularBuffer`], mirrored
//! to stderr for warnings and errors, and exportable as JSON.

mod buffer;
mod collector;
mod events;

pub use buffer::CircularBuffer;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, UserAction};
