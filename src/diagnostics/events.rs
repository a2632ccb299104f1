// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions captured for diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    LoadImage,
    RemoveImage,
    SelectHat,
    MoveHat,
    ResizeHat,
    RotateHat,
    LockAspect,
    SetTransform,
    FitToHead,
    ResetHat,
    Undo,
    Redo,
    Download,
    Share,
    DismissError,
}

/// A single diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional context (e.g., asset path, file name).
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Non-critical issue, including swallowed storage failures.
    Warning { message: String },

    /// Failure that aborted a user operation.
    Error { message: String },
}

impl DiagnosticEventKind {
    /// Single-line rendering used for the stderr mirror.
    #[must_use]
    pub fn log_line(&self) -> Option<String> {
        match self {
            DiagnosticEventKind::UserAction { .. } => None,
            DiagnosticEventKind::Warning { message } => Some(format!("[WARN] {message}")),
            DiagnosticEventKind::Error { message } => Some(format!("[ERROR] {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_uses_current_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "quota".into(),
        });
        assert!(event.timestamp >= before);
    }

    #[test]
    fn user_actions_are_not_mirrored_to_stderr() {
        let kind = DiagnosticEventKind::UserAction {
            action: UserAction::Undo,
            details: None,
        };
        assert!(kind.log_line().is_none());
    }

    #[test]
    fn warnings_and_errors_carry_prefixes() {
        let warning = DiagnosticEventKind::Warning {
            message: "disk full".into(),
        };
        let error = DiagnosticEventKind::Error {
            message: "no canvas".into(),
        };
        assert_eq!(warning.log_line().as_deref(), Some("[WARN] disk full"));
        assert_eq!(error.log_line().as_deref(), Some("[ERROR] no canvas"));
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::UserAction {
            action: UserAction::FitToHead,
            details: None,
        };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert!(json.contains("\"type\":\"user_action\""));
        assert!(json.contains("\"action\":\"fit_to_head\""));
        assert!(!json.contains("details"));
    }
}
