//! Transient user-facing notices raised by the order views.
//!
//! Views append notices as events arrive; the front-end drains and renders
//! them. Nothing here blocks - a notice is a record, not a dialog.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    /// Blocking-alert class failures (validation, failed requests).
    Alert,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            message: message.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Ordered log of pending notices for one view.
#[derive(Debug, Default)]
pub struct NoticeLog {
    pending: Vec<Notice>,
}

impl NoticeLog {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.pending.push(Notice::new(kind, message));
    }

    /// Hand the pending notices to the renderer and clear the log.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
