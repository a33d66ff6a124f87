//! Transient status notices shown after a save or delete.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// Pending notices, oldest first. Expiry is evaluated against a caller
/// supplied clock so it can be driven from tests.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message, Instant::now());
    }

    /// Notices still visible at `now`.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| !n.is_expired(now))
    }

    /// Drop expired notices.
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|n| !n.is_expired(now));
    }

    /// Take every pending notice, expired or not.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}
