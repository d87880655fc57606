//! Ephemeral popup notifications emitted by the reconciliation flows.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// How long a client should keep one popup on screen before expiring it.
pub const DISPLAY_WINDOW_MS: u64 = 3_000;

/// Monotonic source of notification ids.
///
/// The id is the notification's identity: clients remove popups by id, so
/// two popups with identical content stay independent.
#[derive(Debug, Default)]
pub struct NotificationSequence(AtomicU64);

impl NotificationSequence {
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub display_ms: u64,
    #[serde(flatten)]
    pub kind: NotificationKind,
}

impl Notification {
    #[must_use]
    pub fn new(seq: &NotificationSequence, kind: NotificationKind) -> Self {
        Self {
            id: seq.next_id(),
            display_ms: DISPLAY_WINDOW_MS,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    /// A challenge slot advanced this scan.
    ChallengeProgressed {
        label: String,
        count_pre: i32,
        count_post: i32,
        count_total: i32,
    },
    /// A badge crossed its threshold this scan.
    BadgeUnlocked { badge_id: i16, label: String },
}
