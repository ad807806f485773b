//! Transient notices shown in the top-right corner.
//!
//! Each notice lives for [`NOTICE_TTL`] and then disappears on its own.
//! Newest notices stack on top; the stack is capped so a burst of failures
//! cannot cover the whole screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

const MAX_STACK: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    posted: Instant,
}

#[derive(Debug, Default)]
pub struct Notices {
    entries: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    fn push(&mut self, level: NoticeLevel, text: String) {
        self.entries.push_front(Notice {
            level,
            text,
            posted: Instant::now(),
        });
        self.entries.truncate(MAX_STACK);
    }

    /// Drop every notice older than [`NOTICE_TTL`] as of `now`.
    pub fn sweep_at(&mut self, now: Instant) {
        self.entries
            .retain(|notice| now.duration_since(notice.posted) < NOTICE_TTL);
    }

    /// Notices newest first, the order they stack on screen.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
