//! Task data structures shared with the remote service.
//!
//! This module defines the wire model exchanged with the taskman HTTP API:
//! the `Task` struct as the server returns it, the client-side `Draft`
//! composed before submission, and the two-state `Status`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task as assigned and stored by the remote service.
///
/// Field names follow the service's camelCase JSON. `description` and
/// `dueDate` may be absent in responses and decode to empty strings; the
/// client forwards both verbatim and never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    pub status: Status,
}

/// An in-progress task composed locally. Carries no id or status; the
/// service assigns both on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    /// The opposite status, used to build the toggle candidate.
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Status::Completed
    }

    /// Label for the per-row toggle control.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Status::Pending => "Complete",
            Status::Completed => "Undo",
        }
    }
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
/// Returns `None` when the value is not a YYYY-MM-DD date.
pub fn format_due_relative(due_date: &str, today: NaiveDate) -> Option<String> {
    let due = NaiveDate::parse_from_str(due_date.trim(), "%Y-%m-%d").ok()?;
    let days = (due - today).num_days();
    Some(if days == 0 {
        "today".into()
    } else if days == 1 {
        "tomorrow".into()
    } else if days > 1 {
        format!("in {}d", days)
    } else {
        format!("{}d late", -days)
    })
}
