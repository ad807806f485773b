//! Client-side snapshot of the task list plus the draft under composition.
//!
//! The store only changes when a server response confirms an operation, so
//! a failed request leaves it untouched. Writes all come from the event
//! loop; futures never touch it directly.

use crate::task::{Draft, Task};

/// Which draft field an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    DueDate,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Store {
    pub tasks: Vec<Task>,
    pub draft: Draft,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched list, dropping whatever was held before.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Add a newly created task at the end of the list.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the task with `id`. Unknown ids leave the list as-is.
    pub fn remove_by_id(&mut self, id: u64) {
        self.tasks.retain(|task| task.id != id);
    }

    /// Overwrite the task sharing `task.id` in place, keeping its position.
    /// Unknown ids leave the list as-is.
    pub fn replace_by_id(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Title => self.draft.title = value,
            DraftField::Description => self.draft.description = value,
            DraftField::DueDate => self.draft.due_date = value,
        }
    }

    pub fn clear_draft(&mut self) {
        self.draft = Draft::default();
    }
}
