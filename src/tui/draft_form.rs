//! Form state for composing a new task.

use crate::store::DraftField;
use crate::task::Draft;
use crate::tui::input::InputField;

// Field order within the form, top to bottom.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const DUE_FIELD: usize = 2;

/// Input fields for the draft popup plus which one holds focus.
#[derive(Debug, Clone)]
pub struct DraftForm {
    pub title: InputField,
    pub description: InputField,
    pub due_date: InputField,
    pub current_field: usize,
}

impl DraftForm {
    /// Build a form pre-filled from a draft, focus on the title.
    pub fn from_draft(draft: &Draft) -> Self {
        let mut form = Self {
            title: InputField::with_value(&draft.title),
            description: InputField::with_value(&draft.description),
            due_date: InputField::with_value(&draft.due_date),
            current_field: TITLE_FIELD,
        };
        form.update_active_field();
        form
    }

    pub fn field_count(&self) -> usize {
        3
    }

    /// Move focus to the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move focus to the previous field, wrapping around.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + self.field_count() - 1) % self.field_count();
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
        self.due_date.active = self.current_field == DUE_FIELD;
    }

    /// Which draft field the focused input edits.
    pub fn active_draft_field(&self) -> DraftField {
        match self.current_field {
            TITLE_FIELD => DraftField::Title,
            DESCRIPTION_FIELD => DraftField::Description,
            _ => DraftField::DueDate,
        }
    }

    pub fn active_field(&self) -> &InputField {
        match self.current_field {
            TITLE_FIELD => &self.title,
            DESCRIPTION_FIELD => &self.description,
            _ => &self.due_date,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut InputField {
        match self.current_field {
            TITLE_FIELD => &mut self.title,
            DESCRIPTION_FIELD => &mut self.description,
            _ => &mut self.due_date,
        }
    }

    pub fn active_value(&self) -> &str {
        &self.active_field().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_draft_fills_fields_and_focuses_the_title() {
        let draft = Draft {
            title: "Buy milk".into(),
            description: "two litres".into(),
            due_date: "2025-09-01".into(),
        };
        let form = DraftForm::from_draft(&draft);
        assert_eq!(form.title.value, "Buy milk");
        assert_eq!(form.description.value, "two litres");
        assert_eq!(form.due_date.value, "2025-09-01");
        assert_eq!(form.current_field, TITLE_FIELD);
        assert!(form.title.active);
        assert!(!form.description.active);
    }

    #[test]
    fn focus_cycles_forward_through_all_fields() {
        let mut form = DraftForm::from_draft(&Draft::default());
        form.next_field();
        assert_eq!(form.current_field, DESCRIPTION_FIELD);
        form.next_field();
        assert_eq!(form.current_field, DUE_FIELD);
        form.next_field();
        assert_eq!(form.current_field, TITLE_FIELD);
    }

    #[test]
    fn focus_cycles_backward_and_wraps() {
        let mut form = DraftForm::from_draft(&Draft::default());
        form.prev_field();
        assert_eq!(form.current_field, DUE_FIELD);
        assert!(form.due_date.active);
        assert_eq!(form.active_draft_field(), DraftField::DueDate);
    }

    #[test]
    fn active_field_mut_edits_the_focused_input() {
        let mut form = DraftForm::from_draft(&Draft::default());
        form.next_field();
        form.active_field_mut().handle_char('x');
        assert_eq!(form.description.value, "x");
        assert_eq!(form.active_value(), "x");
    }
}
