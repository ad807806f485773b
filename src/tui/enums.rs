//! Enumerations for TUI state management.

/// Which screen the UI is currently showing. `Draft` and `Help` render on
/// top of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Draft,
    Help,
}
