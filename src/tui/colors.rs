//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Background for success notices.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Border highlight for the active form field.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Background for error notices.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
