//! # Taskman TUI
//!
//! A terminal client for the taskman HTTP task service: list, add, complete,
//! and delete tasks from a keyboard-driven table view.
//!
//! ## Key Features
//!
//! - **Server-Backed State**: The service owns persistence; the UI shows a
//!   snapshot and refreshes it from server responses
//! - **Confirmed Mutations**: Every change waits for the server's answer and
//!   only then lands in the visible list
//! - **Rapid Capture**: A three-field popup form for new tasks, reachable
//!   with a single keypress
//! - **Transient Notices**: Success and failure toasts stack in the corner
//!   and clear themselves after a few seconds
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch against the service on localhost:8080
//! taskman
//!
//! # Capture request diagnostics to a file
//! taskman --log /tmp/taskman.log
//! ```
//!
//! Press `h` inside the UI for the full key reference. The service address
//! is fixed at build time in `api::BASE_URL`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub mod api;
pub mod cli;
pub mod notify;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod draft_form;
    pub mod enums;
    pub mod input;
    pub mod utils;
}

use api::TaskApi;
use cli::Cli;
use tui::app::App;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.log.as_deref() {
        init_logging(path)?;
    }

    let runtime =
        tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal")?;

    let mut app = App::new(TaskApi::new(), runtime.handle().clone());
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;

    result.context("UI error")
}

/// Route `tracing` diagnostics to a file. The TUI owns the terminal, so
/// nothing may write to stdout while it runs.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
