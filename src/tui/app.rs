//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates the requests
//! running against the task service. Every mutation of the local task list
//! waits for the server's answer; the answers arrive as [`ApiEvent`]s on a
//! channel drained at the top of each loop turn.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiEvent, TaskApi, BASE_URL};
use crate::notify::{NoticeLevel, Notices};
use crate::store::Store;
use crate::task::{format_due_relative, Draft, Task};
use crate::tui::{
    colors::{DARK_GREEN, DARK_RED, GOLD},
    draft_form::{DraftForm, DESCRIPTION_FIELD, DUE_FIELD, TITLE_FIELD},
    enums::Screen,
    utils::centered_rect,
};

/// Main application state for the terminal user interface.
///
/// Holds the current screen, the confirmed task snapshot, the draft form,
/// and the channel on which request outcomes come back. User actions spawn
/// their requests onto the runtime handle and return immediately.
pub struct App {
    screen: Screen,
    store: Store,
    api: TaskApi,
    runtime: Handle,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    task_list_state: TableState,
    draft_form: DraftForm,
    notices: Notices,
    status_message: String,
}

impl App {
    pub fn new(api: TaskApi, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        App {
            screen: Screen::List,
            store: Store::new(),
            api,
            runtime,
            events_tx,
            events_rx,
            task_list_state: TableState::default(),
            draft_form: DraftForm::from_draft(&Draft::default()),
            notices: Notices::new(),
            status_message: String::new(),
        }
    }

    /// Set a status message to display in the status bar.
    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Clear the current status message.
    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Fetch the full task list in the background.
    fn spawn_load(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(ApiEvent::Loaded(api.list().await));
        });
    }

    /// Submit the current draft in the background.
    fn spawn_create(&self) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let draft = self.store.draft.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(ApiEvent::Created(api.create(&draft).await));
        });
    }

    /// Delete a task in the background.
    fn spawn_delete(&self, id: u64) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(ApiEvent::Deleted(id, api.delete(id).await));
        });
    }

    /// Send a status-flipped copy of a task in the background.
    fn spawn_toggle(&self, candidate: Task) {
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(ApiEvent::Updated(api.update(&candidate).await));
        });
    }

    /// Fold one request outcome into the UI state. Successes mutate the
    /// store; failures only post a notice, leaving the snapshot as it was.
    fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(Ok(tasks)) => {
                self.store.replace_all(tasks);
                self.clamp_selection();
            }
            ApiEvent::Loaded(Err(err)) => {
                tracing::debug!("list failed: {}", err);
                self.notices.error("Failed to load tasks");
            }
            ApiEvent::Created(Ok(task)) => {
                self.store.append(task);
                self.store.clear_draft();
                if self.screen == Screen::Draft {
                    self.draft_form = DraftForm::from_draft(&self.store.draft);
                }
                self.clamp_selection();
                self.notices.success("Task created");
            }
            ApiEvent::Created(Err(err)) => {
                tracing::debug!("create failed: {}", err);
                self.notices.error("Failed to create task");
            }
            ApiEvent::Deleted(id, Ok(())) => {
                self.store.remove_by_id(id);
                self.clamp_selection();
                self.notices.success("Task deleted");
            }
            ApiEvent::Deleted(id, Err(err)) => {
                tracing::debug!("delete of {} failed: {}", id, err);
                self.notices.error("Failed to delete task");
            }
            ApiEvent::Updated(Ok(task)) => {
                let text = if task.status.is_completed() {
                    "Task marked completed"
                } else {
                    "Task marked pending"
                };
                self.store.replace_by_id(task);
                self.notices.success(text);
            }
            ApiEvent::Updated(Err(err)) => {
                tracing::debug!("update failed: {}", err);
                self.notices.error("Failed to update task");
            }
        }
    }

    /// Keep the table selection inside the list after it changes size.
    fn clamp_selection(&mut self) {
        if self.store.tasks.is_empty() {
            self.task_list_state.select(None);
            return;
        }
        match self.task_list_state.selected() {
            Some(selected) if selected >= self.store.tasks.len() => {
                self.task_list_state.select(Some(self.store.tasks.len() - 1));
            }
            None => self.task_list_state.select(Some(0)),
            _ => {}
        }
    }

    fn selected_task(&self) -> Option<&Task> {
        self.task_list_state
            .selected()
            .and_then(|selected| self.store.tasks.get(selected))
    }

    /// Mirror the focused form field into the store's draft.
    fn sync_active_field(&mut self) {
        let field = self.draft_form.active_draft_field();
        let value = self.draft_form.active_value().to_string();
        self.store.set_draft_field(field, value);
    }

    fn handle_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else if !self.store.tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.store.tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if !self.store.tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char('a') => {
                self.draft_form = DraftForm::from_draft(&self.store.draft);
                self.screen = Screen::Draft;
            }
            KeyCode::Char('c') => {
                if let Some(task) = self.selected_task() {
                    let mut candidate = task.clone();
                    candidate.status = candidate.status.toggled();
                    self.spawn_toggle(candidate);
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.spawn_delete(task.id);
                }
            }
            KeyCode::Char('h') => {
                self.screen = Screen::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_draft_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc => {
                // Close without discarding; the draft survives in the store.
                self.screen = Screen::List;
            }
            KeyCode::Tab | KeyCode::Down => self.draft_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.draft_form.prev_field(),
            KeyCode::Left => self.draft_form.active_field_mut().move_cursor_left(),
            KeyCode::Right => self.draft_form.active_field_mut().move_cursor_right(),
            KeyCode::Backspace => {
                self.draft_form.active_field_mut().handle_backspace();
                self.sync_active_field();
            }
            KeyCode::Delete => {
                self.draft_form.active_field_mut().handle_delete();
                self.sync_active_field();
            }
            KeyCode::Enter => {
                if self.draft_form.title.value.trim().is_empty() {
                    self.set_status_message("Title is required".to_string());
                } else {
                    self.spawn_create();
                    self.screen = Screen::List;
                }
            }
            KeyCode::Char(c) => {
                self.draft_form.active_field_mut().handle_char(c);
                self.sync_active_field();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                self.screen = Screen::List;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.clear_status_message();

                let should_quit = match self.screen {
                    Screen::List => self.handle_list_input(key.code, key.modifiers)?,
                    Screen::Draft => self.handle_draft_input(key.code, key.modifiers)?,
                    Screen::Help => self.handle_help_input(key.code, key.modifiers)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the task list table with the service address in the header.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Rest for the table
            ])
            .split(area);

        let header_text = vec![Line::from(vec![
            Span::styled("TASK MANAGER", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                BASE_URL,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let list_block = Block::default().borders(Borders::ALL).title(format!(
            "Tasks ({}) - Press 'h' for help",
            self.store.tasks.len()
        ));

        if self.store.tasks.is_empty() {
            let placeholder = Paragraph::new("No tasks yet.")
                .block(list_block)
                .alignment(Alignment::Center);
            f.render_widget(placeholder, chunks[1]);
            return;
        }

        let header_cells = ["Title", "Description", "Due", "Actions"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .store
            .tasks
            .iter()
            .map(|task| {
                let completed = task.status.is_completed();

                let title_style = if completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
                } else {
                    Style::default().fg(Color::White)
                };
                let title_cell = Cell::from(Span::styled(task.title.clone(), title_style));

                let description_cell = if task.description.is_empty() {
                    Cell::from(Span::styled(
                        "No description",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Cell::from(task.description.clone())
                };

                let due_cell = if task.due_date.is_empty() {
                    Cell::from(Span::styled(
                        "No due date",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    match format_due_relative(&task.due_date, today) {
                        Some(hint) => Cell::from(format!("{} ({})", task.due_date, hint)),
                        None => Cell::from(task.due_date.clone()),
                    }
                };

                let toggle_color = if completed { Color::Yellow } else { Color::Green };
                let actions_cell = Cell::from(Line::from(vec![
                    Span::styled(
                        task.status.toggle_label(),
                        Style::default().fg(toggle_color),
                    ),
                    Span::raw("  "),
                    Span::styled("Delete", Style::default().fg(Color::Red)),
                ]));

                Row::new(vec![title_cell, description_cell, due_cell, actions_cell])
            })
            .collect();

        let widths = [
            Constraint::Min(24),    // Title
            Constraint::Min(20),    // Description
            Constraint::Length(24), // Due
            Constraint::Length(16), // Actions
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(list_block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.task_list_state);
    }

    /// Render the new-task popup over the list.
    fn render_draft_form(&mut self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 60, area);
        f.render_widget(Clear, popup);

        let block = Block::default().borders(Borders::ALL).title("New Task");
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Due date
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let title_style = if self.draft_form.current_field == TITLE_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let title_input = Paragraph::new(self.draft_form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(title_style),
        );
        f.render_widget(title_input, chunks[0]);

        let description_style = if self.draft_form.current_field == DESCRIPTION_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let description_input = Paragraph::new(self.draft_form.description.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Description")
                .border_style(description_style),
        );
        f.render_widget(description_input, chunks[1]);

        let due_style = if self.draft_form.current_field == DUE_FIELD {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let due_input = Paragraph::new(self.draft_form.due_date.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Due (YYYY-MM-DD)")
                .border_style(due_style),
        );
        f.render_widget(due_input, chunks[2]);

        let instructions = Paragraph::new("Tab/Down, Up: Navigate  Enter: Create  Esc: Close")
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[3]);

        let cursor_chunk = chunks[self.draft_form.current_field];
        let field = self.draft_form.active_field();
        f.set_cursor_position((cursor_chunk.x + field.cursor as u16 + 1, cursor_chunk.y + 1));
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "Task Manager Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Task List:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Up/k, Down/j   Navigate tasks"),
            Line::from("  a              Add new task"),
            Line::from("  c              Toggle selected task complete/pending"),
            Line::from("  d              Delete selected task"),
            Line::from("  h              Show this help"),
            Line::from("  q/Ctrl+C/Esc   Quit"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "New Task Form:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Tab/Down, Up   Navigate between fields"),
            Line::from("  Enter          Create task (title required)"),
            Line::from("  Esc            Close the form, keeping the draft"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Notes:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Changes apply once the server confirms them."),
            Line::from("  Due dates get a relative hint when they parse as YYYY-MM-DD."),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Esc to return"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.screen {
                Screen::List => format!(
                    "Tasks: {} | a add  c toggle  d delete  h help  q quit",
                    self.store.tasks.len()
                ),
                Screen::Draft => "New Task - Enter to create, Esc to close".to_string(),
                Screen::Help => "Help".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Stack the live notices in the top-right corner, newest on top.
    fn render_notices(&mut self, f: &mut Frame) {
        let area = f.area();
        let mut y = area.y + 1;
        for notice in self.notices.iter() {
            if y + 1 >= area.bottom() {
                break;
            }
            let text = format!(" {} ", notice.text);
            let width = (text.chars().count() as u16).min(area.width.saturating_sub(2));
            if width == 0 {
                break;
            }
            let rect = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, 1);
            let bg = match notice.level {
                NoticeLevel::Success => DARK_GREEN,
                NoticeLevel::Error => DARK_RED,
            };
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(text).style(Style::default().bg(bg).fg(Color::White)),
                rect,
            );
            y += 1;
        }
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.screen {
            Screen::List => self.render_task_list(f, chunks[0]),
            Screen::Draft => {
                self.render_task_list(f, chunks[0]);
                self.render_draft_form(f, chunks[0]);
            }
            Screen::Help => self.render_help(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
        self.render_notices(f);
    }

    /// Main event loop for the TUI application.
    ///
    /// Drains finished requests, expires notices, renders, then polls for
    /// input until the user exits. The initial list fetch starts here.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.spawn_load();
        loop {
            while let Ok(event) = self.events_rx.try_recv() {
                self.apply(event);
            }
            self.notices.sweep_at(Instant::now());

            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
