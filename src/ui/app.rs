//! Terminal UI shell.
//!
//! Single-threaded poll loop: every iteration reads the clock once, advances
//! the countdown, polls the search debounce, and applies a due form
//! submission before handling the next key event. All store mutation happens
//! here, on the event sequence.

use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::form::{FormAction, FormMode, FormState};
use crate::search::{self, Debounce};
use crate::task::{TaskDraft, TaskStore};
use crate::timer::Countdown;

const EVENT_POLL_MS: u64 = 120;

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: Uuid,
    pub(crate) title: String,
}

struct PendingSubmit {
    due: Instant,
    draft: TaskDraft,
    mode: FormMode,
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) filtered: Vec<usize>,
    pub(crate) selected: Option<usize>,
    pub(crate) session_started: bool,
    pub(crate) timer: Countdown,
    pub(crate) search: Debounce,
    pub(crate) search_active: bool,
    pub(crate) form: Option<FormState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) info_message: Option<String>,
    pub(crate) today: NaiveDate,
    pending_submit: Option<PendingSubmit>,
    submit_delay: Duration,
}

impl AppState {
    fn new(store: TaskStore, config: &Config) -> Self {
        let mut app = Self {
            store,
            filtered: Vec::new(),
            selected: None,
            session_started: false,
            timer: Countdown::new(Duration::from_secs(config.timer.duration_secs)),
            search: Debounce::new(Duration::from_millis(config.search.debounce_ms)),
            search_active: false,
            form: None,
            delete_confirm: None,
            info_message: None,
            today: Local::now().date_naive(),
            pending_submit: None,
            submit_delay: Duration::from_millis(config.form.submit_delay_ms),
        };
        app.apply_filter();
        app
    }

    pub(crate) fn selected_task(&self) -> Option<&crate::task::Task> {
        self.selected.and_then(|idx| self.store.list().get(idx))
    }

    pub(crate) fn submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    pub(crate) fn footer_hint(&self) -> String {
        if !self.session_started {
            return "s start session  q quit".to_string();
        }
        if self.delete_confirm.is_some() {
            return "y confirm delete  esc cancel".to_string();
        }
        if self.form.is_some() {
            if self.submitting() {
                return "saving...".to_string();
            }
            return "enter next/submit  tab move  esc cancel".to_string();
        }
        if self.search_active {
            return "type to search  enter done  esc clear".to_string();
        }
        if self.timer.is_expired() {
            return "time is up  r reset session  q quit".to_string();
        }
        "j/k move  a add  e edit  d delete  space toggle done  / search  r reset  q quit"
            .to_string()
    }

    pub(crate) fn task_count_summary(&self) -> String {
        let total = self.store.list().len();
        let shown = self.filtered.len();
        if shown == total {
            format!("{total} tasks")
        } else {
            format!("{shown} of {total} tasks")
        }
    }

    fn apply_filter(&mut self) {
        let previous = self.selected_task().map(|task| task.id);
        self.filtered = search::filter_indices(self.store.list(), self.search.committed());
        self.selected = match previous {
            Some(id) => self
                .filtered
                .iter()
                .copied()
                .find(|idx| self.store.list()[*idx].id == id)
                .or_else(|| self.filtered.first().copied()),
            None => self.filtered.first().copied(),
        };
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .and_then(|idx| self.filtered.iter().position(|candidate| *candidate == idx))
            .unwrap_or(0);
        let max = self.filtered.len().saturating_sub(1);
        let next = (current as isize + delta).clamp(0, max as isize) as usize;
        self.selected = Some(self.filtered[next]);
    }

    fn start_session(&mut self, now: Instant) {
        self.session_started = true;
        self.timer.start(now);
    }

    /// Return to the start screen: timer back to full, tasks cleared, search
    /// and form state dropped.
    fn reset_session(&mut self) {
        self.session_started = false;
        self.timer.reset();
        self.store.clear();
        self.form = None;
        self.pending_submit = None;
        self.delete_confirm = None;
        self.search.clear();
        self.search_active = false;
        self.info_message = None;
        self.apply_filter();
    }

    /// Hold the validated draft for the artificial submission delay; the
    /// form stays open and disabled until the delay elapses.
    fn schedule_submit(&mut self, now: Instant) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.build_draft(self.today) {
            Ok(draft) => {
                let mode = form.mode();
                form.set_submitting(true);
                self.pending_submit = Some(PendingSubmit {
                    due: now + self.submit_delay,
                    draft,
                    mode,
                });
            }
            Err(err) => form.set_error(err.to_string()),
        }
    }

    fn apply_pending_submit(&mut self, now: Instant) -> bool {
        let due = matches!(self.pending_submit.as_ref(), Some(pending) if now >= pending.due);
        if !due {
            return false;
        }
        let Some(pending) = self.pending_submit.take() else {
            return false;
        };

        match pending.mode {
            FormMode::Create => {
                let task = self.store.create(pending.draft);
                self.info_message = Some(format!("Created '{}'", task.title));
            }
            FormMode::Edit(id) => match self.store.update(id, pending.draft) {
                Ok(task) => self.info_message = Some(format!("Updated '{}'", task.title)),
                // The edited task vanished underneath the form; nothing to
                // roll back, just report it.
                Err(err) => self.info_message = Some(err.to_string()),
            },
        }

        self.form = None;
        self.apply_filter();
        true
    }

    fn open_create_form(&mut self) {
        self.form = Some(FormState::create(self.today));
        self.info_message = None;
    }

    fn open_edit_form(&mut self) {
        if let Some(task) = self.selected_task() {
            self.form = Some(FormState::edit(task));
            self.info_message = None;
        }
    }

    fn open_delete_confirm(&mut self) {
        if let Some(task) = self.selected_task() {
            self.delete_confirm = Some(DeleteConfirmState {
                task_id: task.id,
                title: task.title.clone(),
            });
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        if let Err(err) = self.store.toggle_complete(id) {
            self.info_message = Some(err.to_string());
        }
        self.apply_filter();
    }

    fn confirm_delete(&mut self) {
        if let Some(confirm) = self.delete_confirm.take() {
            self.store.delete(confirm.task_id);
            self.info_message = Some(format!("Deleted '{}'", confirm.title));
            self.apply_filter();
        }
    }
}

pub fn run(store: TaskStore, config: &Config) -> Result<()> {
    let mut app = AppState::new(store, config);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut dirty = true;
    loop {
        let now = Instant::now();

        if app.timer.tick(now) {
            dirty = true;
        }
        if app.search.poll(now) {
            app.apply_filter();
            dirty = true;
        }
        if app.apply_pending_submit(now) {
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| super::view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key, Instant::now()) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }

    // Drop the pending commit so no stale filter update can apply.
    app.search.cancel();
    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    if !app.session_started {
        match key.code {
            KeyCode::Char('s') => app.start_session(now),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        return false;
    }

    if app.delete_confirm.is_some() {
        match key.code {
            KeyCode::Char('y') => app.confirm_delete(),
            KeyCode::Esc | KeyCode::Char('n') => app.delete_confirm = None,
            _ => {}
        }
        return false;
    }

    if let Some(form) = app.form.as_mut() {
        match form.handle_key(key) {
            FormAction::Cancel => {
                if !app.submitting() {
                    app.form = None;
                }
            }
            FormAction::Submit => app.schedule_submit(now),
            FormAction::None => {}
        }
        return false;
    }

    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search.clear();
                app.search_active = false;
                app.apply_filter();
            }
            KeyCode::Enter => {
                if app.search.flush() {
                    app.apply_filter();
                }
                app.search_active = false;
            }
            KeyCode::Backspace => {
                let mut value = app.search.raw().to_string();
                value.pop();
                app.search.input(value, now);
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut value = app.search.raw().to_string();
                value.push(ch);
                app.search.input(value, now);
            }
            _ => {}
        }
        return false;
    }

    let expired = app.timer.is_expired();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('/') if !expired => app.search_active = true,
        KeyCode::Char('r') => app.reset_session(),
        // Editing is gated once the session time is up.
        KeyCode::Char('a') if !expired => app.open_create_form(),
        KeyCode::Char('e') if !expired => app.open_edit_form(),
        KeyCode::Char('d') if !expired => app.open_delete_confirm(),
        KeyCode::Char(' ') | KeyCode::Enter if !expired => app.toggle_selected(),
        _ => {}
    }
    false
}
