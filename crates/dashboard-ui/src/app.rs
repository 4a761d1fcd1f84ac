//! Main application state and TUI event loop for the consumption dashboard.
//!
//! [`App`] owns the theme, the dashboard session and the view-only state
//! (selected model, open picker, last status message). Key handling is a
//! plain method taking `now` so it can be driven without a terminal.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use dashboard_core::error::DashboardError;
use dashboard_core::period::PeriodPreset;
use dashboard_core::time_utils::TimezoneHandler;
use dashboard_runtime::period_state::PeriodAction;
use dashboard_runtime::session::DashboardSession;

use crate::components::model_selector::ModelSelector;
use crate::components::period_picker::{shift_days, shift_months, PickerField};
use crate::dashboard_view::{render_dashboard, DashboardView, StatusMessage};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    timezone: TimezoneHandler,
    /// IANA name shown in the header.
    timezone_name: String,
    session: DashboardSession,
    export_dir: PathBuf,
    models: ModelSelector,
    /// Focused field while the custom-range popup is open.
    picker: Option<PickerField>,
    status: Option<StatusMessage>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(
        theme_name: &str,
        timezone: TimezoneHandler,
        session: DashboardSession,
        export_dir: PathBuf,
    ) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            timezone,
            timezone_name: timezone.tz().name().to_string(),
            session,
            export_dir,
            models: ModelSelector::default(),
            picker: None,
            status: None,
            should_quit: false,
        };
        app.sync_models();
        app
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.models.selected()
    }

    pub fn picker(&self) -> Option<PickerField> {
        self.picker
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout and yields to the
    /// runtime between polls so an outer `tokio::select!` can still observe
    /// OS signals.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        let now = self.timezone.now();
                        self.handle_key(key, now);
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }

            tokio::task::yield_now().await;
        };

        // Restore terminal state unconditionally.
        restore_terminal()?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press at local time `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: NaiveDateTime) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.picker {
            Some(focus) => self.handle_picker_key(key, focus, now),
            None => self.handle_dashboard_key(key, now),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, now: NaiveDateTime) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.apply(PeriodAction::SelectPreset(PeriodPreset::ALL[index]), now);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.picker = Some(PickerField::Start);
            }
            KeyCode::Char('[') | KeyCode::Left => {
                let names = self.session.snapshot().aggregation.model_names();
                self.models.prev(&names);
            }
            KeyCode::Char(']') | KeyCode::Right => {
                let names = self.session.snapshot().aggregation.model_names();
                self.models.next(&names);
            }
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(now),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent, focus: PickerField, now: NaiveDateTime) {
        let by_month = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.picker = Some(focus.toggle()),
            KeyCode::Left => self.nudge(focus, -1, by_month, now),
            KeyCode::Right => self.nudge(focus, 1, by_month, now),
            KeyCode::Enter => {
                self.picker = None;
                self.apply(PeriodAction::ApplyCustom, now);
            }
            KeyCode::Esc => {
                self.picker = None;
                self.apply(PeriodAction::CancelCustom, now);
            }
            _ => {}
        }
    }

    /// Move the focused bound by one day, or one month with Shift.
    fn nudge(&mut self, focus: PickerField, step: i32, by_month: bool, now: NaiveDateTime) {
        let bounds = self.session.period().staged_bounds();
        let shift = |date| {
            if by_month {
                shift_months(date, step)
            } else {
                shift_days(date, i64::from(step))
            }
        };
        let action = match focus {
            PickerField::Start => PeriodAction::EditCustomStart(shift(bounds.start)),
            PickerField::End => PeriodAction::EditCustomEnd(shift(bounds.end)),
        };
        self.apply(action, now);
    }

    fn apply(&mut self, action: PeriodAction, now: NaiveDateTime) {
        self.session.apply(action, now);
        self.sync_models();
    }

    fn export(&mut self) {
        let count = self.session.snapshot().record_count();
        self.status = Some(match self.session.export(&self.export_dir) {
            Ok(path) => StatusMessage::success(format!(
                "Exported {} records to {}",
                count,
                path.display()
            )),
            Err(DashboardError::NothingToExport) => {
                StatusMessage::info("Nothing to export for the selected period")
            }
            Err(e) => StatusMessage::error(format!("Export failed: {}", e)),
        });
    }

    fn refresh(&mut self, now: NaiveDateTime) {
        self.status = Some(match self.session.refresh(now) {
            Ok(()) => StatusMessage::info("Data refreshed"),
            Err(e) => StatusMessage::error(format!("Refresh failed: {}", e)),
        });
        self.sync_models();
    }

    fn sync_models(&mut self) {
        let names = self.session.snapshot().aggregation.model_names();
        self.models.reconcile(&names);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let view = DashboardView {
            session: &self.session,
            timezone: &self.timezone_name,
            models: &self.models,
            status: self.status.as_ref(),
            picker: self.picker,
        };
        render_dashboard(frame, frame.area(), &view, &self.theme);
    }
}

/// Leave raw mode and the alternate screen. Safe to call when the event loop
/// was interrupted from outside.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
