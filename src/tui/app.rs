//! Main TUI application loop.
//!
//! Handles:
//! - Key routing (global navigation, then the active view)
//! - Text inputs that capture typing on some views
//! - Report submission via background worker
//! - Timer ticks for the inspect scan and risk radar

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::application::WorkflowController;
use crate::domain::{Mode, Step};
use crate::ports::{AnalysisGateway, GatewayError, ReportUpload};

use super::input::{PatientForm, TextField};
use super::ui::{self, ViewState};
use super::worker::{SubmissionHandle, SubmissionProgress, SubmissionWorker};

/// Items skipped by PgUp/PgDn on the report views.
const SCROLL_PAGE: usize = 5;

/// Which input, if any, receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    UploadPath,
    Symptoms,
    Search,
    PatientForm,
    HistoryPath,
}

/// Main application state
pub struct App {
    workflow: WorkflowController,
    gateway: Arc<dyn AnalysisGateway>,

    /// Whether the app should quit
    should_quit: bool,

    /// Pending submission worker (if running)
    pending: Option<SubmissionHandle>,

    upload_path: TextField,
    history_path: Option<TextField>,
    search_active: bool,
    patient_form: Option<PatientForm>,
    queue_cursor: usize,
    scroll: usize,

    /// One-line feedback for actions that did nothing
    notice: Option<String>,
}

impl App {
    /// Create the application around an already-built workflow and gateway.
    #[must_use]
    pub fn new(workflow: WorkflowController, gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self {
            workflow,
            gateway,
            should_quit: false,
            pending: None,
            upload_path: TextField::with_limit(4096),
            history_path: None,
            search_active: false,
            patient_form: None,
            queue_cursor: 0,
            scroll: 0,
            notice: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let gateway_label = self.gateway.describe();
        loop {
            self.poll_worker();
            self.workflow.tick(Instant::now());

            terminal.draw(|f| {
                let view = ViewState {
                    workflow: &self.workflow,
                    gateway: &gateway_label,
                    upload_path: self.upload_path.value(),
                    history_path: self.history_path.as_ref().map(TextField::value),
                    search_active: self.search_active,
                    patient_form: self.patient_form.as_ref(),
                    queue_cursor: self.queue_cursor,
                    scroll: self.scroll,
                    notice: self.notice.as_deref(),
                    now: Utc::now(),
                };
                ui::render(f, &view);
            })?;

            // Short poll keeps timers and the worker responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain submission progress.
    fn poll_worker(&mut self) {
        loop {
            let progress = match self.pending.as_ref().and_then(SubmissionHandle::try_recv) {
                Some(p) => p,
                None => break,
            };

            match progress {
                SubmissionProgress::Sending => {
                    tracing::debug!("Submission sent via {}", self.gateway.describe());
                }
                SubmissionProgress::Complete(report) => {
                    self.pending = None;
                    if self.workflow.finish_submission(Ok(report)).is_ok() {
                        self.upload_path.clear();
                    }
                    return;
                }
                SubmissionProgress::Failed(e) => {
                    self.pending = None;
                    // The message is kept on the workflow for the upload view.
                    let _ = self.workflow.finish_submission(Err(e));
                    return;
                }
            }
        }

        // A worker that stopped without answering (panic) must not leave the
        // upload stuck.
        if self.pending.as_ref().is_some_and(SubmissionHandle::is_finished) {
            let last = self.pending.as_ref().and_then(SubmissionHandle::try_recv);
            self.pending = None;
            let outcome = match last {
                Some(SubmissionProgress::Complete(report)) => Ok(report),
                Some(SubmissionProgress::Failed(e)) => Err(e),
                _ => Err(GatewayError::Transport("submission worker stopped".to_string())),
            };
            let _ = self.workflow.finish_submission(outcome);
        }
    }

    fn text_target(&self) -> Option<TextTarget> {
        match self.workflow.step() {
            Step::Upload => Some(TextTarget::UploadPath),
            Step::RiskRadar => Some(TextTarget::Symptoms),
            Step::ClinicalQueue if self.patient_form.is_some() => Some(TextTarget::PatientForm),
            Step::ClinicalQueue if self.search_active => Some(TextTarget::Search),
            Step::History if self.history_path.is_some() => Some(TextTarget::HistoryPath),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.notice = None;

        // Keys that work everywhere, even while typing.
        match key {
            KeyCode::Tab if self.text_target() != Some(TextTarget::PatientForm) => {
                self.go(|wf| wf.advance());
                return;
            }
            KeyCode::BackTab => {
                self.go(|wf| wf.retreat());
                return;
            }
            KeyCode::F(n) => {
                if let Some(step) = Step::from_index(usize::from(n).saturating_sub(1)) {
                    self.go(|wf| wf.go_to(step));
                }
                return;
            }
            _ => {}
        }

        if let Some(target) = self.text_target() {
            self.handle_text_key(target, key);
            return;
        }

        match key {
            KeyCode::Right => self.go(|wf| wf.advance()),
            KeyCode::Left => self.go(|wf| wf.retreat()),
            KeyCode::Char('m') | KeyCode::Char('M') => self.workflow.toggle_mode(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('o') | KeyCode::Char('O') => self.go(|wf| wf.go_to(Step::Overview)),
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.go(|wf| wf.go_to(Step::VisualInsights));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.go(|wf| wf.go_to(Step::RiskRadar)),
            KeyCode::Char('h') | KeyCode::Char('H') => self.go(|wf| wf.go_to(Step::History)),
            _ => self.handle_view_key(key),
        }
    }

    /// Navigation wrapper that also drops TUI-side view state.
    fn go(&mut self, nav: impl FnOnce(&mut WorkflowController)) {
        let before = self.workflow.step();
        nav(&mut self.workflow);
        if self.workflow.step() != before {
            self.search_active = false;
            self.queue_cursor = 0;
            self.scroll = 0;
            if let Some(mut form) = self.patient_form.take() {
                form.clear_sensitive();
            }
            if let Some(mut path) = self.history_path.take() {
                path.clear();
            }
        }
    }

    fn handle_view_key(&mut self, key: KeyCode) {
        match self.workflow.step() {
            Step::Welcome => match key {
                KeyCode::Char('1') => self.go(|wf| wf.choose_mode(Mode::Patient)),
                KeyCode::Char('2') => self.go(|wf| wf.choose_mode(Mode::Clinical)),
                KeyCode::Enter => self.go(|wf| wf.advance()),
                _ => {}
            },
            Step::Overview => {
                if matches!(key, KeyCode::Char('e') | KeyCode::Char('E')) {
                    let mut outcome = Ok(());
                    self.go(|wf| outcome = wf.escalate());
                    if let Err(e) = outcome {
                        self.notice = Some(e.to_string());
                    }
                }
            }
            Step::VisualInsights => {
                if matches!(key, KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Enter) {
                    self.workflow.toggle_inspect(Instant::now());
                }
            }
            Step::ClinicalQueue => self.handle_queue_key(key),
            Step::History => {
                if matches!(key, KeyCode::Char('u') | KeyCode::Char('U')) {
                    self.history_path = Some(TextField::with_limit(4096));
                }
            }
            Step::Disclaimer => {
                if key == KeyCode::Enter {
                    self.go(|wf| wf.reset());
                }
            }
            Step::Explanation | Step::ClinicalView | Step::ActionPlan | Step::Emergency => {
                self.handle_scroll_key(key);
            }
            Step::Upload | Step::RiskRadar => {}
        }
    }

    fn handle_scroll_key(&mut self, key: KeyCode) {
        let limit = ui::scroll_limit(self.workflow.step(), self.workflow.report());
        self.scroll = match key {
            KeyCode::Up => self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll + 1,
            KeyCode::PageUp => self.scroll.saturating_sub(SCROLL_PAGE),
            KeyCode::PageDown => self.scroll + SCROLL_PAGE,
            KeyCode::Home => 0,
            KeyCode::End => limit,
            _ => self.scroll,
        }
        .min(limit);
    }

    fn handle_queue_key(&mut self, key: KeyCode) {
        let visible = self.workflow.visible_patients().len();
        match key {
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('f') | KeyCode::Char('F') => {
                let filter = self.workflow.queue_filter_mut();
                filter.status = filter.status.cycled();
                self.queue_cursor = 0;
            }
            KeyCode::Char('x') | KeyCode::Char('X') => {
                self.workflow.clear_filters();
                self.queue_cursor = 0;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.patient_form = Some(PatientForm::new());
            }
            KeyCode::Up => self.queue_cursor = self.queue_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.queue_cursor + 1 < visible {
                    self.queue_cursor += 1;
                }
            }
            KeyCode::Enter => {
                let id = self
                    .workflow
                    .visible_patients()
                    .get(self.queue_cursor)
                    .map(|p| p.id);
                if let Some(id) = id {
                    if let Err(e) = self.workflow.select_patient(id) {
                        self.notice = Some(e.to_string());
                    }
                }
            }
            KeyCode::Esc => self.workflow.deselect_patient(),
            _ => {}
        }
    }

    fn handle_text_key(&mut self, target: TextTarget, key: KeyCode) {
        match target {
            TextTarget::UploadPath => match key {
                KeyCode::Enter => self.submit_upload(),
                KeyCode::Esc => {
                    self.workflow.dismiss_error();
                    self.upload_path.clear();
                }
                KeyCode::Backspace => self.upload_path.pop(),
                KeyCode::Char(c) => self.upload_path.push(c),
                _ => {}
            },
            TextTarget::Symptoms => {
                let now = Instant::now();
                match key {
                    KeyCode::Backspace => self.workflow.radar_mut().pop_char(now),
                    KeyCode::Esc => self.workflow.radar_mut().reset(),
                    KeyCode::Char(c) => self.workflow.radar_mut().push_char(c, now),
                    _ => {}
                }
            }
            TextTarget::Search => {
                match key {
                    KeyCode::Enter | KeyCode::Esc => self.search_active = false,
                    KeyCode::Backspace => {
                        self.workflow.queue_filter_mut().query.pop();
                    }
                    KeyCode::Char(c) => self.workflow.queue_filter_mut().query.push(c),
                    _ => {}
                }
                self.queue_cursor = 0;
            }
            TextTarget::PatientForm => self.handle_form_key(key),
            TextTarget::HistoryPath => match key {
                KeyCode::Enter => self.record_history(),
                KeyCode::Esc => {
                    if let Some(mut path) = self.history_path.take() {
                        path.clear();
                    }
                }
                KeyCode::Backspace => {
                    if let Some(path) = self.history_path.as_mut() {
                        path.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(path) = self.history_path.as_mut() {
                        path.push(c);
                    }
                }
                _ => {}
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let Some(form) = self.patient_form.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                form.clear_sensitive();
                self.patient_form = None;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => form.switch_focus(),
            KeyCode::Backspace => form.focused_mut().pop(),
            KeyCode::Char(c) => {
                form.focused_mut().push(c);
                form.error = None;
            }
            KeyCode::Enter => self.submit_patient_form(),
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let Some(form) = self.patient_form.as_mut() else {
            return;
        };
        match self
            .workflow
            .add_patient(form.name.value(), form.age.value(), Utc::now())
        {
            Ok(_) => {
                form.clear_sensitive();
                self.patient_form = None;
                self.queue_cursor = 0;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    fn submit_upload(&mut self) {
        if self.pending.is_some() {
            self.notice = Some("A report is already being analyzed".to_string());
            return;
        }
        let raw = self.upload_path.value().trim().trim_matches(['\'', '"']);
        if raw.is_empty() {
            self.notice = Some("Type the path of an image or PDF report".to_string());
            return;
        }

        let upload = match ReportUpload::from_path(raw) {
            Ok(upload) => upload,
            Err(e) => {
                self.workflow.reject_upload(&e);
                return;
            }
        };

        match self.workflow.begin_submission(&upload) {
            Ok(()) => {
                self.pending = Some(SubmissionWorker::spawn(self.gateway.clone(), upload));
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn record_history(&mut self) {
        let Some(mut field) = self.history_path.take() else {
            return;
        };
        let raw = field.take();
        let raw = raw.trim().trim_matches(['\'', '"']);
        let path = Path::new(raw);
        if raw.is_empty() || !path.is_file() {
            self.notice = Some("No such file".to_string());
            return;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.workflow
            .record_history_upload(&file_name, Local::now().date_naive());
    }
}
