//! Review workflow controller.
//!
//! Owns the current step, display mode, the single current report and the
//! per-view ephemeral state. Views read from it; only the event loop mutates
//! it. Nothing here blocks: the gateway call itself runs on a worker and the
//! result is handed back through `finish_submission`.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{HistoryItem, Mode, PatientId, PatientRecord, ReportResult, Step};
use crate::ports::{AnalysisGateway, GatewayError, PreviewKind, ReportUpload};

use super::history::HistoryLog;
use super::projections::{headline_score, ScoreBand};
use super::queue::{PatientQueue, QueueError, QueueFilter};
use super::radar::RiskRadar;
use super::timer::{DelayedTransition, SCAN_DURATION};

/// Error type for workflow actions.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{} needs an analyzed report", .step.title())]
    MissingReport { step: Step },

    #[error("A report is already being analyzed")]
    SubmissionInProgress,

    #[error("{0}")]
    SubmissionFailed(String),

    #[error("Score {score} is below the critical threshold")]
    EscalationNotWarranted { score: u8 },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Local reference to the last uploaded file, kept for the insights view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPreview {
    pub file_name: String,
    pub kind: PreviewKind,
    pub size: usize,
}

pub struct WorkflowController {
    step: Step,
    mode: Mode,
    report: Option<ReportResult>,
    uploading: bool,
    error: Option<String>,
    preview: Option<UploadPreview>,
    inspect: bool,
    scan: DelayedTransition,
    radar: RiskRadar,
    queue: PatientQueue,
    queue_filter: QueueFilter,
    history: HistoryLog,
}

impl WorkflowController {
    #[must_use]
    pub fn new(queue: PatientQueue, history: HistoryLog) -> Self {
        Self {
            step: Step::FIRST,
            mode: Mode::default(),
            report: None,
            uploading: false,
            error: None,
            preview: None,
            inspect: false,
            scan: DelayedTransition::new(SCAN_DURATION),
            radar: RiskRadar::default(),
            queue,
            queue_filter: QueueFilter::default(),
            history,
        }
    }

    // ---- step and mode ----

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Move forward one view; a no-op on the last one.
    pub fn advance(&mut self) {
        self.set_step(self.step.next());
    }

    /// Move back one view; a no-op on the first one.
    pub fn retreat(&mut self) {
        self.set_step(self.step.prev());
    }

    pub fn go_to(&mut self, step: Step) {
        self.set_step(step);
    }

    /// Back to the welcome screen. The current report is kept.
    pub fn reset(&mut self) {
        self.set_step(Step::Welcome);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::info!("Display mode set to {}", mode);
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// Welcome-screen choice: pick the audience and continue to upload.
    pub fn choose_mode(&mut self, mode: Mode) {
        self.set_mode(mode);
        self.set_step(Step::Upload);
    }

    fn set_step(&mut self, step: Step) {
        if step == self.step {
            return;
        }
        tracing::info!("Workflow moved from {:?} to {:?}", self.step, step);
        self.step = step;

        // View-local state does not survive a change of view.
        self.inspect = false;
        self.scan.cancel();
        self.radar.reset();
        self.queue.deselect();
    }

    // ---- report ----

    #[must_use]
    pub fn report(&self) -> Option<&ReportResult> {
        self.report.as_ref()
    }

    /// The current report, or `MissingReport` naming the current view.
    ///
    /// # Errors
    /// Returns `WorkflowError::MissingReport` before the first successful analysis.
    pub fn require_report(&self) -> Result<&ReportResult, WorkflowError> {
        self.report
            .as_ref()
            .ok_or(WorkflowError::MissingReport { step: self.step })
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn preview(&self) -> Option<&UploadPreview> {
        self.preview.as_ref()
    }

    /// Start a submission. The preview is taken from the raw upload right
    /// away, before the service answers.
    ///
    /// # Errors
    /// Returns `WorkflowError::SubmissionInProgress` while another upload is pending.
    pub fn begin_submission(&mut self, upload: &ReportUpload) -> Result<(), WorkflowError> {
        if self.uploading {
            return Err(WorkflowError::SubmissionInProgress);
        }
        self.uploading = true;
        self.error = None;
        self.preview = upload.preview_kind().map(|kind| UploadPreview {
            file_name: upload.file_name.clone(),
            kind,
            size: upload.bytes.len(),
        });
        tracing::info!(
            "Submitting {} ({}, {} bytes) for analysis",
            upload.file_name,
            upload.content_type,
            upload.bytes.len()
        );
        Ok(())
    }

    /// Complete the pending submission with the gateway's outcome.
    ///
    /// On success the report replaces any previous one and the workflow moves
    /// to the overview. On failure the step is unchanged and the user-facing
    /// message is kept for display.
    ///
    /// # Errors
    /// Returns `WorkflowError::SubmissionFailed` carrying that message.
    pub fn finish_submission(
        &mut self,
        outcome: Result<ReportResult, GatewayError>,
    ) -> Result<(), WorkflowError> {
        if !self.uploading {
            tracing::warn!("Dropping analysis outcome with no submission pending");
            return Ok(());
        }
        self.uploading = false;

        match outcome {
            Ok(report) => {
                tracing::info!(
                    "Analysis complete: {} results, score {}{}",
                    report.results.len(),
                    headline_score(&report.explanation),
                    if report.is_mock { " (placeholder data)" } else { "" }
                );
                self.report = Some(report);
                self.set_step(Step::Overview);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(WorkflowError::SubmissionFailed(message))
            }
        }
    }

    /// Submit and wait for the answer on the calling thread.
    ///
    /// # Errors
    /// See `begin_submission` and `finish_submission`.
    pub fn submit_report(
        &mut self,
        gateway: &dyn AnalysisGateway,
        upload: &ReportUpload,
    ) -> Result<(), WorkflowError> {
        self.begin_submission(upload)?;
        let outcome = gateway.analyze(upload);
        self.finish_submission(outcome)
    }

    /// Record a file that could not even be read.
    pub fn reject_upload(&mut self, err: &GatewayError) {
        tracing::warn!("Upload rejected: {}", err);
        self.error = Some(err.user_message());
    }

    /// Overview → Emergency, offered only for a critical headline score.
    ///
    /// # Errors
    /// `MissingReport` without a report, `EscalationNotWarranted` below the
    /// critical band.
    pub fn escalate(&mut self) -> Result<(), WorkflowError> {
        let score = headline_score(&self.require_report()?.explanation);
        if ScoreBand::from_score(score) != ScoreBand::Critical {
            return Err(WorkflowError::EscalationNotWarranted { score });
        }
        tracing::warn!("Escalating to emergency guidance (score {})", score);
        self.set_step(Step::Emergency);
        Ok(())
    }

    // ---- visual insights ----

    /// Toggle inspect mode. Turning it on starts the scan; turning it off
    /// cancels a scan still in flight.
    pub fn toggle_inspect(&mut self, now: Instant) {
        self.inspect = !self.inspect;
        if self.inspect {
            self.scan.arm(now);
        } else {
            self.scan.cancel();
        }
    }

    #[must_use]
    pub fn is_inspecting(&self) -> bool {
        self.inspect
    }

    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.scan.is_pending()
    }

    /// Advance timers to `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.scan.poll(now) {
            tracing::debug!("Inspect scan finished");
        }
        self.radar.tick(now);
    }

    // ---- risk radar ----

    #[must_use]
    pub fn radar(&self) -> &RiskRadar {
        &self.radar
    }

    pub fn radar_mut(&mut self) -> &mut RiskRadar {
        &mut self.radar
    }

    // ---- clinical queue ----

    #[must_use]
    pub fn queue(&self) -> &PatientQueue {
        &self.queue
    }

    #[must_use]
    pub fn queue_filter(&self) -> &QueueFilter {
        &self.queue_filter
    }

    pub fn queue_filter_mut(&mut self) -> &mut QueueFilter {
        &mut self.queue_filter
    }

    pub fn clear_filters(&mut self) {
        self.queue_filter.clear();
    }

    /// Queue rows passing the current search and filter.
    #[must_use]
    pub fn visible_patients(&self) -> Vec<&PatientRecord> {
        self.queue.search(&self.queue_filter)
    }

    /// # Errors
    /// Returns `WorkflowError::Queue` if the name is blank.
    pub fn add_patient(
        &mut self,
        name: &str,
        age: &str,
        now: DateTime<Utc>,
    ) -> Result<PatientId, WorkflowError> {
        Ok(self.queue.add_patient(name, age, now)?)
    }

    /// # Errors
    /// Returns `WorkflowError::Queue` for an unknown id.
    pub fn select_patient(&mut self, id: PatientId) -> Result<(), WorkflowError> {
        Ok(self.queue.select(id)?)
    }

    pub fn deselect_patient(&mut self) {
        self.queue.deselect();
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&PatientRecord> {
        self.queue.selected()
    }

    // ---- history ----

    #[must_use]
    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    pub fn record_history_upload(&mut self, file_name: &str, date: NaiveDate) -> &HistoryItem {
        self.history.record_upload(file_name, date)
    }
}
