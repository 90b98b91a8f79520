//! Background submission worker.
//!
//! The gateway call blocks for as long as the service takes to read the
//! report, so it runs on its own thread and reports back over a channel the
//! main loop polls between frames.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::ReportResult;
use crate::ports::{AnalysisGateway, GatewayError, ReportUpload};

/// Progress updates from the submission worker.
#[derive(Debug)]
pub enum SubmissionProgress {
    /// Request is on the wire
    Sending,
    /// Service answered with a report
    Complete(ReportResult),
    /// Request failed; no partial result
    Failed(GatewayError),
}

/// Handle to a running submission.
pub struct SubmissionHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<SubmissionProgress>,
    handle: JoinHandle<()>,
}

impl SubmissionHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmissionProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Whether the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

pub struct SubmissionWorker;

impl SubmissionWorker {
    /// Spawn a background analysis of `upload`.
    pub fn spawn(gateway: Arc<dyn AnalysisGateway>, upload: ReportUpload) -> SubmissionHandle {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(gateway.as_ref(), &upload, &tx);
        });

        SubmissionHandle {
            progress_rx: rx,
            handle,
        }
    }

    fn run(gateway: &dyn AnalysisGateway, upload: &ReportUpload, tx: &Sender<SubmissionProgress>) {
        let _ = tx.send(SubmissionProgress::Sending);

        let outcome = match gateway.analyze(upload) {
            Ok(report) => SubmissionProgress::Complete(report),
            Err(e) => SubmissionProgress::Failed(e),
        };
        // The receiver is gone only if the app already quit.
        let _ = tx.send(outcome);
    }
}
