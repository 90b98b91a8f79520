//! Application layer: the review workflow and its stores.
//!
//! `WorkflowController` owns all session state. The queue, history log,
//! radar and timers are its parts; `projections` derives what each view shows.

pub mod history;
pub mod projections;
pub mod queue;
pub mod radar;
pub mod timer;
mod workflow;

pub use history::HistoryLog;
pub use queue::{PatientQueue, QueueError, QueueFilter, StatusFilter};
pub use radar::{RadarBand, RiskRadar};
pub use timer::{DelayedTransition, SCAN_DURATION};
pub use workflow::{UploadPreview, WorkflowController, WorkflowError};
