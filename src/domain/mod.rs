//! Domain layer: Core types of a report review session.
//!
//! Pure data with validation and classification helpers. Nothing here talks
//! to the network or the terminal.

mod history;
mod patient;
mod report;
mod step;

pub use history::{HistoryItem, Urgency};
pub use patient::{
    relative_time, PatientId, PatientRecord, PatientStatus, CRITICAL_RISK, MODERATE_RISK,
    STABLE_RISK,
};
pub use report::{Explanation, Flag, ReportResult, TestResult, DEFAULT_DISCLAIMER};
pub use step::{Mode, Step};
