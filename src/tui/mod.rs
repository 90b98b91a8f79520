//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the review workflow as a sequence of screens:
//! - Welcome, mode choice and report upload
//! - Report views (overview, explanation, insights, clinical, action plan)
//! - Risk radar, clinician queue, emergency guidance and history

mod app;
mod input;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{SubmissionHandle, SubmissionProgress, SubmissionWorker};
