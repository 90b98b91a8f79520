//! # Medilens
//!
//! Terminal client for AI-assisted lab report review.
//!
//! This crate provides:
//! - A twelve-view review workflow over one analyzed lab report
//! - Patient and clinical perspectives on the same result
//! - A clinician priority queue, risk radar and report history
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (ReportResult, PatientRecord, Step, Mode)
//! - `ports`: Trait definitions for the analysis service and risk scoring
//! - `adapters`: Concrete implementations (HTTP, demo data, seeded RNG, log redaction)
//! - `application`: Workflow controller, queue, history and view projections
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::WorkflowController;
pub use config::Config;
pub use domain::{Flag, Mode, ReportResult, Step};
