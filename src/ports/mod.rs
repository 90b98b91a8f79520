//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the review workflow and the
//! outside world (the analysis service, intake risk scoring).

mod gateway;
mod risk;

pub use gateway::{
    AnalysisGateway, GatewayError, PreviewKind, ReportUpload, SUGGESTED_MAX_UPLOAD_BYTES,
};
pub use risk::RiskScorer;
