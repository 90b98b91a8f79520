//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the analysis service
//! - `demo`: offline placeholder analysis
//! - `risk`: seedable intake risk scorer
//! - `redact`: PHI/secret filtering for logs

pub mod demo;
pub mod http;
pub mod redact;
pub mod risk;

pub use demo::DemoGateway;
pub use http::HttpGateway;
pub use risk::{FixedRiskScorer, SeededRiskScorer};
