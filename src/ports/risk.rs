//! Risk scoring port for new queue intakes.

/// Supplies a 0-100 risk score for a patient added to the clinician queue.
pub trait RiskScorer: Send {
    /// Score a new intake.
    fn score(&mut self, name: &str, age: u32) -> u8;
}
