//! Demo adapter: offline AnalysisGateway.
//!
//! Answers every upload with the analysis service's built-in placeholder
//! report and marks it `is_mock`, so the UI shows the placeholder banner.

use crate::domain::{Explanation, Flag, ReportResult, TestResult, DEFAULT_DISCLAIMER};
use crate::ports::{AnalysisGateway, GatewayError, ReportUpload};

/// Gateway that never leaves the machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoGateway;

impl DemoGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The placeholder report.
    #[must_use]
    pub fn placeholder_report() -> ReportResult {
        ReportResult {
            results: vec![
                TestResult {
                    test_name: "Hemoglobin".to_string(),
                    value: "11.5".to_string(),
                    unit: Some("g/dL".to_string()),
                    reference_range: Some("13.5 - 17.5".to_string()),
                    status: "Needs Medical Attention".to_string(),
                    flag: Flag::Red,
                    visual_value: 30,
                    interpretation: "Low hemoglobin indicates potential anemia.".to_string(),
                },
                TestResult {
                    test_name: "WBC Count".to_string(),
                    value: "7.8".to_string(),
                    unit: Some("x10^9/L".to_string()),
                    reference_range: Some("4.5 - 11.0".to_string()),
                    status: "Normal".to_string(),
                    flag: Flag::Green,
                    visual_value: 50,
                    interpretation: "White blood cell count is within healthy range.".to_string(),
                },
            ],
            explanation: Explanation {
                patient_summary: "Your hemoglobin levels are lower than normal, which suggests you might have anemia. This can cause fatigue and weakness. Your white blood cells are normal, meaning no immediate sign of infection.".to_string(),
                doctor_summary: "Patient presents with mild anemia (Hb 11.5 g/dL). WBC count is normal. Suggest evaluating Iron studies and Ferritin to rule out Iron Deficiency Anemia.".to_string(),
                recommendations_patient: vec![
                    "Eating iron-rich foods like spinach and red meat".to_string(),
                    "Consulting a doctor about iron supplements".to_string(),
                    "Resting if feeling fatigued".to_string(),
                ],
                correlations_doctor: vec![
                    "Low Hb isolated, consistent with IDA".to_string(),
                    "No leukocytosis".to_string(),
                ],
                confidence_score: 85.0,
            },
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            is_mock: true,
        }
    }
}

impl AnalysisGateway for DemoGateway {
    fn analyze(&self, upload: &ReportUpload) -> Result<ReportResult, GatewayError> {
        tracing::info!(
            "Demo gateway answering {} with placeholder analysis",
            upload.file_name
        );
        Ok(Self::placeholder_report())
    }

    fn describe(&self) -> String {
        "built-in demo analysis (placeholder data)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_marked_mock() {
        let report = DemoGateway::new()
            .analyze(&ReportUpload::new("x.png", vec![1, 2, 3]))
            .expect("Demo never fails");

        assert!(report.is_mock);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results_flagged(Flag::Red).count(), 1);
        assert!(report.results.iter().all(|r| r.visual_value <= 100));
    }
}
