//! Lab report analysis types.
//!
//! These mirror the analysis service's response body. A `ReportResult` is
//! produced once per successful analysis and is never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};

/// Disclaimer used when the service omits one.
pub const DEFAULT_DISCLAIMER: &str =
    "This is an AI-generated explanation, not a medical diagnosis.";

/// Clinical severity of a single test result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// Within reference range
    Green,
    /// Borderline
    Yellow,
    /// Needs medical attention
    Red,
}

impl Flag {
    /// Whether this result should be called out in focus views.
    #[must_use]
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Self::Green)
    }
}

const FLAG_NAMES: &[&str] = &["green", "yellow", "red"];

// Model output is not reliable about case ("Red", "RED"); anything that is
// not one of the three names is still rejected.
impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            _ => Err(serde::de::Error::unknown_variant(&raw, FLAG_NAMES)),
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// One row of a lab report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_name: String,

    /// Value as printed on the report (not necessarily numeric)
    pub value: String,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub reference_range: Option<String>,

    /// Human label such as "Normal" or "Needs Medical Attention"
    pub status: String,

    pub flag: Flag,

    /// Position on a 0-100 bar, independent of the test's natural units
    #[serde(deserialize_with = "deserialize_percent")]
    pub visual_value: u8,

    /// Plain-language explanation of this single result
    pub interpretation: String,
}

impl TestResult {
    /// Value with its unit, e.g. `2.1 mg/dL`.
    #[must_use]
    pub fn value_with_unit(&self) -> String {
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{} {}", self.value, unit),
            _ => self.value.clone(),
        }
    }
}

/// Narrative part of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub patient_summary: String,
    pub doctor_summary: String,

    /// Ordered by presentation priority; index 0 is the most urgent
    #[serde(default)]
    pub recommendations_patient: Vec<String>,

    #[serde(default)]
    pub correlations_doctor: Vec<String>,

    /// Overall health score, 0-100 (shown as the headline score)
    #[serde(default)]
    pub confidence_score: f64,
}

/// Complete outcome of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    /// Results in report order
    pub results: Vec<TestResult>,

    pub explanation: Explanation,

    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,

    /// Set when the service answered with placeholder data
    #[serde(default)]
    pub is_mock: bool,
}

impl ReportResult {
    /// Iterate over results with the given flag, preserving report order.
    pub fn results_flagged(&self, flag: Flag) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(move |r| r.flag == flag)
    }
}

fn default_disclaimer() -> String {
    DEFAULT_DISCLAIMER.to_string()
}

/// Accept any JSON number and clamp it into `0..=100`.
///
/// The service is asked for an integer percentage but model output is not
/// always well-behaved (fractions, negatives, values above 100).
fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATININE_REPORT: &str = r#"{
        "results": [
            {
                "test_name": "Creatinine",
                "value": "2.1",
                "unit": "mg/dL",
                "reference_range": "0.6 - 1.2",
                "status": "High",
                "flag": "red",
                "visual_value": 90,
                "interpretation": "Elevated"
            }
        ],
        "explanation": {
            "patient_summary": "Your kidney marker is high.",
            "doctor_summary": "Elevated creatinine, consider AKI workup.",
            "recommendations_patient": ["See a nephrologist"],
            "correlations_doctor": ["Raised creatinine"],
            "confidence_score": 85
        },
        "disclaimer": "Not a diagnosis.",
        "is_mock": false
    }"#;

    #[test]
    fn test_decode_full_report() {
        let report: ReportResult = serde_json::from_str(CREATININE_REPORT).expect("Should decode");

        assert_eq!(report.results.len(), 1);
        let creatinine = &report.results[0];
        assert_eq!(creatinine.flag, Flag::Red);
        assert_eq!(creatinine.visual_value, 90);
        assert_eq!(creatinine.value_with_unit(), "2.1 mg/dL");
        assert!((report.explanation.confidence_score - 85.0).abs() < f64::EPSILON);
        assert!(!report.is_mock);
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let json = r#"{
            "results": [{
                "test_name": "WBC Count",
                "value": "7.8",
                "status": "Normal",
                "flag": "green",
                "visual_value": 50,
                "interpretation": "Fine"
            }],
            "explanation": {
                "patient_summary": "ok",
                "doctor_summary": "ok",
                "recommendations_patient": [],
                "correlations_doctor": [],
                "confidence_score": 90
            }
        }"#;
        let report: ReportResult = serde_json::from_str(json).expect("Should decode");

        assert_eq!(report.disclaimer, DEFAULT_DISCLAIMER);
        assert!(!report.is_mock);
        assert!(report.results[0].unit.is_none());
        assert_eq!(report.results[0].value_with_unit(), "7.8");
    }

    #[test]
    fn test_visual_value_is_clamped() {
        let json = |v: &str| {
            format!(
                r#"{{"test_name":"X","value":"1","status":"s","flag":"yellow","visual_value":{v},"interpretation":"i"}}"#
            )
        };

        let high: TestResult = serde_json::from_str(&json("250")).expect("Should decode");
        let low: TestResult = serde_json::from_str(&json("-3")).expect("Should decode");
        let frac: TestResult = serde_json::from_str(&json("42.6")).expect("Should decode");

        assert_eq!(high.visual_value, 100);
        assert_eq!(low.visual_value, 0);
        assert_eq!(frac.visual_value, 43);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let json = r#"{"test_name":"X","value":"1","status":"s","flag":"purple","visual_value":1,"interpretation":"i"}"#;
        assert!(serde_json::from_str::<TestResult>(json).is_err());
    }

    #[test]
    fn test_flag_case_is_ignored() {
        let cases = [
            ("Red", Flag::Red),
            ("RED", Flag::Red),
            ("Yellow", Flag::Yellow),
            (" green ", Flag::Green),
        ];
        for (raw, flag) in cases {
            let decoded: Flag =
                serde_json::from_str(&format!("\"{raw}\"")).expect("Should decode");
            assert_eq!(decoded, flag);
        }
        assert!(serde_json::from_str::<Flag>("\"Crimson\"").is_err());
        assert_eq!(serde_json::to_string(&Flag::Red).expect("encode"), "\"red\"");
    }

    #[test]
    fn test_results_flagged_preserves_order() {
        let mut report: ReportResult =
            serde_json::from_str(CREATININE_REPORT).expect("Should decode");
        let mut urea = report.results[0].clone();
        urea.test_name = "Urea".to_string();
        let mut sodium = report.results[0].clone();
        sodium.test_name = "Sodium".to_string();
        sodium.flag = Flag::Green;
        report.results.push(sodium);
        report.results.push(urea);

        let names: Vec<&str> = report
            .results_flagged(Flag::Red)
            .map(|r| r.test_name.as_str())
            .collect();
        assert_eq!(names, vec!["Creatinine", "Urea"]);
    }
}
