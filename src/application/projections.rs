//! View projections over the current report.
//!
//! Everything here is a pure function of a `ReportResult` (and sometimes the
//! display mode). Views call these on every frame; nothing is cached.

use crate::domain::{Explanation, Flag, Mode, ReportResult, TestResult};

/// Headline score shown when the service did not send one.
pub const HEADLINE_FALLBACK: u8 = 85;

/// Score above which the overview offers the emergency jump.
pub const CRITICAL_SCORE: u8 = 70;
/// Score above which the overview asks for attention.
pub const ATTENTION_SCORE: u8 = 40;

/// Headline health score, `0..=100`.
#[must_use]
pub fn headline_score(explanation: &Explanation) -> u8 {
    let raw = explanation.confidence_score;
    if !raw.is_finite() || raw <= 0.0 {
        return HEADLINE_FALLBACK;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Overview band for a headline score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    NearBaseline,
    AttentionRequired,
    Critical,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score > CRITICAL_SCORE {
            Self::Critical
        } else if score > ATTENTION_SCORE {
            Self::AttentionRequired
        } else {
            Self::NearBaseline
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NearBaseline => "Near Baseline",
            Self::AttentionRequired => "Attention Required",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub fn flag(&self) -> Flag {
        match self {
            Self::NearBaseline => Flag::Green,
            Self::AttentionRequired => Flag::Yellow,
            Self::Critical => Flag::Red,
        }
    }
}

/// Narrative summary for the audience.
#[must_use]
pub fn summary_text(explanation: &Explanation, mode: Mode) -> &str {
    match mode {
        Mode::Patient => &explanation.patient_summary,
        Mode::Clinical => &explanation.doctor_summary,
    }
}

/// Recommendation list for the audience: advice for patients,
/// correlations for clinicians.
#[must_use]
pub fn key_findings(explanation: &Explanation, mode: Mode) -> &[String] {
    match mode {
        Mode::Patient => &explanation.recommendations_patient,
        Mode::Clinical => &explanation.correlations_doctor,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Asap,
    Routine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem<'a> {
    pub text: &'a str,
    pub priority: Priority,
}

/// Action plan; the first recommendation is the ASAP one.
#[must_use]
pub fn action_plan(explanation: &Explanation) -> Vec<ActionItem<'_>> {
    explanation
        .recommendations_patient
        .iter()
        .enumerate()
        .map(|(i, text)| ActionItem {
            text,
            priority: if i == 0 { Priority::Asap } else { Priority::Routine },
        })
        .collect()
}

/// Value used when the first result is not numeric.
pub const TREND_FALLBACK: f64 = 100.0;

/// Month offsets applied around the current value.
const TREND_OFFSETS: [f64; 5] = [-10.0, 5.0, -5.0, 15.0, 0.0];

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub test_name: String,
    pub points: Vec<TrendPoint>,
}

/// Illustrative five-month series around the first result's value.
///
/// This is demo data for the chart and is not a real trend: reports carry a
/// single measurement per test. The last point is the current value.
#[must_use]
pub fn trend_series(results: &[TestResult]) -> Option<TrendSeries> {
    let first = results.first()?;
    let base = leading_number(&first.value).unwrap_or(TREND_FALLBACK);
    let points = TREND_OFFSETS
        .iter()
        .enumerate()
        .map(|(i, offset)| TrendPoint {
            label: format!("Month {}", i + 1),
            value: base + offset,
        })
        .collect();
    Some(TrendSeries {
        test_name: first.test_name.clone(),
        points,
    })
}

/// Leading integer of a printed value: `"2.1"` → 2, `"140 mmol"` → 140.
fn leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse::<i64>().ok().map(|n| n as f64)
}

/// Red-flag extraction for the emergency view.
#[derive(Debug, Clone, PartialEq)]
pub enum RedFlags<'a> {
    Present(Vec<&'a TestResult>),
    NoneDetected,
}

impl RedFlags<'_> {
    pub const NONE_DETECTED_MESSAGE: &'static str = "No critical red-flag findings detected.";
}

#[must_use]
pub fn red_flags(report: &ReportResult) -> RedFlags<'_> {
    let found: Vec<&TestResult> = report.results_flagged(Flag::Red).collect();
    if found.is_empty() {
        RedFlags::NoneDetected
    } else {
        RedFlags::Present(found)
    }
}

/// Marker slots as (top %, left %) over the report preview.
pub const MARKER_LAYOUT: [(u8, u8); 5] = [(25, 30), (45, 65), (65, 40), (35, 75), (75, 25)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker<'a> {
    pub test_name: &'a str,
    pub flag: Flag,
    pub top_pct: u8,
    pub left_pct: u8,
}

/// Place a marker for every abnormal result, cycling through the layout.
///
/// Positions are a fixed approximation and do not map to where the value
/// actually sits on the scanned page.
#[must_use]
pub fn highlight_markers(results: &[TestResult]) -> Vec<HighlightMarker<'_>> {
    results
        .iter()
        .filter(|r| r.flag.is_abnormal())
        .enumerate()
        .map(|(i, r)| {
            let (top_pct, left_pct) = MARKER_LAYOUT[i % MARKER_LAYOUT.len()];
            HighlightMarker {
                test_name: &r.test_name,
                flag: r.flag,
                top_pct,
                left_pct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, value: &str, flag: Flag) -> TestResult {
        TestResult {
            test_name: name.to_string(),
            value: value.to_string(),
            unit: None,
            reference_range: None,
            status: "s".to_string(),
            flag,
            visual_value: 50,
            interpretation: "i".to_string(),
        }
    }

    fn explanation(score: f64) -> Explanation {
        Explanation {
            patient_summary: "plain".to_string(),
            doctor_summary: "clinical".to_string(),
            recommendations_patient: vec!["Call your doctor".to_string(), "Hydrate".to_string()],
            correlations_doctor: vec!["eGFR decline".to_string()],
            confidence_score: score,
        }
    }

    #[test]
    fn test_headline_score() {
        assert_eq!(headline_score(&explanation(85.0)), 85);
        assert_eq!(headline_score(&explanation(0.0)), HEADLINE_FALLBACK);
        assert_eq!(headline_score(&explanation(f64::NAN)), HEADLINE_FALLBACK);
        assert_eq!(headline_score(&explanation(140.0)), 100);
        assert_eq!(headline_score(&explanation(32.4)), 32);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(85), ScoreBand::Critical);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::AttentionRequired);
        assert_eq!(ScoreBand::from_score(41), ScoreBand::AttentionRequired);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::NearBaseline);
        assert_eq!(ScoreBand::Critical.flag(), Flag::Red);
    }

    #[test]
    fn test_mode_selects_text() {
        let e = explanation(85.0);
        assert_eq!(summary_text(&e, Mode::Patient), "plain");
        assert_eq!(summary_text(&e, Mode::Clinical), "clinical");
        assert_eq!(key_findings(&e, Mode::Patient).len(), 2);
        assert_eq!(key_findings(&e, Mode::Clinical), ["eGFR decline".to_string()]);
    }

    #[test]
    fn test_action_plan_first_is_asap() {
        let e = explanation(85.0);
        let plan = action_plan(&e);
        assert_eq!(plan[0].priority, Priority::Asap);
        assert_eq!(plan[0].text, "Call your doctor");
        assert_eq!(plan[1].priority, Priority::Routine);
    }

    #[test]
    fn test_trend_series() {
        let series = trend_series(&[result("Glucose", "140 mg/dL", Flag::Yellow)])
            .expect("series for non-empty results");
        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![130.0, 145.0, 135.0, 155.0, 140.0]);
        assert_eq!(series.points[4].label, "Month 5");

        let fallback = trend_series(&[result("Culture", "Positive", Flag::Red)])
            .expect("series for non-empty results");
        assert_eq!(fallback.points[4].value, TREND_FALLBACK);

        let decimal = trend_series(&[result("Creatinine", "2.1", Flag::Red)])
            .expect("series for non-empty results");
        assert_eq!(decimal.points[4].value, 2.0);

        assert!(trend_series(&[]).is_none());
    }

    #[test]
    fn test_red_flags_sentinel() {
        let report = ReportResult {
            results: vec![result("WBC", "7.8", Flag::Green)],
            explanation: explanation(90.0),
            disclaimer: String::new(),
            is_mock: false,
        };
        assert_eq!(red_flags(&report), RedFlags::NoneDetected);
    }

    #[test]
    fn test_highlight_markers_cycle() {
        let results: Vec<TestResult> = (0..7)
            .map(|i| result(&format!("T{i}"), "1", Flag::Yellow))
            .chain(std::iter::once(result("Fine", "1", Flag::Green)))
            .collect();
        let markers = highlight_markers(&results);

        assert_eq!(markers.len(), 7);
        assert_eq!((markers[0].top_pct, markers[0].left_pct), (25, 30));
        assert_eq!((markers[5].top_pct, markers[5].left_pct), (25, 30));
        assert_eq!((markers[6].top_pct, markers[6].left_pct), (45, 65));
        assert!(markers.iter().all(|m| m.test_name != "Fine"));
    }
}
