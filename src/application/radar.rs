//! Live risk radar.
//!
//! The user describes current symptoms; once the description is longer than
//! a few characters the radar level climbs in fixed steps toward a ceiling.
//! Shortening the description resets it. Every edit restarts the climb
//! interval, so the level only rises while the user pauses typing.

use std::time::{Duration, Instant};

use zeroize::Zeroize;

/// Radar level with no symptoms entered.
pub const RADAR_BASELINE: u8 = 30;
/// Highest level the radar climbs to.
pub const RADAR_CEILING: u8 = 85;
/// Increment per climb interval.
pub const RADAR_STEP: u8 = 2;
/// Time between increments.
pub const RADAR_INTERVAL: Duration = Duration::from_millis(500);
/// Descriptions at or below this many characters do not move the radar.
pub const MIN_SYMPTOM_CHARS: usize = 5;

/// Radar band shown under the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarBand {
    NormalBaseline,
    ModerateAlert,
    HighUrgency,
}

impl RadarBand {
    #[must_use]
    pub fn from_level(level: u8) -> Self {
        if level > 70 {
            Self::HighUrgency
        } else if level > 40 {
            Self::ModerateAlert
        } else {
            Self::NormalBaseline
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NormalBaseline => "Normal Baseline",
            Self::ModerateAlert => "Moderate Alert",
            Self::HighUrgency => "High Urgency",
        }
    }

    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::HighUrgency => {
                "Symptoms correlate with abnormal kidney values. Clinical review advised."
            }
            _ => "Monitoring symptoms alongside your lab values.",
        }
    }
}

/// Symptom buffer plus the climbing level.
#[derive(Debug)]
pub struct RiskRadar {
    symptoms: String,
    level: u8,
    climb_from: Option<Instant>,
}

impl Default for RiskRadar {
    fn default() -> Self {
        Self {
            symptoms: String::new(),
            level: RADAR_BASELINE,
            climb_from: None,
        }
    }
}

impl RiskRadar {
    #[must_use]
    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn band(&self) -> RadarBand {
        RadarBand::from_level(self.level)
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.symptoms.push(c);
        self.after_edit(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        self.symptoms.pop();
        self.after_edit(now);
    }

    /// Replace the whole description.
    pub fn set_symptoms(&mut self, text: &str, now: Instant) {
        self.symptoms.zeroize();
        self.symptoms.push_str(text);
        self.after_edit(now);
    }

    fn after_edit(&mut self, now: Instant) {
        if self.symptoms.chars().count() > MIN_SYMPTOM_CHARS {
            self.climb_from = Some(now);
        } else {
            self.level = RADAR_BASELINE;
            self.climb_from = None;
        }
    }

    /// Apply every climb interval that has elapsed by `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(mut from) = self.climb_from else {
            return;
        };
        while self.level < RADAR_CEILING && now.saturating_duration_since(from) >= RADAR_INTERVAL {
            self.level = self.level.saturating_add(RADAR_STEP).min(RADAR_CEILING);
            from += RADAR_INTERVAL;
        }
        self.climb_from = Some(from);
    }

    /// Wipe the description and return to baseline.
    pub fn reset(&mut self) {
        self.symptoms.zeroize();
        self.level = RADAR_BASELINE;
        self.climb_from = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_does_not_climb() {
        let t0 = Instant::now();
        let mut radar = RiskRadar::default();
        radar.set_symptoms("tired", t0);
        radar.tick(t0 + Duration::from_secs(10));
        assert_eq!(radar.level(), RADAR_BASELINE);
    }

    #[test]
    fn test_climbs_per_interval_to_ceiling() {
        let t0 = Instant::now();
        let mut radar = RiskRadar::default();
        radar.set_symptoms("ankle swelling", t0);

        radar.tick(t0 + Duration::from_millis(499));
        assert_eq!(radar.level(), RADAR_BASELINE);

        radar.tick(t0 + Duration::from_millis(1500));
        assert_eq!(radar.level(), RADAR_BASELINE + 3 * RADAR_STEP);

        radar.tick(t0 + Duration::from_secs(60));
        assert_eq!(radar.level(), RADAR_CEILING);
        assert_eq!(radar.band(), RadarBand::HighUrgency);
    }

    #[test]
    fn test_editing_restarts_interval_and_shortening_resets() {
        let t0 = Instant::now();
        let mut radar = RiskRadar::default();
        radar.set_symptoms("headache", t0);
        radar.tick(t0 + Duration::from_millis(1000));
        assert_eq!(radar.level(), RADAR_BASELINE + 2 * RADAR_STEP);

        radar.push_char('s', t0 + Duration::from_millis(1200));
        radar.tick(t0 + Duration::from_millis(1600));
        assert_eq!(radar.level(), RADAR_BASELINE + 2 * RADAR_STEP);

        radar.set_symptoms("ok", t0 + Duration::from_secs(2));
        assert_eq!(radar.level(), RADAR_BASELINE);
        assert_eq!(radar.band(), RadarBand::NormalBaseline);
    }

    #[test]
    fn test_reset_clears_text() {
        let t0 = Instant::now();
        let mut radar = RiskRadar::default();
        radar.set_symptoms("persistent fatigue", t0);
        radar.reset();
        assert!(radar.symptoms().is_empty());
        assert_eq!(radar.level(), RADAR_BASELINE);
    }
}
