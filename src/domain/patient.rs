//! Clinician queue records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Flag;

/// Risk above which a patient is critical.
pub const CRITICAL_RISK: u8 = 70;
/// Risk above which a patient needs follow-up.
pub const MODERATE_RISK: u8 = 40;
/// Risk above which a patient is stable rather than normal.
pub const STABLE_RISK: u8 = 25;

/// Session-local identifier, assigned by the queue on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(pub u64);

/// Queue status, derived from risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Normal,
    Stable,
    Moderate,
    Critical,
}

impl PatientStatus {
    /// All statuses, in ascending severity.
    pub const ALL: [PatientStatus; 4] = [Self::Normal, Self::Stable, Self::Moderate, Self::Critical];

    /// Classify a risk score. Monotonic in `risk`.
    #[must_use]
    pub fn from_risk(risk: u8) -> Self {
        if risk > CRITICAL_RISK {
            Self::Critical
        } else if risk > MODERATE_RISK {
            Self::Moderate
        } else if risk > STABLE_RISK {
            Self::Stable
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Stable => write!(f, "Stable"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// One patient in the clinician queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: String,
    pub age: u32,

    /// Risk score, 0-100
    pub risk: u8,

    pub status: PatientStatus,

    /// Short headline of the AI findings
    pub findings: String,

    /// When the patient entered the queue
    pub admitted_at: DateTime<Utc>,
}

impl PatientRecord {
    /// Create a record; status is derived from `risk`, which is clamped to 100.
    #[must_use]
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        age: u32,
        risk: u8,
        findings: impl Into<String>,
        admitted_at: DateTime<Utc>,
    ) -> Self {
        let risk = risk.min(100);
        Self {
            id,
            name: name.into(),
            age,
            risk,
            status: PatientStatus::from_risk(risk),
            findings: findings.into(),
            admitted_at,
        }
    }

    /// Badge color for the risk score.
    #[must_use]
    pub fn badge(&self) -> Flag {
        if self.risk > CRITICAL_RISK {
            Flag::Red
        } else if self.risk > MODERATE_RISK {
            Flag::Yellow
        } else {
            Flag::Green
        }
    }

    /// Human relative admission time, e.g. `15m ago`.
    #[must_use]
    pub fn time_label(&self, now: DateTime<Utc>) -> String {
        relative_time(self.admitted_at, now)
    }
}

/// Render the distance between `then` and `now` the way the queue shows it.
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_from_risk() {
        assert_eq!(PatientStatus::from_risk(85), PatientStatus::Critical);
        assert_eq!(PatientStatus::from_risk(71), PatientStatus::Critical);
        assert_eq!(PatientStatus::from_risk(70), PatientStatus::Moderate);
        assert_eq!(PatientStatus::from_risk(62), PatientStatus::Moderate);
        assert_eq!(PatientStatus::from_risk(40), PatientStatus::Stable);
        assert_eq!(PatientStatus::from_risk(32), PatientStatus::Stable);
        assert_eq!(PatientStatus::from_risk(25), PatientStatus::Normal);
        assert_eq!(PatientStatus::from_risk(0), PatientStatus::Normal);
    }

    #[test]
    fn test_status_is_monotonic() {
        let mut previous = PatientStatus::from_risk(0);
        for risk in 1..=100u8 {
            let current = PatientStatus::from_risk(risk);
            let rank = |s: PatientStatus| PatientStatus::ALL.iter().position(|x| *x == s);
            assert!(rank(current) >= rank(previous), "risk {risk} went down");
            previous = current;
        }
    }

    #[test]
    fn test_record_clamps_risk() {
        let record = PatientRecord::new(PatientId(1), "A", 30, 200, "x", Utc::now());
        assert_eq!(record.risk, 100);
        assert_eq!(record.status, PatientStatus::Critical);
        assert_eq!(record.badge(), Flag::Red);
    }

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(15), now), "15m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
    }
}
