//! Clinician patient queue.
//!
//! An in-memory, most-recent-first list of patients with a search/filter
//! projection and a detail selection. Records are never mutated after
//! insert and there is no deletion path.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{PatientId, PatientRecord, PatientStatus};
use crate::ports::RiskScorer;

/// Findings text for a patient added by hand.
pub const NEW_INTAKE_FINDINGS: &str = "New Intake";

/// Error type for queue operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Patient {0:?} is not in the queue")]
    UnknownPatient(PatientId),
}

/// Status filter of the queue view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PatientStatus),
}

impl StatusFilter {
    /// Whether `status` passes the filter.
    #[must_use]
    pub fn admits(&self, status: PatientStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }

    /// Next filter in the picker order: All, Critical, Moderate, Stable, Normal.
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            Self::All => Self::Only(PatientStatus::Critical),
            Self::Only(PatientStatus::Critical) => Self::Only(PatientStatus::Moderate),
            Self::Only(PatientStatus::Moderate) => Self::Only(PatientStatus::Stable),
            Self::Only(PatientStatus::Stable) => Self::Only(PatientStatus::Normal),
            Self::Only(PatientStatus::Normal) => Self::All,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Self::All),
            "Critical" => Ok(Self::Only(PatientStatus::Critical)),
            "Moderate" => Ok(Self::Only(PatientStatus::Moderate)),
            "Stable" => Ok(Self::Only(PatientStatus::Stable)),
            "Normal" => Ok(Self::Only(PatientStatus::Normal)),
            other => Err(format!("Unknown status filter: {other}")),
        }
    }
}

/// Current search text and status filter of the queue view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueFilter {
    pub query: String,
    pub status: StatusFilter,
}

impl QueueFilter {
    /// Back to an empty query and `All`.
    pub fn clear(&mut self) {
        self.query.clear();
        self.status = StatusFilter::All;
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.query.is_empty() && self.status == StatusFilter::All
    }
}

/// Oldest age accepted on intake.
pub const MAX_AGE: u32 = 130;

/// Coerce free-form age input to a non-negative integer.
///
/// Leading whitespace and digits are read (`"45 years"` is 45); anything
/// unreadable, negative or above `MAX_AGE` becomes 0.
#[must_use]
pub fn coerce_age(input: &str) -> u32 {
    let trimmed = input.trim_start();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits: String = trimmed
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<u32>() {
        Ok(age) if age <= MAX_AGE => age,
        _ => 0,
    }
}

/// The queue store.
pub struct PatientQueue {
    patients: Vec<PatientRecord>,
    next_id: u64,
    selected: Option<PatientId>,
    scorer: Box<dyn RiskScorer>,
}

impl PatientQueue {
    /// Empty queue.
    pub fn new(scorer: Box<dyn RiskScorer>) -> Self {
        Self {
            patients: Vec::new(),
            next_id: 1,
            selected: None,
            scorer,
        }
    }

    /// Queue pre-filled with the session's demo patients.
    pub fn seeded(scorer: Box<dyn RiskScorer>, now: DateTime<Utc>) -> Self {
        let mut queue = Self::new(scorer);
        // Oldest first so the most recent ends up at the head.
        let seed = [
            ("Robert J.", 58, 18, "Post-Op Stable", Duration::hours(3)),
            ("Emma Smith", 32, 32, "Normal Baseline", Duration::hours(1)),
            ("John Doe", 45, 62, "Hyperglycemia", Duration::minutes(15)),
            ("Sujitha K.", 28, 85, "Renal Failure Alert", Duration::minutes(2)),
        ];
        for (name, age, risk, findings, ago) in seed {
            queue.insert(name, age, risk, findings, now - ago);
        }
        queue
    }

    fn insert(
        &mut self,
        name: &str,
        age: u32,
        risk: u8,
        findings: &str,
        admitted_at: DateTime<Utc>,
    ) -> PatientId {
        let id = PatientId(self.next_id);
        self.next_id += 1;
        self.patients
            .insert(0, PatientRecord::new(id, name, age, risk, findings, admitted_at));
        id
    }

    /// Add a patient from form input; risk comes from the configured scorer.
    ///
    /// # Errors
    /// Returns `QueueError::Validation` if the name is blank. The queue is
    /// left unchanged.
    pub fn add_patient(
        &mut self,
        name: &str,
        age: &str,
        now: DateTime<Utc>,
    ) -> Result<PatientId, QueueError> {
        let name = validate_name(name)?;
        let age = coerce_age(age);
        let risk = self.scorer.score(name, age);
        Ok(self.admit(name, age, risk, now))
    }

    /// Add a patient with an externally supplied risk score.
    ///
    /// # Errors
    /// Returns `QueueError::Validation` if the name is blank.
    pub fn add_patient_with_risk(
        &mut self,
        name: &str,
        age: u32,
        risk: u8,
        now: DateTime<Utc>,
    ) -> Result<PatientId, QueueError> {
        let name = validate_name(name)?;
        Ok(self.admit(name, age, risk, now))
    }

    fn admit(&mut self, name: &str, age: u32, risk: u8, now: DateTime<Utc>) -> PatientId {
        let id = self.insert(name, age, risk, NEW_INTAKE_FINDINGS, now);
        tracing::info!(
            "Admitted patient {:?} to queue (risk {}, status {})",
            id,
            risk.min(100),
            PatientStatus::from_risk(risk.min(100))
        );
        id
    }

    /// Patients whose name or findings contain `filter.query`
    /// (case-insensitive) and whose status passes `filter.status`, in queue order.
    #[must_use]
    pub fn search(&self, filter: &QueueFilter) -> Vec<&PatientRecord> {
        let needle = filter.query.to_lowercase();
        let hits: Vec<&PatientRecord> = self
            .patients
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.findings.to_lowercase().contains(&needle)
            })
            .filter(|p| filter.status.admits(p.status))
            .collect();
        tracing::debug!(
            "Queue search (filter {}) matched {} of {}",
            filter.status,
            hits.len(),
            self.patients.len()
        );
        hits
    }

    /// All patients, most recent first.
    #[must_use]
    pub fn patients(&self) -> &[PatientRecord] {
        &self.patients
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PatientId) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Open the detail view for `id`.
    ///
    /// # Errors
    /// Returns `QueueError::UnknownPatient` if `id` is not queued.
    pub fn select(&mut self, id: PatientId) -> Result<(), QueueError> {
        if self.get(id).is_none() {
            return Err(QueueError::UnknownPatient(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&PatientRecord> {
        self.selected.and_then(|id| self.get(id))
    }
}

fn validate_name(name: &str) -> Result<&str, QueueError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(QueueError::Validation {
            field: "name",
            reason: "must not be empty",
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedRiskScorer;

    fn seeded() -> PatientQueue {
        PatientQueue::seeded(Box::new(FixedRiskScorer(50)), Utc::now())
    }

    fn names(records: &[&PatientRecord]) -> Vec<String> {
        records.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_seed_order_is_most_recent_first() {
        let queue = seeded();
        let all: Vec<&PatientRecord> = queue.patients().iter().collect();
        assert_eq!(
            names(&all),
            vec!["Sujitha K.", "John Doe", "Emma Smith", "Robert J."]
        );
        assert_eq!(queue.patients()[0].status, PatientStatus::Critical);
        assert_eq!(queue.patients()[3].status, PatientStatus::Normal);
    }

    #[test]
    fn test_empty_search_all_filter_returns_everything_in_order() {
        let queue = seeded();
        let hits = queue.search(&QueueFilter::default());
        let all: Vec<&PatientRecord> = queue.patients().iter().collect();
        assert_eq!(hits, all);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let queue = seeded();
        let filter = QueueFilter {
            query: "sujitha".to_string(),
            status: StatusFilter::All,
        };
        let hits = queue.search(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sujitha K.");
        assert_eq!(hits[0].risk, 85);
    }

    #[test]
    fn test_search_matches_findings_and_combines_with_status() {
        let queue = seeded();
        let mut filter = QueueFilter {
            query: "STABLE".to_string(),
            status: StatusFilter::All,
        };
        assert_eq!(names(&queue.search(&filter)), vec!["Robert J."]);

        filter.query = "e".to_string();
        filter.status = StatusFilter::Only(PatientStatus::Moderate);
        assert_eq!(names(&queue.search(&filter)), vec!["John Doe"]);

        filter.clear();
        assert!(filter.is_cleared());
        assert_eq!(queue.search(&filter).len(), 4);
    }

    #[test]
    fn test_blank_name_is_rejected_and_queue_unchanged() {
        let mut queue = seeded();
        let err = queue.add_patient("", "30", Utc::now()).unwrap_err();
        assert_eq!(
            err,
            QueueError::Validation {
                field: "name",
                reason: "must not be empty"
            }
        );
        assert!(queue.add_patient("   ", "30", Utc::now()).is_err());
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_add_patient_goes_to_head_with_scored_risk() {
        let mut queue = seeded();
        let id = queue
            .add_patient(" Asha R. ", "41", Utc::now())
            .expect("Should add");

        let head = &queue.patients()[0];
        assert_eq!(head.id, id);
        assert_eq!(head.name, "Asha R.");
        assert_eq!(head.age, 41);
        assert_eq!(head.risk, 50);
        assert_eq!(head.status, PatientStatus::Moderate);
        assert_eq!(head.findings, NEW_INTAKE_FINDINGS);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_add_patient_with_supplied_risk() {
        let mut queue = seeded();
        queue
            .add_patient_with_risk("Lee", 60, 90, Utc::now())
            .expect("Should add");
        assert_eq!(queue.patients()[0].status, PatientStatus::Critical);
    }

    #[test]
    fn test_coerce_age() {
        assert_eq!(coerce_age("30"), 30);
        assert_eq!(coerce_age(" 45 years"), 45);
        assert_eq!(coerce_age("-5"), 0);
        assert_eq!(coerce_age("abc"), 0);
        assert_eq!(coerce_age(""), 0);
        assert_eq!(coerce_age("130"), MAX_AGE);
        assert_eq!(coerce_age("131"), 0);
        assert_eq!(coerce_age("99999999999"), 0);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut queue = seeded();
        let id = queue.patients()[1].id;
        queue.select(id).expect("Should select");
        assert_eq!(queue.selected().map(|p| p.name.as_str()), Some("John Doe"));

        queue.deselect();
        assert!(queue.selected().is_none());
        assert_eq!(
            queue.select(PatientId(999)),
            Err(QueueError::UnknownPatient(PatientId(999)))
        );
    }

    #[test]
    fn test_status_filter_parse_and_cycle() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Critical".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(PatientStatus::Critical))
        );
        assert!("Urgent".parse::<StatusFilter>().is_err());

        let mut filter = StatusFilter::All;
        for _ in 0..5 {
            filter = filter.cycled();
        }
        assert_eq!(filter, StatusFilter::All);
    }
}
