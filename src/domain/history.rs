//! Prior report log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a past report carried an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    Alert,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Alert => write!(f, "Alert"),
        }
    }
}

/// One past report in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub date: NaiveDate,

    /// Report type, e.g. "Kidney Panel"
    pub kind: String,

    /// Lab or hospital the report came from
    pub source: String,

    pub urgency: Urgency,
}

impl HistoryItem {
    /// Date as shown in the log, e.g. `Oct 12, 2025`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format("%b %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label() {
        let item = HistoryItem {
            date: NaiveDate::from_ymd_opt(2025, 8, 5).expect("valid date"),
            kind: "Kidney Panel".to_string(),
            source: "Apollo Hospital".to_string(),
            urgency: Urgency::Alert,
        };
        assert_eq!(item.date_label(), "Aug 05, 2025");
    }
}
