//! Session-local history of past reports. Append-only, newest first.

use chrono::NaiveDate;

use crate::domain::{HistoryItem, Urgency};

/// Source recorded for reports added from this client.
pub const USER_UPLOAD_SOURCE: &str = "User Upload";

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    items: Vec<HistoryItem>,
}

impl HistoryLog {
    /// Log pre-filled with the demo history.
    #[must_use]
    pub fn seeded() -> Self {
        let seed = [
            ((2025, 10, 12), "Full Blood Count", "City Labs", Urgency::Normal),
            ((2025, 8, 5), "Kidney Panel", "Apollo Hospital", Urgency::Alert),
            ((2025, 5, 20), "Diabetes Care", "City Labs", Urgency::Normal),
            ((2025, 1, 15), "Annual Physical", "Care Clinics", Urgency::Normal),
        ];
        let items = seed
            .into_iter()
            .filter_map(|((y, m, d), kind, source, urgency)| {
                Some(HistoryItem {
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    kind: kind.to_string(),
                    source: source.to_string(),
                    urgency,
                })
            })
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Record a historical report picked by the user; its type is derived
    /// from the file name.
    pub fn record_upload(&mut self, file_name: &str, date: NaiveDate) -> &HistoryItem {
        let item = HistoryItem {
            date,
            kind: report_kind_from_file_name(file_name),
            source: USER_UPLOAD_SOURCE.to_string(),
            urgency: Urgency::Normal,
        };
        tracing::info!("Recorded historical report dated {}", item.date_label());
        self.items.insert(0, item);
        &self.items[0]
    }
}

/// `kidney_panel-2024.pdf` becomes `Kidney Panel 2024`.
#[must_use]
pub fn report_kind_from_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    let spaced = stem.replace(['_', '-'], " ");

    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }

    let out = out.trim().to_string();
    if out.is_empty() {
        "Untitled Report".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_history() {
        let log = HistoryLog::seeded();
        assert_eq!(log.items().len(), 4);
        assert_eq!(log.items()[0].date_label(), "Oct 12, 2025");
        assert_eq!(log.items()[1].urgency, Urgency::Alert);
    }

    #[test]
    fn test_record_upload_prepends() {
        let mut log = HistoryLog::seeded();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let item = log.record_upload("lipid_profile-march.pdf", date).clone();

        assert_eq!(item.kind, "Lipid Profile March");
        assert_eq!(item.source, USER_UPLOAD_SOURCE);
        assert_eq!(item.urgency, Urgency::Normal);
        assert_eq!(log.items()[0], item);
        assert_eq!(log.items().len(), 5);
    }

    #[test]
    fn test_report_kind_from_file_name() {
        assert_eq!(report_kind_from_file_name("thyroid.png"), "Thyroid");
        assert_eq!(report_kind_from_file_name("CBC_results.v2.pdf"), "CBC Results");
        assert_eq!(report_kind_from_file_name(".pdf"), "Untitled Report");
    }
}
