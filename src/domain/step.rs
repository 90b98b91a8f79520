//! Workflow positions and audience perspective.

use serde::{Deserialize, Serialize};

/// One view in the fixed review sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    Welcome,
    Upload,
    Overview,
    Explanation,
    VisualInsights,
    ClinicalView,
    ActionPlan,
    RiskRadar,
    ClinicalQueue,
    Emergency,
    History,
    Disclaimer,
}

impl Step {
    /// All steps in sequence order.
    pub const ALL: [Step; 12] = [
        Self::Welcome,
        Self::Upload,
        Self::Overview,
        Self::Explanation,
        Self::VisualInsights,
        Self::ClinicalView,
        Self::ActionPlan,
        Self::RiskRadar,
        Self::ClinicalQueue,
        Self::Emergency,
        Self::History,
        Self::Disclaimer,
    ];

    pub const FIRST: Step = Self::Welcome;
    pub const LAST: Step = Self::Disclaimer;

    /// Zero-based position in the sequence.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Step at `index`, if in range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step, saturating at the last one.
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step, saturating at the first one.
    #[must_use]
    pub fn prev(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::FIRST)
    }

    /// Whether the view renders data from the current report.
    #[must_use]
    pub fn requires_report(self) -> bool {
        matches!(
            self,
            Self::Overview
                | Self::Explanation
                | Self::VisualInsights
                | Self::ClinicalView
                | Self::ActionPlan
                | Self::Emergency
        )
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Upload => "Upload Report",
            Self::Overview => "Health Overview",
            Self::Explanation => "Your Lab Results",
            Self::VisualInsights => "Visual Insights",
            Self::ClinicalView => "Clinical Dashboard",
            Self::ActionPlan => "Action Plan",
            Self::RiskRadar => "Live Risk Radar",
            Self::ClinicalQueue => "Clinical Priority Queue",
            Self::Emergency => "Emergency Guidance",
            Self::History => "Medical History",
            Self::Disclaimer => "Trust & Disclaimer",
        }
    }
}

/// Audience perspective on the same report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain-language explanations
    #[default]
    Patient,
    /// Clinical terminology and correlations
    Clinical,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Patient => Self::Clinical,
            Self::Clinical => Self::Patient,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "Patient"),
            Self::Clinical => write!(f, "Clinical"),
        }
    }
}
