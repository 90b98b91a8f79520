//! Color palette and styles for the review screens.
//!
//! Severity colors follow the report flags: green within range, amber
//! borderline, rose for anything needing medical attention.

use ratatui::style::{Color, Modifier, Style};

use crate::application::projections::{Priority, ScoreBand};
use crate::application::RadarBand;
use crate::domain::{Flag, Mode, PatientStatus};

/// Sky and slate palette shared by every view.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Sky, patient perspective accent
    pub const ACCENT: Color = Color::Rgb(14, 165, 233); // #0EA5E9
    pub const ACCENT_SOFT: Color = Color::Rgb(56, 189, 248); // #38BDF8
    pub const ACCENT_DEEP: Color = Color::Rgb(2, 132, 199); // #0284C7

    /// Teal, clinical perspective accent
    pub const CLINICAL: Color = Color::Rgb(20, 184, 166); // #14B8A6

    pub const NORMAL: Color = Color::Rgb(52, 211, 153); // #34D399
    pub const BORDERLINE: Color = Color::Rgb(245, 158, 11); // #F59E0B
    pub const ALERT: Color = Color::Rgb(251, 113, 133); // #FB7185
    pub const ALERT_DEEP: Color = Color::Rgb(225, 29, 72); // #E11D48
    pub const NOTE: Color = Color::Rgb(129, 140, 248); // #818CF8

    pub const SURFACE: Color = Color::Rgb(2, 6, 23); // #020617
    pub const OUTLINE: Color = Color::Rgb(71, 85, 105); // #475569

    pub const INK: Color = Color::Rgb(241, 245, 249); // #F1F5F9
    pub const INK_SOFT: Color = Color::Rgb(203, 213, 225); // #CBD5E1
    pub const INK_FAINT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    fn fg(color: Color) -> Style {
        Style::new().fg(color)
    }

    fn bold(color: Color) -> Style {
        Style::new().fg(color).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn title() -> Style {
        Self::bold(Self::INK)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Self::bold(Self::ACCENT_SOFT)
    }

    #[must_use]
    pub fn text() -> Style {
        Self::fg(Self::INK)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Self::fg(Self::INK_SOFT)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Self::fg(Self::INK_FAINT)
    }

    #[must_use]
    pub fn success() -> Style {
        Self::fg(Self::NORMAL)
    }

    #[must_use]
    pub fn warning() -> Style {
        Self::fg(Self::BORDERLINE)
    }

    #[must_use]
    pub fn danger() -> Style {
        Self::fg(Self::ALERT)
    }

    #[must_use]
    pub fn info() -> Style {
        Self::fg(Self::NOTE)
    }

    /// Highlighted table row
    #[must_use]
    pub fn selected() -> Style {
        Self::bold(Self::SURFACE).bg(Self::ACCENT)
    }

    #[must_use]
    pub fn focused() -> Style {
        Self::bold(Self::ACCENT_SOFT)
    }

    #[must_use]
    pub fn border() -> Style {
        Self::fg(Self::OUTLINE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Self::fg(Self::ACCENT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Self::bold(Self::ACCENT_SOFT)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Self::fg(Self::INK_FAINT)
    }

    /// Accent for the active perspective
    #[must_use]
    pub fn mode(mode: Mode) -> Style {
        match mode {
            Mode::Patient => Self::bold(Self::ACCENT_SOFT),
            Mode::Clinical => Self::bold(Self::CLINICAL),
        }
    }

    #[must_use]
    pub fn flag(flag: Flag) -> Style {
        match flag {
            Flag::Green => Self::success(),
            Flag::Yellow => Self::warning(),
            Flag::Red => Self::danger(),
        }
    }

    #[must_use]
    pub fn score_band(band: ScoreBand) -> Style {
        Self::flag(band.flag()).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn radar_band(band: RadarBand) -> Style {
        match band {
            RadarBand::NormalBaseline => Self::success(),
            RadarBand::ModerateAlert => Self::warning(),
            RadarBand::HighUrgency => Self::danger(),
        }
    }

    #[must_use]
    pub fn patient_status(status: PatientStatus) -> Style {
        match status {
            PatientStatus::Critical => Self::danger(),
            PatientStatus::Moderate => Self::warning(),
            PatientStatus::Stable => Self::info(),
            PatientStatus::Normal => Self::success(),
        }
    }

    #[must_use]
    pub fn priority(priority: Priority) -> Style {
        match priority {
            Priority::Asap => Self::bold(Self::INK).bg(Self::ALERT_DEEP),
            Priority::Routine => Self::text_secondary(),
        }
    }
}

/// Welcome screen banner
pub const LOGO: &str = r#"
╔╦╗┌─┐┌┬┐┬┬  ┌─┐┌┐┌┌─┐
║║║├┤  │││││  ├┤ │││└─┐
╩ ╩└─┘─┴┘┴┴─┘└─┘┘└┘└─┘
"#;
