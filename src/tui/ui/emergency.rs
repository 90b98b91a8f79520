//! Emergency guidance.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::application::projections::{red_flags, RedFlags};
use crate::domain::ReportResult;
use crate::tui::styles::MedicalTheme;

pub fn render_emergency(f: &mut Frame, area: Rect, report: &ReportResult, scroll: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled("Immediate Action Required", MedicalTheme::danger())),
            Line::from(Span::styled(
                "Based on your clinical findings and live symptoms, we recommend immediate medical consultation.",
                MedicalTheme::text(),
            )),
        ])
        .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let flags = red_flags(report);
    let title = match &flags {
        RedFlags::Present(found) if found.len() > 1 => format!(
            "Red-Flag Indicators ({} of {})",
            scroll.min(found.len() - 1) + 1,
            found.len()
        ),
        _ => "Red-Flag Indicators".to_string(),
    };
    let lines: Vec<Line> = match flags {
        RedFlags::Present(found) => found
            .into_iter()
            .skip(scroll)
            .map(|r| {
                Line::from(vec![
                    Span::styled(" ● ", MedicalTheme::danger()),
                    Span::styled(r.test_name.as_str(), MedicalTheme::title()),
                    Span::styled(
                        format!(": {} ({})", r.status, r.value_with_unit()),
                        MedicalTheme::text_secondary(),
                    ),
                ])
            })
            .collect(),
        RedFlags::NoneDetected => vec![Line::from(vec![
            Span::styled(" ● ", MedicalTheme::success()),
            Span::styled(RedFlags::NONE_DETECTED_MESSAGE, MedicalTheme::success()),
        ])],
    };
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel(&title)),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Primary Care         ", MedicalTheme::text()),
                Span::styled("555-0192", MedicalTheme::info()),
            ]),
            Line::from(vec![
                Span::styled("EMERGENCY SERVICES   ", MedicalTheme::danger()),
                Span::styled("911", MedicalTheme::title()),
            ]),
        ])
        .block(panel("Emergency Contacts")),
        chunks[2],
    );
}
