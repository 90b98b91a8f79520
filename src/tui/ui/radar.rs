//! Live risk radar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::application::radar::MIN_SYMPTOM_CHARS;
use crate::application::RiskRadar;
use crate::tui::styles::MedicalTheme;

pub fn render_radar(f: &mut Frame, area: Rect, radar: &RiskRadar) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let text = if radar.symptoms().is_empty() {
        Line::from(Span::styled(
            "e.g. tired for two weeks, swollen ankles, less urine",
            MedicalTheme::text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled(radar.symptoms(), MedicalTheme::text()),
            Span::styled("▌", MedicalTheme::focused()),
        ])
    };
    let input = Paragraph::new(vec![
        text,
        Line::from(""),
        Line::from(Span::styled(
            format!("Describe more than {MIN_SYMPTOM_CHARS} characters to update the index."),
            MedicalTheme::text_muted(),
        )),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(Span::styled(" Describe Symptoms ", MedicalTheme::focused()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );
    f.render_widget(input, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    let band = radar.band();
    let gauge = Gauge::default()
        .block(panel("Live Risk Index"))
        .gauge_style(MedicalTheme::radar_band(band))
        .percent(u16::from(radar.level()))
        .label(format!("{}%", radar.level()));
    f.render_widget(gauge, right[0]);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(band.label(), MedicalTheme::radar_band(band))),
            Line::from(""),
            Line::from(Span::styled(band.guidance(), MedicalTheme::text_secondary())),
        ])
        .wrap(Wrap { trim: true })
        .block(panel("Assessment")),
        right[1],
    );
}
