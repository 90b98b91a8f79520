//! Medical history log.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{panel, ViewState};
use crate::domain::Urgency;
use crate::tui::styles::MedicalTheme;

pub fn render_history(f: &mut Frame, area: Rect, view: &ViewState) {
    let input_rows = if view.history_path.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(input_rows), Constraint::Min(0)])
        .split(area);

    if let Some(path) = view.history_path {
        let input = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(path, MedicalTheme::text()),
            Span::styled("▌", MedicalTheme::focused()),
        ]))
        .block(
            Block::default()
                .title(Span::styled(" Upload Historical Report ", MedicalTheme::focused()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border_focused()),
        );
        f.render_widget(input, chunks[0]);
    }

    let header = Row::new(["Date", "Report", "Source", "Status"]).style(MedicalTheme::subtitle());
    let rows = view.workflow.history().iter().map(|item| {
        let urgency_style = match item.urgency {
            Urgency::Normal => MedicalTheme::success(),
            Urgency::Alert => MedicalTheme::danger(),
        };
        Row::new(vec![
            Cell::from(item.date_label()),
            Cell::from(item.kind.as_str()),
            Cell::from(item.source.as_str()),
            Cell::from(Span::styled(item.urgency.to_string(), urgency_style)),
        ])
        .style(MedicalTheme::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(panel("Medical History"));
    f.render_widget(table, chunks[1]);
}
