//! Clinical priority queue: search bar, patient table, snapshot and intake form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::{panel, ViewState};
use crate::domain::PatientRecord;
use crate::tui::input::PatientForm;
use crate::tui::styles::MedicalTheme;

pub fn render_queue(f: &mut Frame, area: Rect, view: &ViewState) {
    let wf = view.workflow;
    let selected = wf.selected_patient();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if selected.is_some() {
            [Constraint::Percentage(62), Constraint::Percentage(38)]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);

    render_filter_bar(f, left[0], view);

    let patients = wf.visible_patients();
    if patients.is_empty() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No patients found matching your criteria.",
                    MedicalTheme::text_secondary(),
                )),
                Line::from(vec![
                    Span::styled("[X] ", MedicalTheme::key_hint()),
                    Span::styled("Clear all filters", MedicalTheme::key_desc()),
                ]),
            ])
            .alignment(Alignment::Center)
            .block(panel("Clinical Priority Radar")),
            left[1],
        );
    } else {
        render_table(f, left[1], &patients, view);
    }

    if let Some(patient) = selected {
        render_snapshot(f, columns[1], patient, view);
    }

    if let Some(form) = view.patient_form {
        render_intake_form(f, area, form);
    }
}

fn render_filter_bar(f: &mut Frame, area: Rect, view: &ViewState) {
    let filter = view.workflow.queue_filter();
    let border = if view.search_active {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };

    let mut spans = vec![Span::styled(" Search: ", MedicalTheme::text_secondary())];
    if filter.query.is_empty() && !view.search_active {
        spans.push(Span::styled("name or findings", MedicalTheme::text_muted()));
    } else {
        spans.push(Span::styled(filter.query.as_str(), MedicalTheme::text()));
    }
    if view.search_active {
        spans.push(Span::styled("▌", MedicalTheme::focused()));
    }
    spans.push(Span::styled("   Status: ", MedicalTheme::text_secondary()));
    spans.push(Span::styled(filter.status.to_string(), MedicalTheme::focused()));

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        ),
        area,
    );
}

fn render_table(f: &mut Frame, area: Rect, patients: &[&PatientRecord], view: &ViewState) {
    let header = Row::new(["Patient", "Age", "Risk", "Status", "AI Findings", "Time"])
        .style(MedicalTheme::subtitle());

    let rows = patients.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.name.as_str()),
            Cell::from(p.age.to_string()),
            Cell::from(Span::styled(
                format!("{}%", p.risk),
                MedicalTheme::flag(p.badge()),
            )),
            Cell::from(Span::styled(
                p.status.to_string(),
                MedicalTheme::patient_status(p.status),
            )),
            Cell::from(p.findings.as_str()),
            Cell::from(p.time_label(view.now)),
        ])
        .style(MedicalTheme::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Min(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .row_highlight_style(MedicalTheme::selected())
    .highlight_symbol("▶ ")
    .block(panel(&format!(
        "Clinical Priority Radar ({} of {})",
        patients.len(),
        view.workflow.queue().len()
    )));

    let mut state = TableState::default();
    state.select(Some(view.queue_cursor.min(patients.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_snapshot(f: &mut Frame, area: Rect, patient: &PatientRecord, view: &ViewState) {
    let badge = MedicalTheme::flag(patient.badge());
    let lines = vec![
        Line::from(Span::styled(patient.name.as_str(), MedicalTheme::title())),
        Line::from(Span::styled(
            format!("Age {} · admitted {}", patient.age, patient.time_label(view.now)),
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Risk     ", MedicalTheme::text_secondary()),
            Span::styled(format!("{}%", patient.risk), badge),
        ]),
        Line::from(vec![
            Span::styled("Status   ", MedicalTheme::text_secondary()),
            Span::styled(
                patient.status.to_string(),
                MedicalTheme::patient_status(patient.status),
            ),
        ]),
        Line::from(vec![
            Span::styled("Findings ", MedicalTheme::text_secondary()),
            Span::styled(patient.findings.as_str(), MedicalTheme::text()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Close", MedicalTheme::key_desc()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Patient Snapshot")),
        area,
    );
}

fn render_intake_form(f: &mut Frame, area: Rect, form: &PatientForm) {
    let popup = centered(area, 50, 11);
    f.render_widget(Clear, popup);

    let block = panel("Add Patient");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let field = |label: &'static str, value: &str, focused: bool| {
        let (border, title) = if focused {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };
        let mut spans = vec![Span::raw(" "), Span::styled(value.to_string(), MedicalTheme::text())];
        if focused {
            spans.push(Span::styled("▌", MedicalTheme::focused()));
        }
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(Span::styled(format!(" {label} "), title))
                .borders(Borders::ALL)
                .border_style(border),
        )
    };

    f.render_widget(field("Name", form.name.value(), !form.age_focused), rows[0]);
    f.render_widget(field("Age", form.age.value(), form.age_focused), rows[1]);

    let footer = match form.error.as_deref() {
        Some(err) => Line::from(Span::styled(err, MedicalTheme::danger())),
        None => Line::from(Span::styled(
            "Risk is assigned on intake.",
            MedicalTheme::text_muted(),
        )),
    };
    f.render_widget(Paragraph::new(footer), rows[2]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
