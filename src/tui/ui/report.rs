//! Report views: overview, per-test explanation, clinical dashboard, action plan.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::panel;
use crate::application::projections::{
    action_plan, headline_score, key_findings, summary_text, Priority, ScoreBand,
};
use crate::domain::{Mode, ReportResult, TestResult};
use crate::tui::styles::MedicalTheme;

const BAR_WIDTH: usize = 24;

pub fn render_overview(f: &mut Frame, area: Rect, report: &ReportResult, mode: Mode) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[0]);

    let score = headline_score(&report.explanation);
    let band = ScoreBand::from_score(score);

    let gauge = Gauge::default()
        .block(panel("Health Score"))
        .gauge_style(MedicalTheme::score_band(band))
        .percent(u16::from(score))
        .label(format!("{score}"));
    f.render_widget(gauge, left[0]);

    let mut band_lines = vec![
        Line::from(Span::styled(band.label(), MedicalTheme::score_band(band))),
        Line::from(""),
    ];
    if band == ScoreBand::Critical {
        band_lines.push(Line::from(vec![
            Span::styled("[E] ", MedicalTheme::key_hint()),
            Span::styled("Urgent: open emergency guidance", MedicalTheme::danger()),
        ]));
    }
    let abnormal = report.results.iter().filter(|r| r.flag.is_abnormal()).count();
    band_lines.push(Line::from(Span::styled(
        format!("{abnormal} of {} results outside range", report.results.len()),
        MedicalTheme::text_secondary(),
    )));
    f.render_widget(
        Paragraph::new(band_lines)
            .wrap(Wrap { trim: true })
            .block(panel("Status")),
        left[1],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    f.render_widget(
        Paragraph::new(summary_text(&report.explanation, mode))
            .style(MedicalTheme::text())
            .wrap(Wrap { trim: true })
            .block(panel("Health Summary")),
        right[0],
    );

    let findings: Vec<Line> = key_findings(&report.explanation, mode)
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(" • ", MedicalTheme::mode(mode)),
                Span::styled(s.as_str(), MedicalTheme::text()),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(findings)
            .wrap(Wrap { trim: true })
            .block(panel("Key Findings")),
        right[1],
    );
}

/// Text progress bar for a 0-100 position.
fn bar(visual_value: u8) -> String {
    let filled = usize::from(visual_value) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn result_lines(result: &TestResult) -> Vec<Line<'_>> {
    let style = MedicalTheme::flag(result.flag);
    let mut head = vec![
        Span::styled(result.test_name.as_str(), MedicalTheme::title()),
        Span::raw("  "),
        Span::styled(result.value_with_unit(), style),
        Span::raw("  "),
        Span::styled(format!("[{}]", result.status), style),
    ];
    if let Some(range) = result.reference_range.as_deref() {
        head.push(Span::styled(format!("  ref {range}"), MedicalTheme::text_muted()));
    }
    vec![
        Line::from(head),
        Line::from(Span::styled(bar(result.visual_value), style)),
        Line::from(Span::styled(
            result.interpretation.as_str(),
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
    ]
}

/// Panel title with the position of the first visible item.
fn scrolled_title(title: &str, first: usize, total: usize) -> String {
    if total > 1 {
        format!("{title} ({} of {total})", first.min(total - 1) + 1)
    } else {
        title.to_string()
    }
}

/// `scroll` is the index of the first result card shown.
pub fn render_explanation(
    f: &mut Frame,
    area: Rect,
    report: &ReportResult,
    mode: Mode,
    scroll: usize,
) {
    let subtitle = match mode {
        Mode::Patient => "Each value explained in plain English.",
        Mode::Clinical => "Per-analyte values with reference ranges.",
    };
    let mut lines = vec![
        Line::from(Span::styled(subtitle, MedicalTheme::text_secondary())),
        Line::from(""),
    ];
    lines.extend(report.results.iter().skip(scroll).flat_map(result_lines));

    let title = scrolled_title("Your Lab Results", scroll, report.results.len());
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(&title)),
        area,
    );
}

/// `scroll` is the highlighted row of the results table.
pub fn render_clinical(
    f: &mut Frame,
    area: Rect,
    report: &ReportResult,
    mode: Mode,
    scroll: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    f.render_widget(
        Paragraph::new(report.explanation.doctor_summary.as_str())
            .style(MedicalTheme::text())
            .wrap(Wrap { trim: true })
            .block(panel("AI Diagnostic Findings")),
        top[0],
    );

    let correlations: Vec<Line> = if report.explanation.correlations_doctor.is_empty() {
        vec![Line::from(Span::styled(
            "No correlations reported.",
            MedicalTheme::text_muted(),
        ))]
    } else {
        report
            .explanation
            .correlations_doctor
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(" • ", MedicalTheme::mode(mode)),
                    Span::styled(c.as_str(), MedicalTheme::text()),
                ])
            })
            .collect()
    };
    f.render_widget(
        Paragraph::new(correlations)
            .wrap(Wrap { trim: true })
            .block(panel("Clinical Correlations")),
        top[1],
    );

    let header = Row::new(["Test", "Value", "Reference", "Status", "Flag"])
        .style(MedicalTheme::subtitle());
    let rows = report.results.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.test_name.as_str()),
            Cell::from(r.value_with_unit()),
            Cell::from(r.reference_range.clone().unwrap_or_else(|| "-".to_string())),
            Cell::from(r.status.as_str()),
            Cell::from(Span::styled(r.flag.to_string(), MedicalTheme::flag(r.flag))),
        ])
        .style(MedicalTheme::text())
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(18),
            Constraint::Percentage(20),
            Constraint::Percentage(24),
            Constraint::Percentage(10),
        ],
    )
    .header(header)
    .row_highlight_style(MedicalTheme::selected())
    .block(panel(&scrolled_title(
        "Full Clinical Report",
        scroll,
        report.results.len(),
    )));

    let mut state = TableState::default();
    if !report.results.is_empty() {
        state.select(Some(scroll.min(report.results.len() - 1)));
    }
    f.render_stateful_widget(table, chunks[1], &mut state);
}

pub fn render_action_plan(f: &mut Frame, area: Rect, report: &ReportResult, scroll: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let plan = action_plan(&report.explanation);
    let mut steps: Vec<Line> = Vec::with_capacity(plan.len() * 3);
    if plan.is_empty() {
        steps.push(Line::from(Span::styled(
            "No recommendations in this report.",
            MedicalTheme::text_muted(),
        )));
    }
    for item in plan.iter().skip(scroll) {
        let badge = match item.priority {
            Priority::Asap => " ASAP ",
            Priority::Routine => " ROUTINE ",
        };
        steps.push(Line::from(vec![
            Span::styled(badge, MedicalTheme::priority(item.priority)),
            Span::raw(" "),
            Span::styled(item.text, MedicalTheme::title()),
        ]));
        steps.push(Line::from(Span::styled(
            "Based on your abnormal findings in the uploaded report.",
            MedicalTheme::text_muted(),
        )));
        steps.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(steps)
            .wrap(Wrap { trim: true })
            .block(panel(&scrolled_title("Recommended Steps", scroll, plan.len()))),
        chunks[0],
    );

    let forecast = vec![
        Line::from(Span::styled("If Untreated", MedicalTheme::danger())),
        Line::from(Span::styled(
            "Potential complications based on detected biomarkers.",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled("With Treatment", MedicalTheme::success())),
        Line::from(Span::styled(
            "Improved outcomes expected with recommended interventions.",
            MedicalTheme::text_secondary(),
        )),
    ];
    f.render_widget(
        Paragraph::new(forecast)
            .wrap(Wrap { trim: true })
            .block(panel("Outcome Forecast")),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Explanation, Flag};
    use ratatui::{backend::TestBackend, Terminal};

    fn panel_report(count: usize) -> ReportResult {
        let results = (1..=count)
            .map(|i| TestResult {
                test_name: format!("Analyte {i:02}"),
                value: "1.0".to_string(),
                unit: Some("mmol/L".to_string()),
                reference_range: Some("0.5 - 1.5".to_string()),
                status: "Normal".to_string(),
                flag: Flag::Green,
                visual_value: 50,
                interpretation: "Within range".to_string(),
            })
            .collect();
        ReportResult {
            results,
            explanation: Explanation {
                patient_summary: "ok".to_string(),
                doctor_summary: "ok".to_string(),
                recommendations_patient: vec![],
                correlations_doctor: vec![],
                confidence_score: 90.0,
            },
            disclaimer: "Not a diagnosis.".to_string(),
            is_mock: false,
        }
    }

    fn screen(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(draw).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_explanation_scrolls_to_last_result() {
        let report = panel_report(20);

        let top = screen(100, 40, |f| {
            render_explanation(f, f.area(), &report, Mode::Patient, 0);
        });
        assert!(top.contains("Analyte 01"));
        assert!(!top.contains("Analyte 20"));

        let bottom = screen(100, 40, |f| {
            render_explanation(f, f.area(), &report, Mode::Patient, 19);
        });
        assert!(bottom.contains("Analyte 20"));
        assert!(bottom.contains("(20 of 20)"));
    }

    #[test]
    fn test_clinical_table_follows_scroll() {
        let report = panel_report(20);

        let top = screen(100, 30, |f| render_clinical(f, f.area(), &report, Mode::Clinical, 0));
        assert!(!top.contains("Analyte 20"));

        let bottom = screen(100, 30, |f| {
            render_clinical(f, f.area(), &report, Mode::Clinical, 19);
        });
        assert!(bottom.contains("Analyte 20"));
    }

    #[test]
    fn test_bar_width_is_constant() {
        for v in [0u8, 1, 50, 99, 100] {
            assert_eq!(bar(v).chars().count(), BAR_WIDTH);
        }
        assert!(!bar(0).contains('█'));
        assert!(!bar(100).contains('░'));
    }
}
