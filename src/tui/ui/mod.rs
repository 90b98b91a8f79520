//! UI module: one renderer per workflow step.

pub mod emergency;
pub mod history;
pub mod insights;
pub mod intro;
pub mod queue;
pub mod radar;
pub mod report;

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::projections::{action_plan, red_flags, RedFlags};
use crate::application::{WorkflowController, WorkflowError};
use crate::domain::{ReportResult, Step};
use crate::tui::input::PatientForm;
use crate::tui::styles::MedicalTheme;

/// Everything a frame needs, borrowed from the app for the duration of a draw.
pub struct ViewState<'a> {
    pub workflow: &'a WorkflowController,
    pub gateway: &'a str,
    pub upload_path: &'a str,
    pub history_path: Option<&'a str>,
    pub search_active: bool,
    pub patient_form: Option<&'a PatientForm>,
    pub queue_cursor: usize,
    /// First visible item on the scrollable report views
    pub scroll: usize,
    pub notice: Option<&'a str>,
    pub now: DateTime<Utc>,
}

/// Draw the whole screen.
pub fn render(f: &mut Frame, view: &ViewState) {
    let step = view.workflow.step();
    let banner_rows = match view.workflow.report() {
        Some(r) if step.requires_report() && r.is_mock => 3,
        Some(_) if step.requires_report() => 2,
        _ => 0,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Header
            Constraint::Min(0),              // Step content
            Constraint::Length(banner_rows), // Disclaimer banner
            Constraint::Length(3),           // Key hints
        ])
        .split(f.area());

    render_header(f, chunks[0], view);
    render_step(f, chunks[1], view);
    if banner_rows > 0 {
        if let Some(report) = view.workflow.report() {
            render_report_banner(f, chunks[2], report);
        }
    }
    render_footer(f, chunks[3], view);
}

fn render_step(f: &mut Frame, area: Rect, view: &ViewState) {
    let wf = view.workflow;
    match (wf.step(), wf.require_report()) {
        (Step::Welcome, _) => intro::render_welcome(f, area),
        (Step::Upload, _) => intro::render_upload(f, area, view),
        (Step::Overview, Ok(r)) => report::render_overview(f, area, r, wf.mode()),
        (Step::Explanation, Ok(r)) => {
            report::render_explanation(f, area, r, wf.mode(), view.scroll);
        }
        (Step::VisualInsights, Ok(r)) => insights::render_insights(f, area, r, wf),
        (Step::ClinicalView, Ok(r)) => {
            report::render_clinical(f, area, r, wf.mode(), view.scroll);
        }
        (Step::ActionPlan, Ok(r)) => report::render_action_plan(f, area, r, view.scroll),
        (Step::RiskRadar, _) => radar::render_radar(f, area, wf.radar()),
        (Step::ClinicalQueue, _) => queue::render_queue(f, area, view),
        (Step::Emergency, Ok(r)) => emergency::render_emergency(f, area, r, view.scroll),
        (Step::History, _) => history::render_history(f, area, view),
        (Step::Disclaimer, _) => intro::render_disclaimer(f, area, wf.report()),
        (_, Err(e)) => render_missing_report(f, area, &e),
    }
}

fn render_header(f: &mut Frame, area: Rect, view: &ViewState) {
    let step = view.workflow.step();
    let mode = view.workflow.mode();

    let dots: String = Step::ALL
        .iter()
        .map(|s| if *s == step { '●' } else { '○' })
        .collect();

    let mut spans = vec![
        Span::styled(" Medilens", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(step.title(), MedicalTheme::subtitle()),
        Span::styled(
            format!("  {}/{} ", step.index() + 1, Step::ALL.len()),
            MedicalTheme::text_muted(),
        ),
        Span::styled(dots, MedicalTheme::text_secondary()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(format!("{mode} view"), MedicalTheme::mode(mode)),
    ];
    if view.workflow.is_uploading() {
        spans.push(Span::styled(" │ ", MedicalTheme::text_muted()));
        spans.push(Span::styled("Analyzing…", MedicalTheme::warning()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

fn render_report_banner(f: &mut Frame, area: Rect, report: &ReportResult) {
    let mut lines = Vec::with_capacity(2);
    if report.is_mock {
        lines.push(Line::from(Span::styled(
            "PLACEHOLDER DATA: the analysis service answered with demo results, not your report.",
            MedicalTheme::warning(),
        )));
    }
    lines.push(Line::from(Span::styled(
        report.disclaimer.as_str(),
        MedicalTheme::text_muted(),
    )));

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_missing_report(f: &mut Frame, area: Rect, err: &WorkflowError) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No report analyzed yet", MedicalTheme::title())),
        Line::from(""),
        Line::from(Span::styled(err.to_string(), MedicalTheme::text_secondary())),
        Line::from(vec![
            Span::styled("Press ", MedicalTheme::text_muted()),
            Span::styled("[F2]", MedicalTheme::key_hint()),
            Span::styled(" to upload a lab report.", MedicalTheme::text_muted()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(content, area);
}

fn render_footer(f: &mut Frame, area: Rect, view: &ViewState) {
    let upload_error = view
        .workflow
        .error()
        .filter(|_| view.workflow.step() != Step::Upload);
    let content = if let Some(notice) = view.notice {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::warning()),
            Span::styled(notice, MedicalTheme::warning()),
        ])
    } else if let Some(error) = upload_error {
        // Upload failures land wherever the user is; keep them visible
        // until dismissed on the upload view.
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(error, MedicalTheme::danger()),
            Span::styled("  [F2] ", MedicalTheme::key_hint()),
            Span::styled("Review upload", MedicalTheme::key_desc()),
        ])
    } else {
        let mut spans = Vec::new();
        for (key, desc) in step_hints(view) {
            spans.push(Span::styled(format!("[{key}] "), MedicalTheme::key_hint()));
            spans.push(Span::styled(format!("{desc}  "), MedicalTheme::key_desc()));
        }
        for (key, desc) in [("Tab/⇧Tab", "Next/Back"), ("F1-F12", "Jump"), ("^Q", "Quit")] {
            spans.push(Span::styled(format!("[{key}] "), MedicalTheme::key_hint()));
            spans.push(Span::styled(format!("{desc}  "), MedicalTheme::key_desc()));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(footer, area);
}

fn step_hints(view: &ViewState) -> Vec<(&'static str, &'static str)> {
    match view.workflow.step() {
        Step::Welcome => vec![("1", "Patient"), ("2", "Clinical")],
        Step::Upload => vec![("Enter", "Analyze"), ("Esc", "Clear")],
        Step::Overview => vec![("E", "Emergency"), ("M", "Mode"), ("I/R/H", "Insights/Radar/History")],
        Step::VisualInsights => vec![("V", "Inspect"), ("M", "Mode")],
        Step::RiskRadar => vec![("type", "Symptoms"), ("Esc", "Clear")],
        Step::ClinicalQueue if view.patient_form.is_some() => {
            vec![("Tab", "Field"), ("Enter", "Add"), ("Esc", "Cancel")]
        }
        Step::ClinicalQueue if view.search_active => vec![("Enter/Esc", "Done")],
        Step::ClinicalQueue => vec![
            ("/", "Search"),
            ("F", "Filter"),
            ("X", "Clear"),
            ("↑↓", "Move"),
            ("Enter", "Snapshot"),
            ("A", "Add"),
        ],
        Step::History if view.history_path.is_some() => vec![("Enter", "Add"), ("Esc", "Cancel")],
        Step::History => vec![("U", "Upload past report")],
        Step::Disclaimer => vec![("Enter", "Start over")],
        Step::Explanation | Step::ClinicalView | Step::ActionPlan | Step::Emergency => {
            vec![("↑↓/PgUp/PgDn", "Scroll"), ("M", "Mode"), ("O", "Overview")]
        }
    }
}

/// A bordered block with the standard subtitle style.
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border())
}

/// Highest scroll offset for `step`: one less than the number of items the
/// view lists, 0 for views that do not scroll.
pub(crate) fn scroll_limit(step: Step, report: Option<&ReportResult>) -> usize {
    let Some(report) = report else {
        return 0;
    };
    let items = match step {
        Step::Explanation | Step::ClinicalView => report.results.len(),
        Step::ActionPlan => action_plan(&report.explanation).len(),
        Step::Emergency => match red_flags(report) {
            RedFlags::Present(found) => found.len(),
            RedFlags::NoneDetected => 0,
        },
        _ => 0,
    };
    items.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Explanation, Flag, TestResult};

    fn report(flags: &[Flag]) -> ReportResult {
        ReportResult {
            results: flags
                .iter()
                .enumerate()
                .map(|(i, flag)| TestResult {
                    test_name: format!("Test {i}"),
                    value: "1".to_string(),
                    unit: None,
                    reference_range: None,
                    status: "s".to_string(),
                    flag: *flag,
                    visual_value: 50,
                    interpretation: "i".to_string(),
                })
                .collect(),
            explanation: Explanation {
                patient_summary: "p".to_string(),
                doctor_summary: "d".to_string(),
                recommendations_patient: vec!["a".to_string(), "b".to_string()],
                correlations_doctor: vec![],
                confidence_score: 50.0,
            },
            disclaimer: "Not a diagnosis.".to_string(),
            is_mock: false,
        }
    }

    #[test]
    fn test_scroll_limit_per_view() {
        let r = report(&[Flag::Red, Flag::Green, Flag::Red, Flag::Yellow]);

        assert_eq!(scroll_limit(Step::Explanation, Some(&r)), 3);
        assert_eq!(scroll_limit(Step::ClinicalView, Some(&r)), 3);
        assert_eq!(scroll_limit(Step::ActionPlan, Some(&r)), 1);
        assert_eq!(scroll_limit(Step::Emergency, Some(&r)), 1);
        assert_eq!(scroll_limit(Step::Overview, Some(&r)), 0);
        assert_eq!(scroll_limit(Step::Explanation, None), 0);

        let calm = report(&[Flag::Green]);
        assert_eq!(scroll_limit(Step::Emergency, Some(&calm)), 0);
    }
}
