//! Visual insights: demo trend chart and the inspectable report preview.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::application::projections::{highlight_markers, trend_series, TrendSeries};
use crate::application::{UploadPreview, WorkflowController};
use crate::domain::ReportResult;
use crate::ports::PreviewKind;
use crate::tui::styles::MedicalTheme;

pub fn render_insights(f: &mut Frame, area: Rect, report: &ReportResult, wf: &WorkflowController) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    match trend_series(&report.results) {
        Some(series) => render_trend(f, chunks[0], &series),
        None => f.render_widget(
            Paragraph::new("No results to chart.")
                .style(MedicalTheme::text_muted())
                .block(panel("Trend")),
            chunks[0],
        ),
    }

    render_preview(f, chunks[1], report, wf);
}

fn render_trend(f: &mut Frame, area: Rect, series: &TrendSeries) {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let (lo, hi) = series
        .points
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
    let pad = ((hi - lo) * 0.2).max(1.0);
    let (y_min, y_max) = (lo - pad, hi + pad);

    let dataset = Dataset::default()
        .name(series.test_name.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(MedicalTheme::info())
        .data(&points);

    let x_labels: Vec<Span> = series
        .points
        .iter()
        .map(|p| Span::styled(p.label.as_str(), MedicalTheme::text_muted()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(panel(&format!("{} trend (illustrative)", series.test_name)))
        .x_axis(
            Axis::default()
                .style(MedicalTheme::border())
                .bounds([0.0, (points.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(MedicalTheme::border())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), MedicalTheme::text_muted()),
                    Span::styled(format!("{y_max:.0}"), MedicalTheme::text_muted()),
                ]),
        );
    f.render_widget(chart, area);
}

fn render_preview(f: &mut Frame, area: Rect, report: &ReportResult, wf: &WorkflowController) {
    let block = panel("Visual Highlighting");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(preview) = wf.preview() else {
        f.render_widget(
            Paragraph::new("No local preview for this report.")
                .style(MedicalTheme::text_muted())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };

    if !wf.is_inspecting() {
        f.render_widget(
            Paragraph::new(vec![
                Line::from(preview_label(preview)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[V] ", MedicalTheme::key_hint()),
                    Span::styled("Inspect abnormal regions", MedicalTheme::key_desc()),
                ]),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    if wf.is_scanning() {
        f.render_widget(
            Paragraph::new(Span::styled("Scanning report…", MedicalTheme::warning()))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    f.render_widget(
        Paragraph::new(Span::styled("SCAN COMPLETE", MedicalTheme::success())),
        Rect { height: 1, ..inner },
    );

    for marker in highlight_markers(&report.results) {
        let x = inner.x + u16::from(marker.left_pct) * inner.width / 100;
        let y = inner.y + u16::from(marker.top_pct) * inner.height / 100;
        let width = inner.right().saturating_sub(x);
        if width == 0 || y >= inner.bottom() {
            continue;
        }
        let label = Span::styled(
            format!("● {}", marker.test_name),
            MedicalTheme::flag(marker.flag),
        );
        f.render_widget(Paragraph::new(label), Rect::new(x, y, width, 1));
    }
}

fn preview_label(preview: &UploadPreview) -> Span<'_> {
    let kind = match preview.kind {
        PreviewKind::Image => "Image",
        PreviewKind::Pdf => "PDF",
    };
    Span::styled(
        format!("{kind}: {}", preview.file_name),
        MedicalTheme::text_secondary(),
    )
}
