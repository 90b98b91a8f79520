//! Welcome, upload and disclaimer screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{panel, ViewState};
use crate::domain::{Mode, ReportResult, DEFAULT_DISCLAIMER};
use crate::ports::PreviewKind;
use crate::tui::styles::{MedicalTheme, LOGO};

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Logo
            Constraint::Length(7), // Mode cards
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let mut logo: Vec<Line> = LOGO
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| Line::from(Span::styled(l, MedicalTheme::subtitle())))
        .collect();
    logo.push(Line::from(Span::styled(
        "Lab reports, explained.",
        MedicalTheme::text_secondary(),
    )));
    f.render_widget(Paragraph::new(logo).alignment(Alignment::Center), chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let mode_card = |key: &'static str, mode: Mode, blurb: &'static str| {
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                Span::styled(format!("{mode} Mode"), MedicalTheme::mode(mode)),
            ]),
            Line::from(""),
            Line::from(Span::styled(blurb, MedicalTheme::text_secondary())),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::mode(mode)),
        )
    };

    f.render_widget(
        mode_card(
            "1",
            Mode::Patient,
            "Understand your health in simple terms, get action plans, and track trends.",
        ),
        cards[0],
    );
    f.render_widget(
        mode_card(
            "2",
            Mode::Clinical,
            "High-precision medical terminology, risk flags, and suggested investigations.",
        ),
        cards[1],
    );
}

pub fn render_upload(f: &mut Frame, area: Rect, view: &ViewState) {
    let wf = view.workflow;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Intro
            Constraint::Length(3), // Path input
            Constraint::Min(0),    // Status
        ])
        .margin(1)
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled("Upload Your Reports", MedicalTheme::title())),
        Line::from(Span::styled(
            "Type the path of a PDF, JPEG or PNG lab report (max 10MB) and press Enter.",
            MedicalTheme::text_secondary(),
        )),
    ]);
    f.render_widget(intro, chunks[0]);

    let border = if wf.is_uploading() {
        MedicalTheme::border()
    } else {
        MedicalTheme::border_focused()
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        if view.upload_path.is_empty() {
            Span::styled("/path/to/report.pdf", MedicalTheme::text_muted())
        } else {
            Span::styled(view.upload_path, MedicalTheme::text())
        },
        Span::styled("▌", MedicalTheme::focused()),
    ]))
    .block(
        Block::default()
            .title(Span::styled(" Report file ", MedicalTheme::focused()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(input, chunks[1]);

    let mut status = Vec::new();
    if wf.is_uploading() {
        status.push(Line::from(Span::styled(
            "AI is reading your report...",
            MedicalTheme::warning(),
        )));
    }
    if let Some(error) = wf.error() {
        status.push(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(error, MedicalTheme::danger()),
        ]));
        status.push(Line::from(Span::styled(
            "Press Esc to dismiss, or fix the path and press Enter to retry.",
            MedicalTheme::text_muted(),
        )));
    }
    if let Some(preview) = wf.preview() {
        let kind = match preview.kind {
            PreviewKind::Image => "image",
            PreviewKind::Pdf => "PDF",
        };
        status.push(Line::from(""));
        status.push(Line::from(vec![
            Span::styled("Preview: ", MedicalTheme::text_secondary()),
            Span::styled(preview.file_name.as_str(), MedicalTheme::text()),
            Span::styled(
                format!(" ({kind}, {} KB)", preview.size.div_ceil(1024)),
                MedicalTheme::text_muted(),
            ),
        ]));
    }
    status.push(Line::from(""));
    status.push(Line::from(vec![
        Span::styled("Analysis service: ", MedicalTheme::text_secondary()),
        Span::styled(view.gateway, MedicalTheme::info()),
    ]));

    f.render_widget(
        Paragraph::new(status)
            .wrap(Wrap { trim: true })
            .block(panel("Status")),
        chunks[2],
    );
}

pub fn render_disclaimer(f: &mut Frame, area: Rect, report: Option<&ReportResult>) {
    let disclaimer = report.map_or(DEFAULT_DISCLAIMER, |r| r.disclaimer.as_str());

    let lines = vec![
        Line::from(Span::styled("Your Health, Secured.", MedicalTheme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("AI Disclaimer  ", MedicalTheme::subtitle()),
            Span::styled(
                "AI insights are for education, not diagnosis.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Data Privacy   ", MedicalTheme::subtitle()),
            Span::styled(
                "Reports are sent only to the configured analysis service and kept in memory for this session.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Medical Disclaimer", MedicalTheme::warning())),
        Line::from(Span::styled(
            "This tool uses Artificial Intelligence to interpret laboratory results. It should NOT be used as a substitute for professional medical advice, diagnosis, or treatment. Always seek the advice of your physician or other qualified health provider with any questions you may have regarding a medical condition.",
            MedicalTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(disclaimer, MedicalTheme::text_muted())),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Trust & Disclaimer")),
        area,
    );
}
