//! Home view: model status, last assessment and dataset notes.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::adapters::ModelInfo;
use crate::domain::{InputMode, RiskState, FEATURE_NAMES};
use crate::tui::styles::MedicalTheme;

use super::{header_block, key_hint};

/// Everything the home screen shows, borrowed from the app for one frame.
pub struct HomeView<'a> {
    pub model: &'a ModelInfo,
    pub mode: InputMode,
    pub risk_state: &'a RiskState,
}

/// Render the home view.
pub fn render_home(f: &mut Frame, area: Rect, view: &HomeView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_status_panels(f, columns[0], view);
    render_about(f, columns[1]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Cardiocheck", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Heart Disease Risk Screening", MedicalTheme::text_secondary()),
    ]))
    .block(header_block());

    f.render_widget(header, area);
}

fn render_status_panels(f: &mut Frame, area: Rect, view: &HomeView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Model status
            Constraint::Length(4), // Last assessment
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let model = view.model;
    let output = if model.supports_proba() {
        "probability + label"
    } else {
        "label only"
    };
    let status_items = vec![
        format_status_item("Model loaded", true),
        format_status_item("Manifest verified", model.verified),
        Line::from(vec![
            Span::styled("  Trees: ", MedicalTheme::text_secondary()),
            Span::styled(model.trees.to_string(), MedicalTheme::text()),
            Span::styled("  Output: ", MedicalTheme::text_secondary()),
            Span::styled(output, MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Source: ", MedicalTheme::text_secondary()),
            Span::styled(model.source.display().to_string(), MedicalTheme::text_muted()),
        ]),
        Line::from(vec![
            Span::styled("  Mode: ", MedicalTheme::text_secondary()),
            Span::styled(mode_name(view.mode), MedicalTheme::text()),
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" Classifier ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(status_items).block(status_block), chunks[0]);

    let last = match view.risk_state {
        RiskState::NoPredictionYet => Line::from(Span::styled(
            "  No prediction yet",
            MedicalTheme::text_muted(),
        )),
        RiskState::Assessed(result) => {
            let mut spans = vec![
                Span::styled("  ", MedicalTheme::text()),
                Span::styled(
                    format!("{} RISK", result.risk_label),
                    MedicalTheme::risk_label(result.risk_label),
                ),
            ];
            if let Some(p) = result.probability {
                spans.push(Span::styled(format!("  {p:.1}%"), MedicalTheme::text()));
            }
            Line::from(spans)
        }
    };
    let last_block = Block::default()
        .title(Span::styled(" Last Assessment ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(last).block(last_block), chunks[1]);

    let actions: Vec<Line> = [
        ("[P] ", "Predict"),
        ("[F2] ", "Switch Smart/Expert"),
        ("[T] ", "Health Tips"),
        ("[Q] ", "Quit"),
    ]
    .into_iter()
    .map(|(key, desc)| Line::from(key_hint(key, desc).to_vec()))
    .collect();

    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);
}

fn mode_name(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Smart => "Smart (lifestyle questions)",
        InputMode::Expert => "Expert (clinical values)",
    }
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", MedicalTheme::success())
    } else {
        ("--", MedicalTheme::warning())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), MedicalTheme::text()),
    ])
}

fn render_about(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" About / Dataset ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let lines = vec![
        Line::from(Span::styled(
            "Predicts heart-disease risk from 13 clinical attributes of the UCI Heart Disease (Cleveland) dataset.",
            MedicalTheme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Expert Mode: ", MedicalTheme::focused()),
            Span::styled(
                "enter the clinical measurements directly.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Smart Mode: ", MedicalTheme::focused()),
            Span::styled(
                "answer lifestyle questions; blood pressure, cholesterol, heart rate and ECG values are estimated.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Features:", MedicalTheme::text_secondary())),
        Line::from(Span::styled(
            format!("  {}", FEATURE_NAMES.join(", ")),
            MedicalTheme::text_muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A probability of 50% or more is reported as HIGH risk.",
            MedicalTheme::text_muted(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
