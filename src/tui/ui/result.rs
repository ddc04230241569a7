//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{health_tips, PredictionResult};
use crate::tui::styles::MedicalTheme;

use super::{footer_block, header_block, key_hint};

/// Outcome of the last submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultState {
    #[default]
    Idle,
    Complete(PredictionResult),
    /// The classifier failed; the detail is shown under the notice
    Unavailable(String),
}

pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Risk Assessment", MedicalTheme::title()),
    ]))
    .block(header_block());
    f.render_widget(header, chunks[0]);

    match state {
        ResultState::Idle => {
            let p = Paragraph::new(Span::styled(
                "No prediction yet. Press [N] to fill in the form.",
                MedicalTheme::text_muted(),
            ))
            .alignment(Alignment::Center);
            f.render_widget(p, chunks[1]);
        }
        ResultState::Complete(result) => render_complete(f, chunks[1], result),
        ResultState::Unavailable(message) => render_unavailable(f, chunks[1], message),
    }

    render_result_footer(f, chunks[2], state);
}

fn render_complete(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Label
            Constraint::Length(3), // Probability
            Constraint::Min(0),    // Tips
        ])
        .margin(1)
        .split(inner);

    let label_style = MedicalTheme::risk_label(result.risk_label);
    let label = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} RISK", result.risk_label),
            label_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            result.risk_label.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[0]);

    match (result.probability, result.band) {
        (Some(percentage), Some(band)) => {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(Span::styled(
                            " Estimated Probability ",
                            MedicalTheme::text_secondary(),
                        ))
                        .borders(Borders::ALL)
                        .border_style(MedicalTheme::border()),
                )
                .gauge_style(MedicalTheme::risk_band(band))
                .percent(percentage.clamp(0.0, 100.0).round() as u16)
                .label(format!("{percentage:.1}%"));
            f.render_widget(gauge, chunks[1]);
        }
        _ => {
            let note = Paragraph::new(Span::styled(
                "This classifier reports a label only; no probability available.",
                MedicalTheme::text_muted(),
            ))
            .alignment(Alignment::Center);
            f.render_widget(note, chunks[1]);
        }
    }

    render_tip_list(f, chunks[2], health_tips(result.risk_label));
}

/// Bulleted tip list shared with the tips screen.
pub(super) fn render_tip_list(f: &mut Frame, area: Rect, tips: &[&str]) {
    let mut lines = vec![Line::from(Span::styled(
        "Health tips",
        MedicalTheme::subtitle(),
    ))];
    lines.extend(
        tips.iter()
            .map(|tip| Line::from(Span::styled(format!("  • {tip}"), MedicalTheme::text()))),
    );

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_unavailable(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "! Prediction unavailable, try again",
            MedicalTheme::danger(),
        )),
        Line::from(""),
        Line::from(Span::styled(message, MedicalTheme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let hints: &[(&str, &str)] = match state {
        ResultState::Unavailable(_) => &[("[Enter] ", "Back to form "), ("[Esc] ", "Home")],
        _ => &[
            ("[Enter] ", "Home "),
            ("[N] ", "New Prediction "),
            ("[T] ", "Health Tips"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|&(key, desc)| key_hint(key, desc))
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)).block(footer_block()), area);
}
