//! UI module: View components for the TUI.

pub mod form;
pub mod home;
pub mod result;
pub mod tips;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: This tool gives an indicative screening result and does not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Smart Mode estimates clinical values from lifestyle answers and is less precise than Expert Mode.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One `[key] description` pair for footers and action lists.
fn key_hint<'a>(key: &'a str, desc: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, MedicalTheme::key_hint()),
        Span::styled(desc, MedicalTheme::key_desc()),
    ]
}

fn footer_block() -> Block<'static> {
    Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border())
}

fn header_block() -> Block<'static> {
    Block::default()
        .borders(Borders::BOTTOM)
        .border_style(MedicalTheme::border())
}
