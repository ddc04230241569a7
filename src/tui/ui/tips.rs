//! Health tips view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::RiskLabel;
use crate::tui::styles::MedicalTheme;

use super::{footer_block, header_block, key_hint, result::render_tip_list};

/// Render tips for the session's last label, or a prompt when there is none.
pub fn render_tips(f: &mut Frame, area: Rect, label: Option<RiskLabel>, tips: &[&str]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let mut title = vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Health Tips", MedicalTheme::title()),
    ];
    if let Some(label) = label {
        title.push(Span::styled(" │ for ", MedicalTheme::text_muted()));
        title.push(Span::styled(
            format!("{label} RISK"),
            MedicalTheme::risk_label(label),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(title)).block(header_block()),
        chunks[0],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    if tips.is_empty() {
        let p = Paragraph::new(Span::styled(
            "Run a prediction first. Press [P] to open the form.",
            MedicalTheme::text_muted(),
        ))
        .alignment(Alignment::Center);
        f.render_widget(p, inner);
    } else {
        render_tip_list(f, inner, tips);
    }

    let footer: Vec<Span> = [("[P] ", "Predict "), ("[Esc] ", "Home")]
        .into_iter()
        .flat_map(|(key, desc)| key_hint(key, desc))
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(footer)).block(footer_block()),
        chunks[2],
    );
}
