//! UI module: View components for the TUI.

pub mod form;
pub mod home;
pub mod results;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("Medical Disclaimer: ", MedicalTheme::warning()),
        Span::styled(
            "These tools are for educational and informational purposes only. \
             They are not intended to replace professional medical advice, diagnosis, or treatment. \
             Always consult with a qualified healthcare provider regarding any medical concerns.",
            MedicalTheme::text_muted(),
        ),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
