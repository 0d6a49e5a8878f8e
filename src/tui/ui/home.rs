//! Home view: Pick an assessment.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Render the home screen.
pub fn render_home(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Welcome
            Constraint::Min(0),    // Assessments
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_welcome(f, chunks[1]);
    render_assessments(f, chunks[2]);
    render_key_hints(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ♥ ", MedicalTheme::focused()),
        Span::styled("Heart Health Predictor", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Cardiovascular Risk Assessment", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_welcome(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Welcome to Heart Health Predictor & Arrhythmia Classifier",
            MedicalTheme::title(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Cardiovascular risk assessment tools to help you understand your heart health. \
             Choose one of the assessments below.",
            MedicalTheme::text_secondary(),
        )),
    ];

    let p = Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_assessments(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    render_card(
        f,
        chunks[0],
        "C",
        " Coronary Artery Disease (CAD) Predictor ",
        "Enter demographic and clinical lab values to assess your risk of coronary artery disease. \
         Get immediate results with personalized recommendations.",
        "Start CAD Assessment",
    );
    render_card(
        f,
        chunks[1],
        "A",
        " Arrhythmia Probability Classifier ",
        "Enter ECG features to estimate your probability across 15 arrhythmia classes.",
        "Start Arrhythmia Analysis",
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    key: &str,
    title: &str,
    description: &str,
    action: &str,
) {
    let text = vec![
        Line::from(Span::styled(description, MedicalTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
            Span::styled(action, MedicalTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(title, MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_key_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(Line::from(vec![
        Span::styled(" [C] ", MedicalTheme::key_hint()),
        Span::styled("CAD ", MedicalTheme::key_desc()),
        Span::styled("[A] ", MedicalTheme::key_hint()),
        Span::styled("Arrhythmia ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]));
    f.render_widget(hints, area);
}
