//! Assessment result views.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{AdvisoryIcon, ArrhythmiaResult, CadResult};
use crate::tui::styles::MedicalTheme;

/// Width of the class-name column in the distribution chart.
const CLASS_NAME_WIDTH: u16 = 34;

/// Render a CAD risk result.
pub fn render_cad_result(f: &mut Frame, area: Rect, result: &CadResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "CAD Risk Predictor", "Prediction Result");
    render_cad_content(f, chunks[1], result);
    render_footer(f, chunks[2]);
}

fn render_cad_content(f: &mut Frame, area: Rect, result: &CadResult) {
    let outcome_style = MedicalTheme::cad_outcome(result.has_cad);
    let block = Block::default()
        .title(Span::styled(" Prediction Result ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(outcome_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Presence
            Constraint::Length(3), // Probability
            Constraint::Length(3), // Advice
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let presence = Paragraph::new(Line::from(vec![
        Span::styled("Presence of CAD: ", MedicalTheme::text_secondary()),
        Span::styled(
            if result.has_cad { "Yes" } else { "No" },
            outcome_style.add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(presence, chunks[0]);

    let probability = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " Predicted Probability ",
                    MedicalTheme::text_secondary(),
                ))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(outcome_style)
        .percent(percent(result.probability))
        .label(format!("{:.0}%", result.probability));
    f.render_widget(probability, chunks[1]);

    let advice = Paragraph::new(Line::from(Span::styled(
        result.advice(),
        MedicalTheme::text(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(advice, chunks[2]);
}

/// Render an arrhythmia classification result.
pub fn render_arrhythmia_result(f: &mut Frame, area: Rect, result: &ArrhythmiaResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Advisory
            Constraint::Min(0),    // Distribution
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        "Arrhythmia Probability Classifier",
        "Classification Result",
    );
    render_advisory(f, chunks[1], result);
    render_distribution(f, chunks[2], result);
    render_footer(f, chunks[3]);
}

fn render_advisory(f: &mut Frame, area: Rect, result: &ArrhythmiaResult) {
    let style = MedicalTheme::advisory(result.icon);
    let icon = match result.icon {
        AdvisoryIcon::Normal => "OK",
        AdvisoryIcon::Warning => "!",
        AdvisoryIcon::Info => "i",
    };

    let text = vec![
        Line::from(vec![
            Span::styled(format!("{icon} "), style.add_modifier(Modifier::BOLD)),
            Span::styled("Most likely: ", MedicalTheme::text_secondary()),
            Span::styled(
                result.most_likely.class.name(),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({:.1}%)", result.most_likely.probability),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(result.message.as_str(), MedicalTheme::text())),
    ];

    let p = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Advisory ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(style),
        );
    f.render_widget(p, area);
}

fn render_distribution(f: &mut Frame, area: Rect, result: &ArrhythmiaResult) {
    let block = Block::default()
        .title(Span::styled(
            " Probability Distribution ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            result
                .probabilities
                .iter()
                .map(|_| Constraint::Length(1))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (entry, row) in result.probabilities.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CLASS_NAME_WIDTH), Constraint::Min(0)])
            .split(*row);

        let style = if entry.class == result.most_likely.class {
            MedicalTheme::advisory(result.icon)
        } else {
            MedicalTheme::info()
        };

        f.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", entry.class.name()),
                MedicalTheme::text_secondary(),
            )),
            cols[0],
        );
        f.render_widget(
            Gauge::default()
                .gauge_style(style)
                .percent(percent(entry.probability))
                .label(format!("{:.1}%", entry.probability)),
            cols[1],
        );
    }
}

fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title, MedicalTheme::title()),
        Span::styled(format!(" │ {subtitle}"), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn footer_hints() -> Line<'static> {
    Line::from(vec![
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Restart Assessment ", MedicalTheme::key_desc()),
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Clear & Re-enter ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Home", MedicalTheme::key_desc()),
    ])
}

fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(footer_hints()).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

/// Gauge percent for a probability already expressed in percent.
fn percent(probability: f64) -> u16 {
    probability.round().clamp(0.0, 100.0) as u16
}
