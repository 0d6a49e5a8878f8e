//! Assessment input form, rendered from a field schema.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{
    FieldKind, FieldSpec, FormValues, ARRHYTHMIA_FIELDS, ARRHYTHMIA_SAMPLE, CAD_FIELDS, CAD_SAMPLE,
};
use crate::tui::styles::MedicalTheme;

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 24;

/// Editable form state for one assessment.
pub struct FormState {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub values: FormValues,
    pub selected: usize,
    /// Validation messages from the last submission
    pub errors: Vec<String>,
    sample: &'static [(&'static str, &'static str)],
    columns: u16,
}

impl FormState {
    /// CAD risk form with default values.
    #[must_use]
    pub fn cad() -> Self {
        Self {
            title: "CAD Risk Predictor",
            subtitle: "Coronary Artery Disease Risk Assessment",
            values: FormValues::with_defaults(&CAD_FIELDS),
            selected: 0,
            errors: Vec::new(),
            sample: &CAD_SAMPLE,
            columns: 2,
        }
    }

    /// Arrhythmia form with default values.
    #[must_use]
    pub fn arrhythmia() -> Self {
        Self {
            title: "Arrhythmia Probability Classifier",
            subtitle: "ECG Features Across 15 Classes",
            values: FormValues::with_defaults(&ARRHYTHMIA_FIELDS),
            selected: 0,
            errors: Vec::new(),
            sample: &ARRHYTHMIA_SAMPLE,
            columns: 3,
        }
    }

    fn spec(&self) -> Option<&'static FieldSpec> {
        self.values.schema().get(self.selected)
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.values.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = self.values.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Type a character into the current field.
    ///
    /// Numeric fields accept digits, `.` and `-`; categorical fields accept a
    /// character matching one of their option values.
    pub fn input_char(&mut self, c: char) {
        let Some(spec) = self.spec() else {
            return;
        };

        match spec.kind {
            FieldKind::Choice { options } => {
                let mut buf = [0u8; 4];
                let typed: &str = c.encode_utf8(&mut buf);
                if options.iter().any(|o| o.value == typed) {
                    self.values.replace_at(self.selected, typed);
                }
            }
            FieldKind::Bounded { .. } | FieldKind::Unbounded => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.values.push_at(self.selected, c);
                }
            }
        }
    }

    /// Cycle the current categorical field through its options.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(spec) = self.spec() else {
            return;
        };
        let FieldKind::Choice { options } = spec.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let current = self
            .values
            .value_at(self.selected)
            .and_then(|value| options.iter().position(|o| o.value == value));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        self.values.replace_at(self.selected, options[next].value);
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.values.pop_at(self.selected);
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.values.clear_at(self.selected);
    }

    /// Fill the form with the built-in sample patient.
    pub fn load_sample_data(&mut self) {
        self.values.reset();
        for (key, value) in self.sample {
            self.values.set(key, *value);
        }
        self.errors.clear();
    }

    /// Wipe entered values and restore defaults.
    pub fn reset(&mut self) {
        self.values.reset();
        self.errors.clear();
        self.selected = 0;
    }
}

/// Render an assessment form.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let footer_height = if state.errors.is_empty() {
        3
    } else {
        (state.errors.len() as u16 + 3).min(area.height / 2)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Form
            Constraint::Length(footer_height), // Footer/errors
        ])
        .split(area);

    render_form_header(f, chunks[0], state);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, state: &FormState) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(state.title, MedicalTheme::title()),
        Span::styled(format!(" │ {}", state.subtitle), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = usize::from(state.columns.max(1));
    let constraints: Vec<Constraint> = (0..columns)
        .map(|_| Constraint::Ratio(1, columns as u32))
        .collect();

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let per_column = state.values.len().div_ceil(columns);
    let schema = state.values.schema();

    for (col, column_area) in areas.iter().enumerate() {
        let start = col * per_column;
        let end = (start + per_column).min(schema.len());
        if start >= end {
            continue;
        }

        let lines: Vec<Line> = (start..end)
            .map(|i| field_line(&schema[i], state.values.value_at(i).unwrap_or_default(), i == state.selected))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if (start..end).contains(&state.selected) {
                MedicalTheme::border_focused()
            } else {
                MedicalTheme::border()
            });

        f.render_widget(Paragraph::new(lines).block(block), *column_area);
    }
}

fn field_line<'a>(spec: &'a FieldSpec, value: &'a str, selected: bool) -> Line<'a> {
    let label_style = if selected {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    };

    let value_span = if value.is_empty() {
        Span::styled(spec.hint, MedicalTheme::text_muted())
    } else {
        match spec.kind {
            FieldKind::Choice { options } => {
                let label = options
                    .iter()
                    .find(|o| o.value == value)
                    .map_or(value, |o| o.label);
                Span::styled(label, MedicalTheme::text())
            }
            FieldKind::Bounded { .. } | FieldKind::Unbounded => {
                Span::styled(value, MedicalTheme::text())
            }
        }
    };

    let marker = if selected { "▸ " } else { "  " };
    Line::from(vec![
        Span::styled(marker, MedicalTheme::focused()),
        Span::styled(format!("{:<width$}", spec.label, width = LABEL_WIDTH), label_style),
        value_span,
        if selected {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ])
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content: Vec<Line> = if state.errors.is_empty() {
        let mut hints = vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
        ];
        if matches!(state.spec().map(|s| s.kind), Some(FieldKind::Choice { .. })) {
            hints.push(Span::styled("[←→] ", MedicalTheme::key_hint()));
            hints.push(Span::styled("Select ", MedicalTheme::key_desc()));
        }
        hints.extend([
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Predict ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Reset ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Back", MedicalTheme::key_desc()),
        ]);
        vec![Line::from(hints)]
    } else {
        std::iter::once(Line::from(Span::styled(
            "Please correct the following errors:",
            MedicalTheme::warning(),
        )))
        .chain(state.errors.iter().map(|err| {
            Line::from(vec![
                Span::styled("! ", MedicalTheme::danger()),
                Span::styled(err.as_str(), MedicalTheme::danger()),
            ])
        }))
        .collect()
    };

    let footer = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut form = FormState::cad();
        form.prev_field();
        assert_eq!(form.selected, CAD_FIELDS.len() - 1);
        form.next_field();
        assert_eq!(form.selected, 0);
    }

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut form = FormState::cad();
        form.clear_field();
        for c in "6x5.".chars() {
            form.input_char(c);
        }
        assert_eq!(form.values.get("age"), Some("65."));
        form.delete_char();
        assert_eq!(form.values.get("age"), Some("65"));
    }

    #[test]
    fn test_choice_input_and_cycling() {
        let mut form = FormState::cad();
        form.next_field(); // sex
        form.input_char('7');
        assert_eq!(form.values.get("sex"), Some(""));
        form.input_char('1');
        assert_eq!(form.values.get("sex"), Some("1"));

        form.cycle_choice(true);
        assert_eq!(form.values.get("sex"), Some("0"));
        form.cycle_choice(false);
        assert_eq!(form.values.get("sex"), Some("1"));

        form.clear_field();
        form.cycle_choice(false);
        assert_eq!(form.values.get("sex"), Some("1"));
    }

    #[test]
    fn test_cycling_ignores_numeric_fields() {
        let mut form = FormState::cad();
        form.cycle_choice(true);
        assert_eq!(form.values.get("age"), Some("50"));
    }

    #[test]
    fn test_sample_data_is_valid() {
        let mut cad = FormState::cad();
        cad.load_sample_data();
        assert!(cad.values.validate().is_empty());

        let mut arrhythmia = FormState::arrhythmia();
        arrhythmia.load_sample_data();
        assert!(arrhythmia.values.validate().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FormState::arrhythmia();
        form.load_sample_data();
        form.errors.push("x".into());
        form.selected = 4;

        form.reset();
        assert_eq!(form.values.get("heart_rate"), Some("75"));
        assert_eq!(form.values.get("sex"), Some(""));
        assert!(form.errors.is_empty());
        assert_eq!(form.selected, 0);
    }
}
