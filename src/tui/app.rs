//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Scorer integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::ChaChaNoise;
use crate::application::{ArrhythmiaScorer, CadRiskScorer};
use crate::domain::{ArrhythmiaResult, CadResult};
use crate::HeartwiseError;

use super::ui::{
    form::{render_form, FormState},
    home::render_home,
    render_disclaimer,
    results::{render_arrhythmia_result, render_cad_result},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    CadForm,
    CadResult,
    ArrhythmiaForm,
    ArrhythmiaResult,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    cad_scorer: CadRiskScorer<ChaChaNoise>,
    arrhythmia_scorer: ArrhythmiaScorer,

    cad_form: FormState,
    arrhythmia_form: FormState,

    cad_result: Option<CadResult>,
    arrhythmia_result: Option<ArrhythmiaResult>,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// Noise is seeded from `HEARTWISE_NOISE_SEED` when set, otherwise from
    /// OS entropy. For more control, use `with_dependencies()`.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn new() -> Result<Self> {
        let noise = Arc::new(ChaChaNoise::from_env_or_default());
        Self::with_dependencies(CadRiskScorer::new(noise), ArrhythmiaScorer::new())
    }

    /// Create application with injected scorers.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn with_dependencies(
        cad_scorer: CadRiskScorer<ChaChaNoise>,
        arrhythmia_scorer: ArrhythmiaScorer,
    ) -> Result<Self> {
        Ok(Self {
            screen: Screen::Home,
            should_quit: false,
            cad_scorer,
            arrhythmia_scorer,
            cad_form: FormState::cad(),
            arrhythmia_form: FormState::arrhythmia(),
            cad_result: None,
            arrhythmia_result: None,
        })
    }

    /// Screen currently shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Wipe before restoring the terminal, which can fail and return early.
        self.wipe_all();

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Home => render_home(f, content_area),
                    Screen::CadForm => render_form(f, content_area, &self.cad_form),
                    Screen::ArrhythmiaForm => {
                        render_form(f, content_area, &self.arrhythmia_form)
                    }
                    Screen::CadResult => match &self.cad_result {
                        Some(result) => render_cad_result(f, content_area, result),
                        None => render_form(f, content_area, &self.cad_form),
                    },
                    Screen::ArrhythmiaResult => match &self.arrhythmia_result {
                        Some(result) => render_arrhythmia_result(f, content_area, result),
                        None => render_form(f, content_area, &self.arrhythmia_form),
                    },
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::CadForm | Screen::ArrhythmiaForm => self.handle_form_key(key),
            Screen::CadResult | Screen::ArrhythmiaResult => self.handle_result_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.screen = Screen::CadForm;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.screen = Screen::ArrhythmiaForm;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn active_form(&mut self) -> &mut FormState {
        match self.screen {
            Screen::ArrhythmiaForm | Screen::ArrhythmiaResult => &mut self.arrhythmia_form,
            Screen::Home | Screen::CadForm | Screen::CadResult => &mut self.cad_form,
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.go_home(),
            KeyCode::Up => self.active_form().prev_field(),
            KeyCode::Down | KeyCode::Tab => self.active_form().next_field(),
            KeyCode::Left => self.active_form().cycle_choice(false),
            KeyCode::Right => self.active_form().cycle_choice(true),
            KeyCode::Char('s') | KeyCode::Char('S') => self.active_form().load_sample_data(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.active_form().reset(),
            KeyCode::Char(c) => self.active_form().input_char(c),
            KeyCode::Backspace => self.active_form().delete_char(),
            KeyCode::Delete => self.active_form().clear_field(),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.active_form().reset();
                match self.screen {
                    Screen::CadResult => {
                        self.cad_result = None;
                        self.screen = Screen::CadForm;
                    }
                    Screen::ArrhythmiaResult => {
                        self.arrhythmia_result = None;
                        self.screen = Screen::ArrhythmiaForm;
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => self.go_home(),
            _ => {}
        }
    }

    /// Zeroize both forms and drop any results.
    fn wipe_all(&mut self) {
        self.cad_form.values.wipe();
        self.arrhythmia_form.values.wipe();
        self.cad_form.errors.clear();
        self.arrhythmia_form.errors.clear();
        self.cad_result = None;
        self.arrhythmia_result = None;
    }

    /// Return to the home screen, wiping any entered values and results.
    fn go_home(&mut self) {
        self.cad_form.reset();
        self.arrhythmia_form.reset();
        self.cad_result = None;
        self.arrhythmia_result = None;
        self.screen = Screen::Home;
    }

    fn submit(&mut self) {
        match self.screen {
            Screen::CadForm => match self.cad_scorer.assess(&self.cad_form.values) {
                Ok(result) => {
                    self.cad_form.errors.clear();
                    self.cad_result = Some(result);
                    self.screen = Screen::CadResult;
                }
                Err(e) => self.cad_form.errors = error_lines(e),
            },
            Screen::ArrhythmiaForm => {
                match self.arrhythmia_scorer.assess(&self.arrhythmia_form.values) {
                    Ok(result) => {
                        self.arrhythmia_form.errors.clear();
                        self.arrhythmia_result = Some(result);
                        self.screen = Screen::ArrhythmiaResult;
                    }
                    Err(e) => self.arrhythmia_form.errors = error_lines(e),
                }
            }
            _ => {}
        }
    }
}

/// Turn a failed assessment into lines for the form footer.
fn error_lines(err: HeartwiseError) -> Vec<String> {
    match err {
        HeartwiseError::Validation(e) => e.messages,
        other => {
            tracing::error!("Assessment failed: {}", other);
            vec![other.to_string()]
        }
    }
}
