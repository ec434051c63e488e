//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Calculator service integration

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::CalculatorService;

use super::ui::{
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    Result,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Calculator for the current patient
    calculator: CalculatorService,

    /// Patient form state
    patient_form_state: PatientFormState,

    /// Result screen state
    result_state: ResultState,
}

impl Default for App {
    fn default() -> Self {
        Self::with_calculator(CalculatorService::new())
    }
}

impl App {
    /// Create a new application with a fresh calculator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an application around an existing calculator.
    #[must_use]
    pub fn with_calculator(calculator: CalculatorService) -> Self {
        let patient_form_state = PatientFormState::new(calculator.model());
        Self {
            screen: Screen::PatientForm,
            should_quit: false,
            calculator,
            patient_form_state,
            result_state: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::PatientForm => {
                        render_patient_form(f, chunks[0], &self.patient_form_state)
                    }
                    Screen::Result => render_result(f, chunks[0], &self.result_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows reports both press and release
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
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.reset(),
                _ => {}
            }
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => {
                self.patient_form_state.cycle_option(false);
            }
            KeyCode::Right => {
                self.patient_form_state.cycle_option(true);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.patient_form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.screen = Screen::PatientForm;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let mut input = self.patient_form_state.to_input();
        let outcome = self.calculator.submit(&input);
        input.clear_sensitive();

        match outcome {
            Ok(estimate) => {
                self.patient_form_state.error_message = None;
                self.result_state = ResultState::Complete {
                    estimate,
                    summary: self.calculator.model().record().to_string(),
                };
                self.screen = Screen::Result;
            }
            Err(e) => {
                self.patient_form_state.error_message = Some(e.user_message());
            }
        }
    }

    /// Discard the current patient: fresh model, empty form, no result.
    fn reset(&mut self) {
        self.calculator.reset();
        self.patient_form_state.clear_sensitive();
        self.result_state = ResultState::Idle;
        self.screen = Screen::PatientForm;
    }
}
