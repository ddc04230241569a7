//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
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

use crate::adapters::{ForestClassifier, ModelInfo};
use crate::application::{PredictionService, PredictionSession};
use crate::config::AppConfig;
use crate::CardioError;

use super::ui::{
    form::{render_patient_form, PatientFormState},
    home::{render_home, HomeView},
    render_disclaimer,
    result::{render_result, ResultState},
    tips::render_tips,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Predict,
    Result,
    Tips,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    service: PredictionService<ForestClassifier>,
    model_info: ModelInfo,

    /// Mode and last result for this run
    session: PredictionSession,

    form: PatientFormState,
    result: ResultState,
}

impl App {
    /// Load the classifier named by `config` and build the app around it.
    ///
    /// # Errors
    /// Returns `ClassifierUnavailable` if the model cannot be loaded or
    /// verified. The app never starts without a classifier.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model_path = config.model_path.as_path();
        if !model_path.exists() {
            return Err(anyhow!(CardioError::ClassifierUnavailable(format!(
                "model path not found at {}. Set CARDIOCHECK_MODEL_PATH to model.json or its directory.",
                model_path.display()
            ))));
        }

        let classifier = ForestClassifier::load(model_path, config.require_manifest)
            .map_err(|e| CardioError::ClassifierUnavailable(e.to_string()))?;

        let info = classifier.info();
        tracing::info!(
            "Classifier loaded: trees={}, voting={:?}, verified={}",
            info.trees,
            info.voting,
            info.verified
        );

        Ok(Self::with_dependencies(PredictionService::new(Arc::new(
            classifier,
        ))))
    }

    /// Create the application around an already-built service.
    #[must_use]
    pub fn with_dependencies(service: PredictionService<ForestClassifier>) -> Self {
        let session = PredictionSession::new();
        Self {
            screen: Screen::Home,
            should_quit: false,
            model_info: service.classifier().info(),
            service,
            form: PatientFormState::new(session.mode()),
            session,
            result: ResultState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

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
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];

                match self.screen {
                    Screen::Home => render_home(
                        f,
                        content_area,
                        &HomeView {
                            model: &self.model_info,
                            mode: self.session.mode(),
                            risk_state: self.session.risk_state(),
                        },
                    ),
                    Screen::Predict => render_patient_form(f, content_area, &self.form),
                    Screen::Result => render_result(f, content_area, &self.result),
                    Screen::Tips => render_tips(
                        f,
                        content_area,
                        self.session.last_label(),
                        self.session.health_tips(),
                    ),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows reports releases too
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
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key == KeyCode::F(2) {
            self.toggle_mode();
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Predict => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::Tips => self.handle_tips_key(key),
        }
    }

    /// Switch Smart/Expert. The form is rebuilt empty for the new mode.
    fn toggle_mode(&mut self) {
        self.session.toggle_mode();
        self.form.clear_sensitive();
        self.form = PatientFormState::new(self.session.mode());
        tracing::debug!("Input mode switched to {:?}", self.session.mode());
    }

    fn open_form(&mut self) {
        if self.form.mode != self.session.mode() {
            self.form = PatientFormState::new(self.session.mode());
        }
        self.screen = Screen::Predict;
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('p' | 'P' | 'n' | 'N') => self.open_form(),
            KeyCode::Char('t' | 'T') => self.screen = Screen::Tips,
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Home,
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form.next_field(),
            KeyCode::Left => self.form.cycle_choice(false),
            KeyCode::Right => self.form.cycle_choice(true),
            KeyCode::Char('s' | 'S') => self.form.load_sample_data(),
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        let unavailable = matches!(self.result, ResultState::Unavailable(_));
        match (unavailable, key) {
            (true, KeyCode::Enter) => self.screen = Screen::Predict,
            (_, KeyCode::Enter | KeyCode::Esc) => self.screen = Screen::Home,
            (_, KeyCode::Char('n' | 'N' | 'p' | 'P')) => self.open_form(),
            (_, KeyCode::Char('t' | 'T')) => self.screen = Screen::Tips,
            _ => {}
        }
    }

    fn handle_tips_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => self.screen = Screen::Home,
            KeyCode::Char('p' | 'P') => self.open_form(),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let answers = match self.form.to_answers() {
            Ok(answers) => answers,
            Err(e) => {
                self.form.error_message = Some(e);
                return;
            }
        };

        match self.service.predict(&answers) {
            Ok(result) => {
                self.session.record(result);
                self.result = ResultState::Complete(result);
                self.form.clear_sensitive();
                self.screen = Screen::Result;
            }
            // Stay on the form so the value can be corrected
            Err(CardioError::InvalidInput(message)) => {
                self.form.error_message = Some(message);
            }
            // Keep the answers so Enter on the result screen retries them
            Err(e) => {
                self.result = ResultState::Unavailable(e.to_string());
                self.screen = Screen::Result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::forest::{ExportedForest, ExportedTree, Voting};
    use crate::domain::{InputMode, RiskBand, RiskLabel, RiskState, FEATURE_NAMES};

    /// One stump on chest pain type: cp <= 1.5 is mostly healthy.
    fn app(voting: Voting) -> App {
        let classifier = ForestClassifier::from_exported(&ExportedForest {
            format_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            voting,
            trees: vec![ExportedTree {
                children_left: vec![1, -1, -1],
                children_right: vec![2, -1, -1],
                feature: vec![2, -2, -2],
                threshold: vec![1.5, -2.0, -2.0],
                value: vec![vec![0.0, 0.0], vec![90.0, 10.0], vec![20.0, 80.0]],
            }],
        })
        .unwrap();
        App::with_dependencies(PredictionService::new(Arc::new(classifier)))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_starts_on_home_without_prediction() {
        let app = app(Voting::Soft);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.session.mode(), InputMode::Smart);
        assert_eq!(*app.session.risk_state(), RiskState::NoPredictionYet);
        assert!(app.session.health_tips().is_empty());
    }

    #[test]
    fn test_expert_sample_predicts_high() {
        let mut app = app(Voting::Soft);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.form.mode, InputMode::Expert);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Result);
        let ResultState::Complete(result) = app.result else {
            panic!("expected a completed prediction");
        };
        assert_eq!(result.risk_label, RiskLabel::High);
        assert_eq!(result.band, Some(RiskBand::Critical));
        assert_eq!(app.session.last_label(), Some(RiskLabel::High));
        // Form buffers are wiped after a successful submit
        assert!(app.form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_smart_sample_with_hard_voting_has_no_probability() {
        let mut app = app(Voting::Hard);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);

        let ResultState::Complete(result) = app.result else {
            panic!("expected a completed prediction");
        };
        assert_eq!(result.risk_label, RiskLabel::Low);
        assert_eq!(result.probability, None);
        assert_eq!(result.band, None);
    }

    #[test]
    fn test_invalid_form_stays_on_form() {
        let mut app = app(Voting::Soft);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::Predict);
        assert!(app.form.error_message.is_some());
        assert_eq!(*app.session.risk_state(), RiskState::NoPredictionYet);
    }

    #[test]
    fn test_toggle_mode_rebuilds_form() {
        let mut app = app(Voting::Soft);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::F(2));

        assert_eq!(app.session.mode(), InputMode::Expert);
        assert_eq!(app.form.mode, InputMode::Expert);
        assert!(app.form.fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_unavailable_result_returns_to_form() {
        let mut app = app(Voting::Soft);
        app.result = ResultState::Unavailable("classifier error".to_string());
        app.screen = Screen::Result;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Predict);
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let mut app = app(Voting::Soft);
        app.screen = Screen::Predict;
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
