//! Per-session prediction context.
//!
//! Holds the selected input mode and the latest assessment for one user
//! session. Nothing here is shared between sessions.

use crate::domain::{health_tips, InputMode, PredictionResult, RiskLabel, RiskState};

#[derive(Debug, Clone)]
pub struct PredictionSession {
    mode: InputMode,
    state: RiskState,
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionSession {
    /// New session in Smart Mode with nothing assessed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: InputMode::Smart,
            state: RiskState::NoPredictionYet,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Replace the latest assessment.
    pub fn record(&mut self, result: PredictionResult) {
        self.state = RiskState::Assessed(result);
    }

    #[must_use]
    pub fn risk_state(&self) -> &RiskState {
        &self.state
    }

    #[must_use]
    pub fn last_label(&self) -> Option<RiskLabel> {
        self.state.label()
    }

    /// Tips for the latest assessment; empty until one exists.
    #[must_use]
    pub fn health_tips(&self) -> &'static [&'static str] {
        self.last_label().map(health_tips).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_tips() {
        let session = PredictionSession::new();
        assert_eq!(session.risk_state(), &RiskState::NoPredictionYet);
        assert!(session.health_tips().is_empty());
        assert_eq!(session.mode(), InputMode::Smart);
    }

    #[test]
    fn test_record_updates_tips() {
        let mut session = PredictionSession::new();
        session.record(PredictionResult::from_label(RiskLabel::High));
        assert_eq!(session.last_label(), Some(RiskLabel::High));
        assert_eq!(session.health_tips(), health_tips(RiskLabel::High));

        session.record(PredictionResult::from_probability(0.2));
        assert_eq!(session.last_label(), Some(RiskLabel::Low));
        assert_eq!(session.health_tips(), health_tips(RiskLabel::Low));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = PredictionSession::new();
        let b = PredictionSession::new();
        a.record(PredictionResult::from_label(RiskLabel::High));
        a.toggle_mode();
        assert_eq!(b.last_label(), None);
        assert_eq!(b.mode(), InputMode::Smart);
        assert_eq!(a.mode(), InputMode::Expert);
    }
}
