//! Prediction result types.
//!
//! Represents the output of the heart disease classifier after resolution.

use serde::{Deserialize, Serialize};

/// Binary risk classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Classifier class 0
    Low,
    /// Classifier class 1
    High,
}

impl RiskLabel {
    /// Map a classifier class to a label.
    ///
    /// Returns `None` for anything other than 0 or 1.
    #[must_use]
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }

    /// Label for a positive-class probability in [0, 1].
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.5 {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk of heart disease. Stay healthy!",
            Self::High => "High risk of heart disease detected",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Display band for the probability gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// [0, 50)
    Nominal,
    /// [50, 75)
    Elevated,
    /// [75, 100]
    Critical,
}

impl RiskBand {
    /// Band for a percentage in [0, 100].
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 50.0 {
            Self::Nominal
        } else if percentage < 75.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nominal => write!(f, "nominal"),
            Self::Elevated => write!(f, "elevated"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Resolved classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk_label: RiskLabel,

    /// Positive-class probability as a percentage in [0, 100], when the
    /// classifier exposes probabilities.
    pub probability: Option<f64>,

    /// Gauge band; present exactly when `probability` is.
    pub band: Option<RiskBand>,
}

impl PredictionResult {
    /// Result from a label-only classifier.
    #[must_use]
    pub fn from_label(risk_label: RiskLabel) -> Self {
        Self {
            risk_label,
            probability: None,
            band: None,
        }
    }

    /// Result from a positive-class probability in [0, 1].
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        let percentage = p * 100.0;
        Self {
            risk_label: RiskLabel::from_probability(p),
            probability: Some(percentage),
            band: Some(RiskBand::from_percentage(percentage)),
        }
    }
}

/// Most recent assessment held by a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RiskState {
    /// Nothing has been assessed in this session yet
    #[default]
    NoPredictionYet,
    Assessed(PredictionResult),
}

impl RiskState {
    #[must_use]
    pub fn label(&self) -> Option<RiskLabel> {
        match self {
            Self::NoPredictionYet => None,
            Self::Assessed(result) => Some(result.risk_label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskBand::from_percentage(49.9), RiskBand::Nominal);
        assert_eq!(RiskBand::from_percentage(50.0), RiskBand::Elevated);
        assert_eq!(RiskBand::from_percentage(74.9), RiskBand::Elevated);
        assert_eq!(RiskBand::from_percentage(75.0), RiskBand::Critical);
        assert_eq!(RiskBand::from_percentage(100.0), RiskBand::Critical);
        assert_eq!(RiskBand::from_percentage(0.0), RiskBand::Nominal);
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(RiskLabel::from_probability(0.5), RiskLabel::High);
        assert_eq!(RiskLabel::from_probability(0.4999), RiskLabel::Low);
        assert_eq!(RiskLabel::from_probability(1.0), RiskLabel::High);
        assert_eq!(RiskLabel::from_probability(0.0), RiskLabel::Low);
    }

    #[test]
    fn test_from_class() {
        assert_eq!(RiskLabel::from_class(0), Some(RiskLabel::Low));
        assert_eq!(RiskLabel::from_class(1), Some(RiskLabel::High));
        assert_eq!(RiskLabel::from_class(2), None);
    }

    #[test]
    fn test_probability_result_has_band() {
        let result = PredictionResult::from_probability(0.8);
        assert_eq!(result.risk_label, RiskLabel::High);
        assert_eq!(result.band, Some(RiskBand::Critical));
        assert!((result.probability.unwrap_or_default() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_only_result_has_no_probability() {
        let result = PredictionResult::from_label(RiskLabel::Low);
        assert!(result.probability.is_none());
        assert!(result.band.is_none());
    }

    #[test]
    fn test_default_state_is_unassessed() {
        assert_eq!(RiskState::default(), RiskState::NoPredictionYet);
        assert_eq!(RiskState::default().label(), None);
    }
}
