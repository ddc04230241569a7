//! Prediction service: Orchestrates one risk assessment.
//!
//! This service coordinates:
//! - Feature assembly from form answers
//! - Classifier invocation and result resolution

use std::sync::Arc;

use super::assembler::FeatureAssembler;
use super::resolver::RiskResolver;
use crate::domain::{PatientAnswers, PredictionResult};
use crate::ports::Classifier;
use crate::CardioError;

/// Service for running a prediction from form answers.
///
/// Stateless per request. The classifier is shared read-only; the caller
/// keeps the returned result in its own session.
pub struct PredictionService<C: Classifier> {
    classifier: Arc<C>,
    resolver: RiskResolver<C>,
}

impl<C: Classifier> PredictionService<C> {
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self {
            resolver: RiskResolver::new(classifier.clone()),
            classifier,
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &Arc<C> {
        &self.classifier
    }

    /// Run the full pipeline:
    /// 1. Assemble the feature vector (rejects out-of-domain input)
    /// 2. Resolve it against the classifier
    ///
    /// # Errors
    /// Returns `InvalidInput` before the classifier is called, or
    /// `InferenceFailure` if the classifier fails.
    pub fn predict(&self, answers: &PatientAnswers) -> Result<PredictionResult, CardioError> {
        let mode = answers.mode();
        // The error text carries the raw values; it goes to the form only.
        let features = FeatureAssembler::assemble(answers).map_err(|e| {
            tracing::warn!("Rejected {:?} answers: value outside its clinical range", mode);
            e
        })?;

        let result = self.resolver.resolve(&features).map_err(|e| {
            tracing::error!("Prediction unavailable: {}", e);
            e
        })?;

        match (result.probability, result.band) {
            (Some(p), Some(band)) => tracing::info!(
                "Prediction complete: mode={:?}, label={}, probability={:.1}%, band={}",
                mode,
                result.risk_label,
                p,
                band
            ),
            _ => tracing::info!(
                "Prediction complete: mode={:?}, label={} (label-only classifier)",
                mode,
                result.risk_label
            ),
        }

        Ok(result)
    }
}
