//! Classifier port: Trait for the pre-trained heart disease model.
//!
//! This trait abstracts the model artifact and its evaluator from the
//! application logic. Implementations are loaded once and never mutated.

use crate::domain::FeatureVector;

/// Errors raised by a classifier implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model load failed: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for binary classifiers over the 13-slot feature vector.
///
/// Implementations provide:
/// - `predict`: class label 0 (no disease) or 1 (disease present), required
/// - `predict_proba`: `[p(class 0), p(class 1)]`, optional capability
pub trait Classifier: Send + Sync {
    /// Predict the class label.
    ///
    /// # Errors
    /// Returns `ClassifierError::Inference` if evaluation fails.
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError>;

    /// Predict class probabilities.
    ///
    /// Returns `Ok(None)` when the classifier has no probability interface.
    /// Implementations must not fabricate probabilities.
    ///
    /// # Errors
    /// Returns `ClassifierError::Inference` if evaluation fails.
    fn predict_proba(&self, _features: &FeatureVector) -> Result<Option<[f64; 2]>, ClassifierError> {
        Ok(None)
    }
}
