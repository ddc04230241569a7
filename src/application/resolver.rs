//! Risk resolver: classifier output to a [`PredictionResult`].

use std::sync::Arc;

use crate::domain::{FeatureVector, PredictionResult, RiskLabel};
use crate::ports::Classifier;
use crate::CardioError;

/// Allowed drift of `p0 + p1` from 1.
const PROBA_SUM_TOLERANCE: f64 = 1e-6;

/// Turns classifier output into a label, and a band when probabilities exist.
pub struct RiskResolver<C: Classifier> {
    classifier: Arc<C>,
}

impl<C: Classifier> RiskResolver<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Resolve a feature vector against the classifier.
    ///
    /// Prefers the probability interface; falls back to the label interface
    /// when the classifier has none.
    ///
    /// # Errors
    /// Returns `CardioError::InferenceFailure` if the classifier fails or
    /// returns a label other than 0/1 or an invalid probability pair.
    pub fn resolve(&self, features: &FeatureVector) -> Result<PredictionResult, CardioError> {
        let proba = self
            .classifier
            .predict_proba(features)
            .map_err(|e| CardioError::InferenceFailure(e.to_string()))?;

        if let Some(proba) = proba {
            let p1 = Self::check_proba(proba)?;
            return Ok(PredictionResult::from_probability(p1));
        }

        let class = self
            .classifier
            .predict(features)
            .map_err(|e| CardioError::InferenceFailure(e.to_string()))?;
        let label = RiskLabel::from_class(class).ok_or_else(|| {
            CardioError::InferenceFailure(format!("classifier returned unknown class {class}"))
        })?;

        Ok(PredictionResult::from_label(label))
    }

    /// Validate `[p0, p1]` and return the positive-class probability.
    fn check_proba(proba: [f64; 2]) -> Result<f64, CardioError> {
        let [p0, p1] = proba;
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_unit(p0) || !in_unit(p1) || (p0 + p1 - 1.0).abs() > PROBA_SUM_TOLERANCE {
            return Err(CardioError::InferenceFailure(format!(
                "classifier returned invalid probabilities [{p0}, {p1}]"
            )));
        }
        Ok(p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskBand;
    use crate::ports::ClassifierError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Label-only stub.
    struct FixedLabel(u8);

    impl Classifier for FixedLabel {
        fn predict(&self, _: &FeatureVector) -> Result<u8, ClassifierError> {
            Ok(self.0)
        }
    }

    /// Probability stub; `predict` must never be called.
    struct FixedProba(f64);

    impl Classifier for FixedProba {
        fn predict(&self, _: &FeatureVector) -> Result<u8, ClassifierError> {
            Err(ClassifierError::Inference("label interface not expected".into()))
        }

        fn predict_proba(&self, _: &FeatureVector) -> Result<Option<[f64; 2]>, ClassifierError> {
            Ok(Some([1.0 - self.0, self.0]))
        }
    }

    struct Failing {
        calls: AtomicUsize,
    }

    impl Classifier for Failing {
        fn predict(&self, _: &FeatureVector) -> Result<u8, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ClassifierError::Inference("model crashed".into()))
        }
    }

    struct RawProba([f64; 2]);

    impl Classifier for RawProba {
        fn predict(&self, _: &FeatureVector) -> Result<u8, ClassifierError> {
            Ok(0)
        }

        fn predict_proba(&self, _: &FeatureVector) -> Result<Option<[f64; 2]>, ClassifierError> {
            Ok(Some(self.0))
        }
    }

    fn features() -> FeatureVector {
        FeatureVector::from_slice(&[
            40.0, 1.0, 2.0, 120.0, 200.0, 0.0, 1.0, 150.0, 0.0, 1.0, 1.0, 0.0, 2.0,
        ])
        .expect("valid vector")
    }

    fn resolve_with<C: Classifier>(classifier: C) -> Result<PredictionResult, CardioError> {
        RiskResolver::new(Arc::new(classifier)).resolve(&features())
    }

    #[test]
    fn test_label_one_is_high() {
        let result = resolve_with(FixedLabel(1)).expect("Should resolve");
        assert_eq!(result.risk_label, RiskLabel::High);
    }

    #[test]
    fn test_label_only_has_no_probability() {
        let result = resolve_with(FixedLabel(0)).expect("Should resolve");
        assert_eq!(result.risk_label, RiskLabel::Low);
        assert!(result.probability.is_none());
        assert!(result.band.is_none());
    }

    #[test]
    fn test_unknown_class_is_failure() {
        let err = resolve_with(FixedLabel(3)).unwrap_err();
        assert!(matches!(err, CardioError::InferenceFailure(_)));
    }

    #[test]
    fn test_probability_threshold() {
        for (p, expected) in [
            (0.0, RiskLabel::Low),
            (0.3, RiskLabel::Low),
            (0.4999, RiskLabel::Low),
            (0.5, RiskLabel::High),
            (0.51, RiskLabel::High),
            (1.0, RiskLabel::High),
        ] {
            let result = resolve_with(FixedProba(p)).expect("Should resolve");
            assert_eq!(result.risk_label, expected, "p = {p}");
        }
    }

    #[test]
    fn test_probability_banding() {
        let result = resolve_with(FixedProba(0.62)).expect("Should resolve");
        assert_eq!(result.band, Some(RiskBand::Elevated));
        assert!((result.probability.unwrap_or_default() - 62.0).abs() < 1e-9);

        let result = resolve_with(FixedProba(0.75)).expect("Should resolve");
        assert_eq!(result.band, Some(RiskBand::Critical));

        let result = resolve_with(FixedProba(0.1)).expect("Should resolve");
        assert_eq!(result.band, Some(RiskBand::Nominal));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = RiskResolver::new(Arc::new(FixedProba(0.7)));
        let v = features();
        assert_eq!(
            resolver.resolve(&v).expect("first"),
            resolver.resolve(&v).expect("second")
        );
    }

    #[test]
    fn test_classifier_error_is_not_retried() {
        let classifier = Arc::new(Failing {
            calls: AtomicUsize::new(0),
        });
        let resolver = RiskResolver::new(classifier.clone());

        let err = resolver.resolve(&features()).unwrap_err();
        assert!(matches!(err, CardioError::InferenceFailure(_)));
        assert!(err.to_string().contains("model crashed"));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_malformed_probabilities_rejected() {
        for proba in [[0.2, 0.2], [-0.1, 1.1], [f64::NAN, 0.5], [0.0, 1.5]] {
            let err = resolve_with(RawProba(proba)).unwrap_err();
            assert!(matches!(err, CardioError::InferenceFailure(_)), "{proba:?}");
        }
    }
}
