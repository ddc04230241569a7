//! Feature vector for heart-disease risk prediction.
//!
//! Based on the UCI Heart Disease (Cleveland) attribute set. The classifier
//! reads features by position, so order here is part of the model contract.

use serde::Serialize;

use crate::CardioError;

/// Number of features the classifier expects.
pub const FEATURE_COUNT: usize = 13;

/// Canonical feature names, in classifier order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Allowed values for one feature slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    /// Whole numbers in `min..=max`
    Integer { min: i64, max: i64 },
    /// Real numbers in `min..=max`
    Real { min: f64, max: f64 },
}

impl FieldDomain {
    /// Whether `value` lies in this domain. Non-finite values never do.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            Self::Integer { min, max } => {
                value.fract() == 0.0 && value >= min as f64 && value <= max as f64
            }
            Self::Real { min, max } => (min..=max).contains(&value),
        }
    }
}

impl std::fmt::Display for FieldDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer { min, max } => write!(f, "integer [{min}, {max}]"),
            Self::Real { min, max } => write!(f, "[{min:.1}, {max:.1}]"),
        }
    }
}

/// One slot of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    Sex,
    ChestPainType,
    RestingBloodPressure,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

impl Feature {
    /// All features in classifier order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Self::Age,
        Self::Sex,
        Self::ChestPainType,
        Self::RestingBloodPressure,
        Self::Cholesterol,
        Self::FastingBloodSugar,
        Self::RestingEcg,
        Self::MaxHeartRate,
        Self::ExerciseAngina,
        Self::StDepression,
        Self::StSlope,
        Self::MajorVessels,
        Self::Thalassemia,
    ];

    /// Position in the feature vector.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short column name used by the model artifact.
    #[must_use]
    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::RestingBloodPressure => "Resting Blood Pressure",
            Self::Cholesterol => "Serum Cholesterol",
            Self::FastingBloodSugar => "Fasting Blood Sugar > 120",
            Self::RestingEcg => "Resting ECG",
            Self::MaxHeartRate => "Max Heart Rate",
            Self::ExerciseAngina => "Exercise Induced Angina",
            Self::StDepression => "ST Depression",
            Self::StSlope => "ST Slope",
            Self::MajorVessels => "Major Vessels",
            Self::Thalassemia => "Thalassemia",
        }
    }

    /// Allowed values for this slot.
    #[must_use]
    pub fn domain(self) -> FieldDomain {
        use FieldDomain::{Integer, Real};
        match self {
            Self::Age => Integer { min: 18, max: 100 },
            Self::Sex | Self::FastingBloodSugar | Self::ExerciseAngina => Integer { min: 0, max: 1 },
            Self::ChestPainType | Self::MajorVessels | Self::Thalassemia => {
                Integer { min: 0, max: 3 }
            }
            Self::RestingBloodPressure => Integer { min: 80, max: 200 },
            Self::Cholesterol => Integer { min: 100, max: 600 },
            Self::RestingEcg | Self::StSlope => Integer { min: 0, max: 2 },
            Self::MaxHeartRate => Integer { min: 60, max: 220 },
            Self::StDepression => Real { min: 0.0, max: 10.0 },
        }
    }
}

/// Ordered, validated feature vector.
///
/// Only constructible through validating constructors: the length is always
/// [`FEATURE_COUNT`] and every value lies in its [`FieldDomain`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector from raw values.
    ///
    /// # Errors
    /// Returns `CardioError::InvalidInput` listing every violation if the
    /// length is not 13 or any value is outside its domain.
    pub fn from_slice(values: &[f64]) -> Result<Self, CardioError> {
        Self::validate(values).map_err(|errors| CardioError::InvalidInput(errors.join(", ")))?;

        let mut out = [0.0; FEATURE_COUNT];
        out.copy_from_slice(values);
        Ok(Self(out))
    }

    /// Check raw values against the feature contract.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(values: &[f64]) -> Result<(), Vec<String>> {
        if values.len() != FEATURE_COUNT {
            return Err(vec![format!(
                "Expected {FEATURE_COUNT} features, got {}",
                values.len()
            )]);
        }

        let errors: Vec<String> = Feature::ALL
            .iter()
            .zip(values)
            .filter(|(feature, value)| !feature.domain().contains(**value))
            .map(|(feature, value)| {
                format!(
                    "{} {} out of range {}",
                    feature.label(),
                    value,
                    feature.domain()
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: [f64; 13] = [
        40.0, 1.0, 2.0, 120.0, 200.0, 0.0, 1.0, 150.0, 0.0, 1.0, 1.0, 0.0, 2.0,
    ];

    #[test]
    fn test_from_slice_keeps_order() {
        let v = FeatureVector::from_slice(&SCENARIO_A).expect("Should be valid");
        assert_eq!(v.as_slice(), &SCENARIO_A);
        assert!((v.get(Feature::Cholesterol) - 200.0).abs() < f64::EPSILON);
        assert!((v.get(Feature::StDepression) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = FeatureVector::from_slice(&SCENARIO_A[..12]).unwrap_err();
        assert!(matches!(err, CardioError::InvalidInput(_)));
        assert!(err.to_string().contains("Expected 13 features, got 12"));
    }

    #[test]
    fn test_out_of_domain_values_rejected() {
        let mut values = SCENARIO_A;
        values[0] = 17.0; // age
        values[3] = 201.0; // trestbps
        values[9] = 10.5; // oldpeak

        let errors = FeatureVector::validate(&values).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Age"));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut values = SCENARIO_A;
        values[11] = 1.5; // ca
        assert!(FeatureVector::from_slice(&values).is_err());

        // oldpeak is the only real-valued slot
        values[11] = 0.0;
        values[9] = 2.3;
        assert!(FeatureVector::from_slice(&values).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut values = SCENARIO_A;
        values[9] = f64::NAN;
        assert!(FeatureVector::from_slice(&values).is_err());
    }

    #[test]
    fn test_boundaries_inclusive() {
        let domain = Feature::StDepression.domain();
        assert!(domain.contains(0.0));
        assert!(domain.contains(10.0));
        assert!(Feature::Age.domain().contains(100.0));
        assert!(!Feature::Age.domain().contains(101.0));
    }

    #[test]
    fn test_feature_names_follow_enum_order() {
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
        }
        assert_eq!(Feature::Thalassemia.name(), "thal");
    }
}
