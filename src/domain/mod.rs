//! Domain layer: Core business types and logic.
//!
//! This module contains plain Rust types with no I/O. Feature vectors are
//! validated on construction; answers are typed enums, never display strings.

mod answers;
mod features;
mod prediction;
mod tips;

pub use answers::{
    ChestPainFrequency, ClinicalAnswers, ExerciseHabit, FatigueFrequency, InputMode,
    ParseAnswerError, PatientAnswers, Sex, SmokingFrequency, SurveyAnswers,
};
pub use features::{Feature, FeatureVector, FieldDomain, FEATURE_COUNT, FEATURE_NAMES};
pub use prediction::{PredictionResult, RiskBand, RiskLabel, RiskState};
pub use tips::health_tips;
