//! Feature assembler: answers to the classifier's feature vector.
//!
//! Expert Mode copies clinical fields slot for slot. Smart Mode expands a
//! handful of lifestyle answers through a fixed heuristic table.

use crate::domain::{
    ChestPainFrequency, ClinicalAnswers, ExerciseHabit, FatigueFrequency, FeatureVector,
    PatientAnswers, SmokingFrequency, SurveyAnswers, FEATURE_COUNT,
};
use crate::CardioError;

// Smart Mode derivations.
const CHOL_OVERWEIGHT: f64 = 250.0;
const CHOL_NORMAL: f64 = 180.0;
const TRESTBPS_OVERWEIGHT: f64 = 145.0;
const TRESTBPS_NORMAL: f64 = 120.0;
const THALACH_ACTIVE: f64 = 170.0;
const THALACH_INACTIVE: f64 = 140.0;
const OLDPEAK_FREQUENT_PAIN: f64 = 2.0;
const OLDPEAK_DEFAULT: f64 = 0.5;

// Smart Mode fixed slots.
const RESTECG_FIXED: f64 = 1.0;
const SLOPE_FIXED: f64 = 1.0;
const CA_FIXED: f64 = 0.0;
const THAL_FIXED: f64 = 2.0;

/// Pure mapping from either questionnaire to a validated [`FeatureVector`].
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Assemble the feature vector for the given answers.
    ///
    /// The answers' variant selects the derivation policy.
    ///
    /// # Errors
    /// Returns `CardioError::InvalidInput` if any resulting value falls
    /// outside its feature domain (e.g. age 17 from a programmatic caller).
    pub fn assemble(answers: &PatientAnswers) -> Result<FeatureVector, CardioError> {
        tracing::debug!("Assembling features (mode={:?})", answers.mode());

        let values = match answers {
            PatientAnswers::Survey(survey) => Self::from_survey(survey),
            PatientAnswers::Clinical(clinical) => Self::from_clinical(clinical),
        };

        FeatureVector::from_slice(&values)
    }

    fn from_clinical(a: &ClinicalAnswers) -> [f64; FEATURE_COUNT] {
        [
            f64::from(a.age),
            a.sex.code(),
            f64::from(a.chest_pain_type),
            f64::from(a.resting_bp),
            f64::from(a.cholesterol),
            f64::from(a.fasting_blood_sugar),
            f64::from(a.resting_ecg),
            f64::from(a.max_heart_rate),
            f64::from(a.exercise_angina),
            a.st_depression,
            f64::from(a.st_slope),
            f64::from(a.major_vessels),
            f64::from(a.thalassemia),
        ]
    }

    fn from_survey(a: &SurveyAnswers) -> [f64; FEATURE_COUNT] {
        let cp = match a.chest_pain {
            ChestPainFrequency::Often => 2.0,
            ChestPainFrequency::Sometimes => 1.0,
            ChestPainFrequency::No => 0.0,
        };
        let fbs = match a.smoking {
            SmokingFrequency::Regularly => 1.0,
            SmokingFrequency::Occasionally | SmokingFrequency::Never => 0.0,
        };
        let exang = match a.fatigue {
            FatigueFrequency::Yes => 1.0,
            FatigueFrequency::Sometimes | FatigueFrequency::No => 0.0,
        };
        let (chol, trestbps) = if a.overweight {
            (CHOL_OVERWEIGHT, TRESTBPS_OVERWEIGHT)
        } else {
            (CHOL_NORMAL, TRESTBPS_NORMAL)
        };
        let thalach = match a.exercise {
            ExerciseHabit::Yes => THALACH_ACTIVE,
            ExerciseHabit::No => THALACH_INACTIVE,
        };
        let oldpeak = match a.chest_pain {
            ChestPainFrequency::Often => OLDPEAK_FREQUENT_PAIN,
            ChestPainFrequency::Sometimes | ChestPainFrequency::No => OLDPEAK_DEFAULT,
        };

        [
            f64::from(a.age),
            a.gender.code(),
            cp,
            trestbps,
            chol,
            fbs,
            RESTECG_FIXED,
            thalach,
            exang,
            oldpeak,
            SLOPE_FIXED,
            CA_FIXED,
            THAL_FIXED,
        ]
    }
}
