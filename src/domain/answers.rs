//! Form answers for the two input modes.
//!
//! Categorical answers are decided once at the form boundary into the enums
//! below. Each enum carries a stable identifier (`Display`/`FromStr`) that is
//! independent of any display text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which questionnaire produced the answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Simplified lifestyle questionnaire
    Smart,
    /// Direct clinical measurements
    Expert,
}

impl InputMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Smart => Self::Expert,
            Self::Expert => Self::Smart,
        }
    }
}

/// Error returned when parsing an answer identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseAnswerError {
    kind: &'static str,
    value: String,
}

/// Implements `Display`/`FromStr` over fixed lowercase identifiers.
macro_rules! answer_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $id:literal),+ $(,)? }) => {
        impl $name {
            #[must_use]
            pub fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $name {
            type Err = ParseAnswerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($id => Ok(Self::$variant),)+
                    _ => Err(ParseAnswerError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Feature encoding: Male = 1, Female = 0.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }
}

answer_enum!(Sex, "sex", { Male => "male", Female => "female" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingFrequency {
    Never,
    Occasionally,
    Regularly,
}

answer_enum!(SmokingFrequency, "smoking", {
    Never => "never",
    Occasionally => "occasionally",
    Regularly => "regularly",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseHabit {
    No,
    Yes,
}

answer_enum!(ExerciseHabit, "exercise", { No => "no", Yes => "yes" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainFrequency {
    No,
    Sometimes,
    Often,
}

answer_enum!(ChestPainFrequency, "chest pain", {
    No => "no",
    Sometimes => "sometimes",
    Often => "often",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatigueFrequency {
    No,
    Sometimes,
    Yes,
}

answer_enum!(FatigueFrequency, "fatigue", {
    No => "no",
    Sometimes => "sometimes",
    Yes => "yes",
});

/// Smart Mode: lifestyle questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnswers {
    /// Age in years (18-100)
    pub age: u32,
    pub gender: Sex,
    pub smoking: SmokingFrequency,
    pub exercise: ExerciseHabit,
    pub chest_pain: ChestPainFrequency,
    /// Unusual tiredness during exertion
    pub fatigue: FatigueFrequency,
    pub overweight: bool,
}

/// Expert Mode: clinical measurements, one per feature slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalAnswers {
    /// Age in years (18-100)
    pub age: u32,
    pub sex: Sex,
    /// Chest pain type (0-3)
    pub chest_pain_type: u8,
    /// Resting blood pressure in mmHg (80-200)
    pub resting_bp: u32,
    /// Serum cholesterol in mg/dl (100-600)
    pub cholesterol: u32,
    /// Fasting blood sugar > 120 mg/dl: 0 = no, 1 = yes
    pub fasting_blood_sugar: u8,
    /// Resting ECG result (0-2)
    pub resting_ecg: u8,
    /// Maximum heart rate achieved (60-220)
    pub max_heart_rate: u32,
    /// Exercise induced angina: 0 = no, 1 = yes
    pub exercise_angina: u8,
    /// ST depression induced by exercise (0.0-10.0)
    pub st_depression: f64,
    /// Slope of peak exercise ST segment (0-2)
    pub st_slope: u8,
    /// Number of major vessels colored by fluoroscopy (0-3)
    pub major_vessels: u8,
    /// Thalassemia category (0-3)
    pub thalassemia: u8,
}

/// Answers from either questionnaire. The variant is the input mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatientAnswers {
    Survey(SurveyAnswers),
    Clinical(ClinicalAnswers),
}

impl PatientAnswers {
    #[must_use]
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Survey(_) => InputMode::Smart,
            Self::Clinical(_) => InputMode::Expert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stable_identifiers() {
        assert_eq!("male".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!(
            "REGULARLY".parse::<SmokingFrequency>(),
            Ok(SmokingFrequency::Regularly)
        );
        assert_eq!(
            "often".parse::<ChestPainFrequency>(),
            Ok(ChestPainFrequency::Often)
        );
    }

    #[test]
    fn test_parse_rejects_display_text() {
        // Localized labels are never decision inputs.
        assert!("पुरुष".parse::<Sex>().is_err());
        let err = "maybe".parse::<ExerciseHabit>().unwrap_err();
        assert_eq!(err.to_string(), "unknown exercise value: \"maybe\"");
    }

    #[test]
    fn test_display_round_trips_ids() {
        for f in [
            FatigueFrequency::No,
            FatigueFrequency::Sometimes,
            FatigueFrequency::Yes,
        ] {
            assert_eq!(f.to_string().parse::<FatigueFrequency>(), Ok(f));
        }
    }

    #[test]
    fn test_mode_follows_variant() {
        let survey = PatientAnswers::Survey(SurveyAnswers {
            age: 50,
            gender: Sex::Female,
            smoking: SmokingFrequency::Never,
            exercise: ExerciseHabit::Yes,
            chest_pain: ChestPainFrequency::No,
            fatigue: FatigueFrequency::No,
            overweight: false,
        });
        assert_eq!(survey.mode(), InputMode::Smart);
        assert_eq!(InputMode::Smart.toggled(), InputMode::Expert);
    }
}
