//! Patient questionnaire form (Smart and Expert modes).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::str::FromStr;

use zeroize::Zeroize;

use crate::domain::{ClinicalAnswers, InputMode, ParseAnswerError, PatientAnswers, SurveyAnswers};
use crate::tui::styles::MedicalTheme;

use super::{footer_block, header_block, key_hint};

/// `(stable id, display label)`. Only the id reaches the domain.
pub type ChoiceOption = (&'static str, &'static str);

const YES_NO: &[ChoiceOption] = &[("no", "No"), ("yes", "Yes")];
const SEX: &[ChoiceOption] = &[("male", "Male"), ("female", "Female")];

/// How a field is edited.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, parsed as a number on submit
    Numeric { min: f64, max: f64, integer: bool },
    /// Fixed options cycled with Left/Right
    Choice {
        options: &'static [ChoiceOption],
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Numeric {
                min,
                max,
                integer: true,
            },
            value: String::new(),
        }
    }

    fn real(label: &'static str, hint: &'static str, min: f64, max: f64) -> Self {
        Self {
            kind: FieldKind::Numeric {
                min,
                max,
                integer: false,
            },
            ..Self::numeric(label, hint, min, max)
        }
    }

    fn choice(label: &'static str, hint: &'static str, options: &'static [ChoiceOption]) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Choice {
                options,
                selected: 0,
            },
            value: String::new(),
        }
    }

    /// Text shown in the field box.
    #[must_use]
    pub fn display(&self) -> &str {
        match &self.kind {
            FieldKind::Numeric { .. } => &self.value,
            FieldKind::Choice { options, selected } => {
                options.get(*selected).map(|(_, label)| *label).unwrap_or_default()
            }
        }
    }

    fn select(&mut self, index: usize) {
        if let FieldKind::Choice { options, selected } = &mut self.kind {
            if index < options.len() {
                *selected = index;
            }
        }
    }
}

fn survey_fields() -> Vec<FormField> {
    vec![
        FormField::numeric("Age", "years (18-100)", 18.0, 100.0),
        FormField::choice("Gender", "", SEX),
        FormField::choice(
            "Smoking",
            "",
            &[
                ("never", "Never"),
                ("occasionally", "Occasionally"),
                ("regularly", "Regularly"),
            ],
        ),
        FormField::choice("Regular exercise", "", YES_NO),
        FormField::choice(
            "Chest pain",
            "",
            &[("no", "No"), ("sometimes", "Sometimes"), ("often", "Often")],
        ),
        FormField::choice(
            "Fatigue / short of breath",
            "",
            &[("no", "No"), ("sometimes", "Sometimes"), ("yes", "Yes")],
        ),
        FormField::choice("Overweight", "", YES_NO),
    ]
}

fn clinical_fields() -> Vec<FormField> {
    vec![
        FormField::numeric("Age", "years (18-100)", 18.0, 100.0),
        FormField::choice("Sex", "", SEX),
        FormField::choice(
            "Chest pain type",
            "",
            &[
                ("0", "0 Typical angina"),
                ("1", "1 Atypical angina"),
                ("2", "2 Non-anginal pain"),
                ("3", "3 Asymptomatic"),
            ],
        ),
        FormField::numeric("Resting BP", "mmHg (80-200)", 80.0, 200.0),
        FormField::numeric("Cholesterol", "mg/dL (100-600)", 100.0, 600.0),
        FormField::choice(
            "Fasting blood sugar",
            "",
            &[("0", "0 <= 120 mg/dL"), ("1", "1 > 120 mg/dL")],
        ),
        FormField::choice(
            "Resting ECG",
            "",
            &[
                ("0", "0 Normal"),
                ("1", "1 ST-T abnormality"),
                ("2", "2 LV hypertrophy"),
            ],
        ),
        FormField::numeric("Max heart rate", "bpm (60-220)", 60.0, 220.0),
        FormField::choice("Exercise angina", "", &[("0", "0 No"), ("1", "1 Yes")]),
        FormField::real("ST depression", "oldpeak (0.0-10.0)", 0.0, 10.0),
        FormField::choice(
            "ST slope",
            "",
            &[("0", "0 Upsloping"), ("1", "1 Flat"), ("2", "2 Downsloping")],
        ),
        FormField::numeric("Major vessels", "fluoroscopy (0-3)", 0.0, 3.0),
        FormField::choice(
            "Thalassemia",
            "",
            &[
                ("0", "0 Unknown"),
                ("1", "1 Normal"),
                ("2", "2 Fixed defect"),
                ("3", "3 Reversible defect"),
            ],
        ),
    ]
}

/// Patient form state
pub struct PatientFormState {
    pub mode: InputMode,
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self::new(InputMode::Smart)
    }
}

impl PatientFormState {
    #[must_use]
    pub fn new(mode: InputMode) -> Self {
        let fields = match mode {
            InputMode::Smart => survey_fields(),
            InputMode::Expert => clinical_fields(),
        };
        Self {
            mode,
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field (numeric fields only)
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if let FieldKind::Numeric { integer, .. } = field.kind {
            if c.is_ascii_digit() || (c == '.' && !integer) {
                field.value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Cycle the current choice field forward or backward.
    pub fn cycle_choice(&mut self, forward: bool) {
        if let FieldKind::Choice { options, selected } =
            &mut self.fields[self.selected_field].kind
        {
            let n = options.len();
            *selected = if forward {
                (*selected + 1) % n
            } else {
                (*selected + n - 1) % n
            };
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        field.value.clear();
        field.select(0);
    }

    /// Wipe all field buffers and reset every choice.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.select(0);
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    fn number(&self, index: usize) -> Result<f64, String> {
        let field = &self.fields[index];
        let FieldKind::Numeric { min, max, integer } = field.kind else {
            return Err(format!("{}: not a numeric field", field.label));
        };

        let value: f64 = field
            .value
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", field.label))?;

        if !value.is_finite() || value < min || value > max {
            return Err(format!(
                "{}: Value must be between {} and {}",
                field.label, min, max
            ));
        }
        if integer && value.fract() != 0.0 {
            return Err(format!("{}: Whole numbers only", field.label));
        }
        Ok(value)
    }

    /// Stable id of the selected option.
    fn choice_id(&self, index: usize) -> Result<&'static str, String> {
        let field = &self.fields[index];
        match field.kind {
            FieldKind::Choice { options, selected } => options
                .get(selected)
                .map(|(id, _)| *id)
                .ok_or_else(|| format!("{}: Invalid choice", field.label)),
            FieldKind::Numeric { .. } => Err(format!("{}: not a choice field", field.label)),
        }
    }

    fn pick<T>(&self, index: usize) -> Result<T, String>
    where
        T: FromStr<Err = ParseAnswerError>,
    {
        self.choice_id(index)?
            .parse()
            .map_err(|e: ParseAnswerError| format!("{}: {e}", self.fields[index].label))
    }

    /// Categorical clinical code (the option id is the code itself).
    fn code(&self, index: usize) -> Result<u8, String> {
        self.choice_id(index)?
            .parse()
            .map_err(|_| format!("{}: Invalid code", self.fields[index].label))
    }

    /// Validate and convert to typed answers for the current mode.
    pub fn to_answers(&self) -> Result<PatientAnswers, String> {
        match self.mode {
            InputMode::Smart => Ok(PatientAnswers::Survey(SurveyAnswers {
                age: self.number(0)? as u32,
                gender: self.pick(1)?,
                smoking: self.pick(2)?,
                exercise: self.pick(3)?,
                chest_pain: self.pick(4)?,
                fatigue: self.pick(5)?,
                overweight: self.choice_id(6)? == "yes",
            })),
            InputMode::Expert => Ok(PatientAnswers::Clinical(ClinicalAnswers {
                age: self.number(0)? as u32,
                sex: self.pick(1)?,
                chest_pain_type: self.code(2)?,
                resting_bp: self.number(3)? as u32,
                cholesterol: self.number(4)? as u32,
                fasting_blood_sugar: self.code(5)?,
                resting_ecg: self.code(6)?,
                max_heart_rate: self.number(7)? as u32,
                exercise_angina: self.code(8)?,
                st_depression: self.number(9)?,
                st_slope: self.code(10)?,
                major_vessels: self.number(11)? as u8,
                thalassemia: self.code(12)?,
            })),
        }
    }

    /// Load sample data for a quick demo
    pub fn load_sample_data(&mut self) {
        match self.mode {
            InputMode::Smart => {
                // 58yo male, occasional smoker, no exercise, chest pain sometimes
                self.fields[0].value = "58".to_string();
                for (i, choice) in [(1, 0), (2, 1), (3, 0), (4, 1), (5, 1), (6, 1)] {
                    self.fields[i].select(choice);
                }
            }
            InputMode::Expert => {
                let numbers = [(0, "63"), (3, "145"), (4, "233"), (7, "150"), (9, "2.3"), (11, "0")];
                for (i, val) in numbers {
                    self.fields[i].value = val.to_string();
                }
                let choices = [(1, 0), (2, 3), (5, 1), (6, 0), (8, 0), (10, 0), (12, 1)];
                for (i, choice) in choices {
                    self.fields[i].select(choice);
                }
            }
        }
        self.error_message = None;
    }
}

/// Render the questionnaire
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state.mode);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect, mode: InputMode) {
    let (title, subtitle) = match mode {
        InputMode::Smart => ("Smart Mode", " │ Lifestyle questions, clinical values estimated"),
        InputMode::Expert => ("Expert Mode", " │ Clinical measurements (UCI Heart Disease)"),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title, MedicalTheme::title()),
        Span::styled(subtitle, MedicalTheme::text_secondary()),
    ]))
    .block(header_block());

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![Span::raw(" ")];
        match &field.kind {
            FieldKind::Numeric { .. } => {
                if field.value.is_empty() {
                    spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
                } else {
                    spans.push(Span::styled(field.display(), MedicalTheme::text()));
                }
                if is_selected {
                    spans.push(Span::styled("▌", MedicalTheme::cursor()));
                }
            }
            FieldKind::Choice { .. } => {
                if is_selected {
                    spans.push(Span::styled("◀ ", MedicalTheme::cursor()));
                }
                spans.push(Span::styled(field.display(), MedicalTheme::text()));
                if is_selected {
                    spans.push(Span::styled(" ▶", MedicalTheme::cursor()));
                }
            }
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        let mut spans = Vec::new();
        for (key, desc) in [
            ("[↑↓] ", "Navigate "),
            ("[←→] ", "Choose "),
            ("[F2] ", "Switch mode "),
            ("[Enter] ", "Predict "),
            ("[S] ", "Sample "),
            ("[Esc] ", "Back"),
        ] {
            spans.extend(key_hint(key, desc));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(content).block(footer_block()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChestPainFrequency, ExerciseHabit, FatigueFrequency, Sex, SmokingFrequency,
    };

    #[test]
    fn test_field_sets_per_mode() {
        assert_eq!(PatientFormState::new(InputMode::Smart).fields.len(), 7);
        assert_eq!(PatientFormState::new(InputMode::Expert).fields.len(), 13);
    }

    fn option_ids(form: &PatientFormState, index: usize) -> Vec<&'static str> {
        match form.fields[index].kind {
            FieldKind::Choice { options, .. } => options.iter().map(|(id, _)| *id).collect(),
            FieldKind::Numeric { .. } => Vec::new(),
        }
    }

    fn assert_ids_cover<T>(ids: &[&str], all: &[T])
    where
        T: FromStr<Err = ParseAnswerError> + PartialEq + std::fmt::Debug,
    {
        let parsed: Vec<T> = ids.iter().map(|id| id.parse().unwrap()).collect();
        assert_eq!(parsed.as_slice(), all);
    }

    #[test]
    fn test_choice_ids_parse_to_every_variant() {
        let smart = PatientFormState::new(InputMode::Smart);
        assert_ids_cover(&option_ids(&smart, 1), &[Sex::Male, Sex::Female]);
        assert_ids_cover(
            &option_ids(&smart, 2),
            &[
                SmokingFrequency::Never,
                SmokingFrequency::Occasionally,
                SmokingFrequency::Regularly,
            ],
        );
        assert_ids_cover(&option_ids(&smart, 3), &[ExerciseHabit::No, ExerciseHabit::Yes]);
        assert_ids_cover(
            &option_ids(&smart, 4),
            &[
                ChestPainFrequency::No,
                ChestPainFrequency::Sometimes,
                ChestPainFrequency::Often,
            ],
        );
        assert_ids_cover(
            &option_ids(&smart, 5),
            &[
                FatigueFrequency::No,
                FatigueFrequency::Sometimes,
                FatigueFrequency::Yes,
            ],
        );

        let expert = PatientFormState::new(InputMode::Expert);
        assert_ids_cover(&option_ids(&expert, 1), &[Sex::Male, Sex::Female]);
        for index in [2, 5, 6, 8, 10, 12] {
            for id in option_ids(&expert, index) {
                assert!(id.parse::<u8>().is_ok(), "field {index} id {id:?}");
            }
        }
    }

    #[test]
    fn test_selected_label_maps_through_id() {
        let mut form = PatientFormState::new(InputMode::Smart);
        form.fields[0].value = "45".to_string();
        form.selected_field = 1;
        form.cycle_choice(true);
        assert_eq!(form.fields[1].display(), "Female");

        let PatientAnswers::Survey(survey) = form.to_answers().unwrap() else {
            panic!("expected survey answers");
        };
        assert_eq!(survey.gender, Sex::Female);
        assert!(!survey.overweight);
    }

    #[test]
    fn test_smart_sample_converts() {
        let mut form = PatientFormState::new(InputMode::Smart);
        form.load_sample_data();

        let answers = form.to_answers().unwrap();
        let PatientAnswers::Survey(survey) = answers else {
            panic!("expected survey answers");
        };
        assert_eq!(survey.age, 58);
        assert_eq!(survey.gender, Sex::Male);
        assert_eq!(survey.smoking, SmokingFrequency::Occasionally);
        assert_eq!(survey.exercise, ExerciseHabit::No);
        assert_eq!(survey.chest_pain, ChestPainFrequency::Sometimes);
        assert!(survey.overweight);
    }

    #[test]
    fn test_expert_sample_converts() {
        let mut form = PatientFormState::new(InputMode::Expert);
        form.load_sample_data();

        let PatientAnswers::Clinical(clinical) = form.to_answers().unwrap() else {
            panic!("expected clinical answers");
        };
        assert_eq!(clinical.age, 63);
        assert_eq!(clinical.chest_pain_type, 3);
        assert_eq!(clinical.cholesterol, 233);
        assert_eq!(clinical.fasting_blood_sugar, 1);
        assert!((clinical.st_depression - 2.3).abs() < 1e-9);
        assert_eq!(clinical.thalassemia, 1);
    }

    #[test]
    fn test_out_of_range_age_rejected() {
        let mut form = PatientFormState::new(InputMode::Smart);
        form.fields[0].value = "130".to_string();
        let err = form.to_answers().unwrap_err();
        assert!(err.contains("Age"));
    }

    #[test]
    fn test_empty_number_rejected() {
        let form = PatientFormState::new(InputMode::Expert);
        assert!(form.to_answers().unwrap_err().contains("Invalid number"));
    }

    #[test]
    fn test_integer_fields_ignore_decimal_point() {
        let mut form = PatientFormState::new(InputMode::Smart);
        for c in "4.5".chars() {
            form.input_char(c);
        }
        assert_eq!(form.fields[0].value, "45");
    }

    #[test]
    fn test_cycle_choice_wraps() {
        let mut form = PatientFormState::new(InputMode::Smart);
        form.selected_field = 2;
        form.cycle_choice(false);
        assert_eq!(form.fields[2].display(), "Regularly");
        form.cycle_choice(true);
        assert_eq!(form.fields[2].display(), "Never");
    }

    #[test]
    fn test_clear_sensitive_resets_everything() {
        let mut form = PatientFormState::new(InputMode::Expert);
        form.load_sample_data();
        form.selected_field = 4;
        form.clear_sensitive();

        assert_eq!(form.selected_field, 0);
        for field in &form.fields {
            assert!(field.value.is_empty());
            if let FieldKind::Choice { selected, .. } = field.kind {
                assert_eq!(selected, 0);
            }
        }
    }
}
