//! Coronary artery disease (CAD) risk inputs, weights and result.
//!
//! Field set follows the UCI heart disease layout (age, sex, cp, trestbps,
//! chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal).

use serde::{Deserialize, Serialize};

use super::form::{
    require_choice, require_number, ChoiceOption, FieldKind, FieldSpec, FormValues,
    ValidationError,
};

/// Lower clamp for the displayed probability (percent).
pub const MIN_PROBABILITY: f64 = 5.0;

/// Upper clamp for the displayed probability (percent).
pub const MAX_PROBABILITY: f64 = 95.0;

/// Half-width of the uniform perturbation added to the CAD probability.
pub const NOISE_AMPLITUDE: f64 = 5.0;

/// Probability (percent) above which CAD is reported as present.
pub const CAD_THRESHOLD: f64 = 50.0;

/// Biological sex, coded 0 = female, 1 = male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Female),
            "1" => Some(Self::Male),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::TypicalAngina),
            "1" => Some(Self::AtypicalAngina),
            "2" => Some(Self::NonAnginalPain),
            "3" => Some(Self::Asymptomatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Normal),
            "1" => Some(Self::StTAbnormality),
            "2" => Some(Self::LeftVentricularHypertrophy),
            _ => None,
        }
    }
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl StSlope {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Upsloping),
            "1" => Some(Self::Flat),
            "2" => Some(Self::Downsloping),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thalassemia {
    Normal,
    FixedDefect,
    ReversibleDefect,
}

impl Thalassemia {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Normal),
            "1" => Some(Self::FixedDefect),
            "2" => Some(Self::ReversibleDefect),
            _ => None,
        }
    }
}

/// Parse a "0"/"1" flag.
pub(crate) fn flag_from_code(code: &str) -> Option<bool> {
    match code {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

/// Validated CAD input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CadInput {
    /// Age in years (0-120)
    pub age: f64,
    pub sex: Sex,
    pub chest_pain: ChestPainType,
    /// Resting blood pressure in mm Hg (80-200)
    pub resting_bp: f64,
    /// Serum cholesterol in mg/dl (100-600)
    pub cholesterol: f64,
    /// Fasting blood sugar > 120 mg/dl
    pub fasting_blood_sugar: bool,
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved (60-220)
    pub max_heart_rate: f64,
    pub exercise_angina: bool,
    /// ST depression induced by exercise, "oldpeak" (0-7)
    pub st_depression: f64,
    pub st_slope: StSlope,
    /// Major vessels colored by fluoroscopy (0-4)
    pub major_vessels: u8,
    pub thalassemia: Thalassemia,
}

impl CadInput {
    /// Build a typed input from raw form values.
    ///
    /// # Errors
    /// Returns every validation message when any field is missing or out of range.
    pub fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        values.ensure_valid()?;

        Ok(Self {
            age: require_number(values, "age")?,
            sex: require_choice(values, "sex", Sex::from_code)?,
            chest_pain: require_choice(values, "cp", ChestPainType::from_code)?,
            resting_bp: require_number(values, "trestbps")?,
            cholesterol: require_number(values, "chol")?,
            fasting_blood_sugar: require_choice(values, "fbs", flag_from_code)?,
            resting_ecg: require_choice(values, "restecg", RestingEcg::from_code)?,
            max_heart_rate: require_number(values, "thalach")?,
            exercise_angina: require_choice(values, "exang", flag_from_code)?,
            st_depression: require_number(values, "oldpeak")?,
            st_slope: require_choice(values, "slope", StSlope::from_code)?,
            major_vessels: require_choice(values, "ca", |c| c.parse::<u8>().ok())?,
            thalassemia: require_choice(values, "thal", Thalassemia::from_code)?,
        })
    }

    /// Additive risk score before scaling and noise.
    ///
    /// Tiered fields are first-match-wins; fields are independent.
    #[must_use]
    pub fn risk_score(&self) -> f64 {
        let mut score = 0.0;

        if self.age > 65.0 {
            score += 0.15;
        } else if self.age > 55.0 {
            score += 0.10;
        } else if self.age > 45.0 {
            score += 0.05;
        }

        if self.sex == Sex::Male {
            score += 0.10;
        }

        score += match self.chest_pain {
            ChestPainType::Asymptomatic => 0.20,
            ChestPainType::NonAnginalPain => 0.15,
            ChestPainType::AtypicalAngina => 0.10,
            ChestPainType::TypicalAngina => 0.0,
        };

        if self.resting_bp > 140.0 {
            score += 0.15;
        } else if self.resting_bp > 130.0 {
            score += 0.08;
        }

        if self.cholesterol > 240.0 {
            score += 0.15;
        } else if self.cholesterol > 200.0 {
            score += 0.08;
        }

        if self.fasting_blood_sugar {
            score += 0.05;
        }

        if self.max_heart_rate < 100.0 {
            score += 0.10;
        }

        if self.exercise_angina {
            score += 0.15;
        }

        if self.st_depression > 2.0 {
            score += 0.15;
        } else if self.st_depression > 1.0 {
            score += 0.08;
        }

        if self.major_vessels > 0 {
            score += f64::from(self.major_vessels) * 0.10;
        }

        score += match self.thalassemia {
            Thalassemia::ReversibleDefect => 0.15,
            Thalassemia::FixedDefect => 0.08,
            Thalassemia::Normal => 0.0,
        };

        score
    }
}

/// Outcome of a CAD assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadResult {
    /// Predicted probability in percent, integer-valued, within 5..=95
    pub probability: f64,
    #[serde(rename = "hasCAD")]
    pub has_cad: bool,
}

impl CadResult {
    /// Turn a risk score and a noise offset (percent points) into a result.
    #[must_use]
    pub fn from_risk_score(risk_score: f64, noise: f64) -> Self {
        let clamped = (risk_score * 100.0 + noise).clamp(MIN_PROBABILITY, MAX_PROBABILITY);

        // The flag is decided before rounding; only the displayed value is rounded.
        Self {
            probability: clamped.round(),
            has_cad: clamped > CAD_THRESHOLD,
        }
    }

    /// Follow-up recommendation for display.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        if self.has_cad {
            "We recommend you see a cardiologist for further evaluation."
        } else {
            "Your risk is low, maintain a healthy lifestyle."
        }
    }
}

pub(crate) const SEX_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "Female" },
    ChoiceOption { value: "1", label: "Male" },
];

const CHEST_PAIN_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "Typical Angina" },
    ChoiceOption { value: "1", label: "Atypical Angina" },
    ChoiceOption { value: "2", label: "Non-anginal Pain" },
    ChoiceOption { value: "3", label: "Asymptomatic" },
];

const TRUE_FALSE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "False" },
    ChoiceOption { value: "1", label: "True" },
];

const RESTING_ECG_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "Normal" },
    ChoiceOption { value: "1", label: "ST-T Wave Abnormality" },
    ChoiceOption { value: "2", label: "Left Ventricular Hypertrophy" },
];

const YES_NO_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "No" },
    ChoiceOption { value: "1", label: "Yes" },
];

const ST_SLOPE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "Upsloping" },
    ChoiceOption { value: "1", label: "Flat" },
    ChoiceOption { value: "2", label: "Downsloping" },
];

const VESSEL_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "0" },
    ChoiceOption { value: "1", label: "1" },
    ChoiceOption { value: "2", label: "2" },
    ChoiceOption { value: "3", label: "3" },
    ChoiceOption { value: "4", label: "4" },
];

const THALASSEMIA_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "Normal" },
    ChoiceOption { value: "1", label: "Fixed Defect" },
    ChoiceOption { value: "2", label: "Reversible Defect" },
];

/// CAD form schema, in validation order.
pub static CAD_FIELDS: [FieldSpec; 13] = [
    FieldSpec {
        key: "age",
        label: "Age",
        unit: None,
        hint: "years (0-120)",
        kind: FieldKind::Bounded { min: 0.0, max: 120.0 },
        default: Some("50"),
    },
    FieldSpec {
        key: "sex",
        label: "Sex",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: SEX_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "cp",
        label: "Chest Pain Type",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: CHEST_PAIN_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "trestbps",
        label: "Resting BP",
        unit: None,
        hint: "mm Hg (80-200)",
        kind: FieldKind::Bounded { min: 80.0, max: 200.0 },
        default: Some("120"),
    },
    FieldSpec {
        key: "chol",
        label: "Cholesterol",
        unit: None,
        hint: "mg/dl (100-600)",
        kind: FieldKind::Bounded { min: 100.0, max: 600.0 },
        default: Some("200"),
    },
    FieldSpec {
        key: "fbs",
        label: "Fasting Blood Sugar",
        unit: None,
        hint: "> 120 mg/dl",
        kind: FieldKind::Choice { options: TRUE_FALSE_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "restecg",
        label: "Resting ECG",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: RESTING_ECG_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "thalach",
        label: "Max Heart Rate",
        unit: None,
        hint: "bpm (60-220)",
        kind: FieldKind::Bounded { min: 60.0, max: 220.0 },
        default: Some("150"),
    },
    FieldSpec {
        key: "exang",
        label: "Exercise-induced Angina",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: YES_NO_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "oldpeak",
        label: "ST Depression",
        unit: None,
        hint: "oldpeak (0-7)",
        kind: FieldKind::Bounded { min: 0.0, max: 7.0 },
        default: Some("1.0"),
    },
    FieldSpec {
        key: "slope",
        label: "ST Slope",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: ST_SLOPE_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "ca",
        label: "Number of Major Vessels",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: VESSEL_OPTIONS },
        default: None,
    },
    FieldSpec {
        key: "thal",
        label: "Thalassemia",
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options: THALASSEMIA_OPTIONS },
        default: None,
    },
];

/// Sample high-risk patient used by the form's "sample data" action.
pub const CAD_SAMPLE: [(&str, &str); 13] = [
    ("age", "70"),
    ("sex", "1"),
    ("cp", "3"),
    ("trestbps", "150"),
    ("chol", "250"),
    ("fbs", "1"),
    ("restecg", "0"),
    ("thalach", "90"),
    ("exang", "1"),
    ("oldpeak", "3"),
    ("slope", "1"),
    ("ca", "2"),
    ("thal", "2"),
];
