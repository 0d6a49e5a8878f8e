//! Arrhythmia inputs, class table and probability distribution.
//!
//! Feature names follow the UCI arrhythmia dataset (QRS duration, P-R and Q-T
//! intervals, wave amplitudes, per-lead means and maxima).

use serde::{Deserialize, Serialize};

use super::cad::{flag_from_code, Sex, SEX_OPTIONS};
use super::form::{
    require_choice, require_number, ChoiceOption, FieldKind, FieldSpec, FormValues,
    ValidationError,
};

/// Upper bound of the accumulated deviation score.
pub const MAX_DEVIATION: f64 = 0.8;

/// Baseline probability of the Normal class with no deviations.
pub const NORMAL_BASELINE: f64 = 0.85;

/// Floor for the Normal class probability.
pub const NORMAL_FLOOR: f64 = 0.01;

/// Per-lead ECG measurements (DII, DIII, AVR, AVL, AVF, V1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LeadValues {
    pub dii: f64,
    pub diii: f64,
    pub avr: f64,
    pub avl: f64,
    pub avf: f64,
    pub v1: f64,
}

/// Validated arrhythmia input.
///
/// Durations and intervals are in ms, amplitudes in mV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrhythmiaInput {
    pub age: f64,
    pub sex: Sex,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    /// bpm
    pub heart_rate: f64,
    pub qrs_duration: f64,
    pub pr_interval: f64,
    pub qt_interval: f64,
    pub t_interval: f64,
    pub q_wave: f64,
    pub r_wave: f64,
    pub s_wave: f64,
    pub r_prime_wave: f64,
    pub s_prime_wave: f64,
    pub amp_r_wave: f64,
    pub jj_wave: f64,
    /// Intrinsic deflection flag
    pub int_def: bool,
    pub qrsa: bool,
    pub qrsta: f64,
    pub lead_mean: LeadValues,
    pub lead_max: LeadValues,
}

impl ArrhythmiaInput {
    /// Build a typed input from raw form values.
    ///
    /// # Errors
    /// Returns every validation message when any field is missing or out of range.
    pub fn from_form(values: &FormValues) -> Result<Self, ValidationError> {
        values.ensure_valid()?;

        let n = |key: &str| require_number(values, key);

        Ok(Self {
            age: n("age")?,
            sex: require_choice(values, "sex", Sex::from_code)?,
            height: n("height")?,
            weight: n("weight")?,
            heart_rate: n("heart_rate")?,
            qrs_duration: n("qrs_duration")?,
            pr_interval: n("pr_interval")?,
            qt_interval: n("qt_interval")?,
            t_interval: n("t_interval")?,
            q_wave: n("q_wave")?,
            r_wave: n("r_wave")?,
            s_wave: n("s_wave")?,
            r_prime_wave: n("r_prime_wave")?,
            s_prime_wave: n("s_prime_wave")?,
            amp_r_wave: n("amp_r_wave")?,
            jj_wave: n("jj_wave")?,
            int_def: require_choice(values, "int_def", flag_from_code)?,
            qrsa: require_choice(values, "qrsa", flag_from_code)?,
            qrsta: n("qrsta")?,
            lead_mean: LeadValues {
                dii: n("dii_mean")?,
                diii: n("diii_mean")?,
                avr: n("avr_mean")?,
                avl: n("avl_mean")?,
                avf: n("avf_mean")?,
                v1: n("v1_mean")?,
            },
            lead_max: LeadValues {
                dii: n("dii_max")?,
                diii: n("diii_max")?,
                avr: n("avr_max")?,
                avl: n("avl_max")?,
                avf: n("avf_max")?,
                v1: n("v1_max")?,
            },
        })
    }

    /// Accumulated deviation from normal ECG ranges, capped at [`MAX_DEVIATION`].
    ///
    /// Rules are independent; several may fire for the same measurement.
    #[must_use]
    pub fn deviation_score(&self) -> f64 {
        let mut score = 0.0;

        if self.heart_rate < 60.0 || self.heart_rate > 100.0 {
            score += 0.1;
        }
        if self.heart_rate < 50.0 || self.heart_rate > 120.0 {
            score += 0.1;
        }

        if self.qrs_duration < 80.0 || self.qrs_duration > 120.0 {
            score += 0.15;
        }
        if self.qrs_duration > 140.0 {
            score += 0.2;
        }

        if self.pr_interval < 120.0 || self.pr_interval > 200.0 {
            score += 0.1;
        }

        if self.qt_interval < 350.0 || self.qt_interval > 450.0 {
            score += 0.1;
        }
        // long QT
        if self.qt_interval > 480.0 {
            score += 0.15;
        }

        if self.q_wave.abs() > 0.5 {
            score += 0.1;
        }
        if self.r_wave < 0.5 || self.r_wave > 5.0 {
            score += 0.1;
        }
        if self.s_wave.abs() > 3.0 {
            score += 0.1;
        }

        if self.age > 65.0 {
            score += 0.05;
        }

        if self.int_def {
            score += 0.15;
        }
        if self.qrsa {
            score += 0.1;
        }

        f64::min(score, MAX_DEVIATION)
    }
}

/// Multiplicative boost applied to an abnormal class when its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boost {
    /// QRS duration > 120 ms, ×2
    BundleBranchBlock,
    /// Heart rate > 100 bpm, ×2
    Tachycardia,
    /// Heart rate < 60 bpm, ×2
    Bradycardia,
    /// P-R interval > 200 ms, ×1.5
    Atrial,
    /// |S wave| > 2 mV, ×1.5
    Ventricular,
}

impl Boost {
    /// Application order. Boosts compound in this order.
    pub const ORDER: [Self; 5] = [
        Self::BundleBranchBlock,
        Self::Tachycardia,
        Self::Bradycardia,
        Self::Atrial,
        Self::Ventricular,
    ];

    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::BundleBranchBlock | Self::Tachycardia | Self::Bradycardia => 2.0,
            Self::Atrial | Self::Ventricular => 1.5,
        }
    }

    #[must_use]
    pub fn fires(self, input: &ArrhythmiaInput) -> bool {
        match self {
            Self::BundleBranchBlock => input.qrs_duration > 120.0,
            Self::Tachycardia => input.heart_rate > 100.0,
            Self::Bradycardia => input.heart_rate < 60.0,
            Self::Atrial => input.pr_interval > 200.0,
            Self::Ventricular => input.s_wave.abs() > 2.0,
        }
    }
}

/// The 15 arrhythmia classes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrhythmiaClass {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Left Bundle Branch Block")]
    LeftBundleBranchBlock,
    #[serde(rename = "Right Bundle Branch Block")]
    RightBundleBranchBlock,
    #[serde(rename = "Premature Ventricular Contraction")]
    PrematureVentricularContraction,
    #[serde(rename = "Supraventricular Arrhythmia")]
    SupraventricularArrhythmia,
    #[serde(rename = "Atrial Fibrillation")]
    AtrialFibrillation,
    #[serde(rename = "Atrial Flutter")]
    AtrialFlutter,
    #[serde(rename = "Ventricular Premature Contraction (PVC)")]
    VentricularPrematureContraction,
    #[serde(rename = "Ventricular Tachycardia")]
    VentricularTachycardia,
    #[serde(rename = "Ventricular Fibrillation")]
    VentricularFibrillation,
    #[serde(rename = "Junctional Arrhythmia")]
    JunctionalArrhythmia,
    #[serde(rename = "Sinus Tachycardia")]
    SinusTachycardia,
    #[serde(rename = "Sinus Bradycardia")]
    SinusBradycardia,
    #[serde(rename = "Sinus Arrhythmia")]
    SinusArrhythmia,
    #[serde(rename = "Atrial Premature Contraction")]
    AtrialPrematureContraction,
}

/// Number of classes in the table.
pub const CLASS_COUNT: usize = 15;

impl ArrhythmiaClass {
    pub const ALL: [Self; CLASS_COUNT] = [
        Self::Normal,
        Self::LeftBundleBranchBlock,
        Self::RightBundleBranchBlock,
        Self::PrematureVentricularContraction,
        Self::SupraventricularArrhythmia,
        Self::AtrialFibrillation,
        Self::AtrialFlutter,
        Self::VentricularPrematureContraction,
        Self::VentricularTachycardia,
        Self::VentricularFibrillation,
        Self::JunctionalArrhythmia,
        Self::SinusTachycardia,
        Self::SinusBradycardia,
        Self::SinusArrhythmia,
        Self::AtrialPrematureContraction,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::LeftBundleBranchBlock => "Left Bundle Branch Block",
            Self::RightBundleBranchBlock => "Right Bundle Branch Block",
            Self::PrematureVentricularContraction => "Premature Ventricular Contraction",
            Self::SupraventricularArrhythmia => "Supraventricular Arrhythmia",
            Self::AtrialFibrillation => "Atrial Fibrillation",
            Self::AtrialFlutter => "Atrial Flutter",
            Self::VentricularPrematureContraction => "Ventricular Premature Contraction (PVC)",
            Self::VentricularTachycardia => "Ventricular Tachycardia",
            Self::VentricularFibrillation => "Ventricular Fibrillation",
            Self::JunctionalArrhythmia => "Junctional Arrhythmia",
            Self::SinusTachycardia => "Sinus Tachycardia",
            Self::SinusBradycardia => "Sinus Bradycardia",
            Self::SinusArrhythmia => "Sinus Arrhythmia",
            Self::AtrialPrematureContraction => "Atrial Premature Contraction",
        }
    }

    /// Boosts this class is eligible for.
    #[must_use]
    pub fn boosts(self) -> &'static [Boost] {
        use Boost::{Atrial, Bradycardia, BundleBranchBlock, Tachycardia, Ventricular};

        match self {
            Self::Normal
            | Self::SupraventricularArrhythmia
            | Self::JunctionalArrhythmia
            | Self::SinusArrhythmia => &[],
            Self::LeftBundleBranchBlock | Self::RightBundleBranchBlock => &[BundleBranchBlock],
            Self::PrematureVentricularContraction
            | Self::VentricularPrematureContraction
            | Self::VentricularFibrillation => &[Ventricular],
            Self::VentricularTachycardia => &[Tachycardia, Ventricular],
            Self::AtrialFibrillation | Self::AtrialFlutter | Self::AtrialPrematureContraction => {
                &[Atrial]
            }
            Self::SinusTachycardia => &[Tachycardia],
            Self::SinusBradycardia => &[Bradycardia],
        }
    }
}

impl std::fmt::Display for ArrhythmiaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the output distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub class: ArrhythmiaClass,
    /// Percent (0-100)
    pub probability: f64,
}

/// Severity tag of the advisory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryIcon {
    Normal,
    Warning,
    Info,
}

/// Derive the advisory icon and message from the most likely class.
#[must_use]
pub fn advisory(most_likely: &ClassProbability) -> (AdvisoryIcon, String) {
    let is_normal = most_likely.class == ArrhythmiaClass::Normal;

    if is_normal && most_likely.probability > 50.0 {
        (
            AdvisoryIcon::Normal,
            "Your ECG data appears normal.".to_string(),
        )
    } else if most_likely.probability > 30.0 && !is_normal {
        (
            AdvisoryIcon::Warning,
            format!(
                "Your ECG data suggests possible {}. Please consult a cardiologist.",
                most_likely.class
            ),
        )
    } else {
        (
            AdvisoryIcon::Info,
            "Mixed signals; consider further testing.".to_string(),
        )
    }
}

/// Outcome of an arrhythmia assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrhythmiaResult {
    /// All classes, descending by probability (ties in canonical order)
    pub probabilities: [ClassProbability; CLASS_COUNT],
    pub most_likely: ClassProbability,
    pub message: String,
    pub icon: AdvisoryIcon,
}

impl ArrhythmiaResult {
    /// Compute the class distribution for a validated input.
    #[must_use]
    pub fn classify(input: &ArrhythmiaInput) -> Self {
        let deviation = input.deviation_score();
        let normal = f64::max(NORMAL_FLOOR, NORMAL_BASELINE - deviation);
        let abnormal = 1.0 - normal;
        let per_class = abnormal / (CLASS_COUNT - 1) as f64;

        let raw = ArrhythmiaClass::ALL.map(|class| {
            let probability = if class == ArrhythmiaClass::Normal {
                normal
            } else {
                Boost::ORDER
                    .iter()
                    .filter(|b| class.boosts().contains(b) && b.fires(input))
                    .fold(per_class, |p, b| p * b.factor())
            };
            ClassProbability { class, probability }
        });

        let total: f64 = raw.iter().map(|c| c.probability).sum();
        let mut probabilities = raw.map(|c| ClassProbability {
            class: c.class,
            probability: (c.probability / total) * 100.0,
        });

        // stable: equal probabilities keep canonical order
        probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        let most_likely = probabilities[0];
        let (icon, message) = advisory(&most_likely);

        Self {
            probabilities,
            most_likely,
            message,
            icon,
        }
    }

    #[must_use]
    pub fn probability_of(&self, class: ArrhythmiaClass) -> f64 {
        self.probabilities
            .iter()
            .find(|c| c.class == class)
            .map_or(0.0, |c| c.probability)
    }
}

const FLAG_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "0", label: "0" },
    ChoiceOption { value: "1", label: "1" },
];

const fn bounded(
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    hint: &'static str,
    min: f64,
    max: f64,
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit: Some(unit),
        hint,
        kind: FieldKind::Bounded { min, max },
        default: Some(default),
    }
}

const fn free(key: &'static str, label: &'static str, hint: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit: None,
        hint,
        kind: FieldKind::Unbounded,
        default: Some(default),
    }
}

const fn choice(key: &'static str, label: &'static str, options: &'static [ChoiceOption]) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit: None,
        hint: "Select",
        kind: FieldKind::Choice { options },
        default: None,
    }
}

/// Arrhythmia form schema, in display order.
pub static ARRHYTHMIA_FIELDS: [FieldSpec; 31] = [
    FieldSpec {
        key: "age",
        label: "Age",
        unit: None,
        hint: "years (0-120)",
        kind: FieldKind::Bounded { min: 0.0, max: 120.0 },
        default: Some("45"),
    },
    choice("sex", "Sex", SEX_OPTIONS),
    bounded("height", "Height", "cm", "cm (120-220)", 120.0, 220.0, "170"),
    bounded("weight", "Weight", "kg", "kg (30-150)", 30.0, 150.0, "70"),
    bounded("heart_rate", "Heart Rate", "bpm", "bpm (40-200)", 40.0, 200.0, "75"),
    bounded("qrs_duration", "QRS Duration", "ms", "ms (40-300)", 40.0, 300.0, "100"),
    bounded("pr_interval", "P-R Interval", "ms", "ms (100-300)", 100.0, 300.0, "160"),
    bounded("qt_interval", "Q-T Interval", "ms", "ms (200-500)", 200.0, 500.0, "400"),
    free("t_interval", "T Interval", "ms", "160"),
    free("q_wave", "Q Wave", "mV", "0"),
    free("r_wave", "R Wave", "mV", "1"),
    free("s_wave", "S Wave", "mV", "0"),
    free("r_prime_wave", "R' Wave", "mV", "0"),
    free("s_prime_wave", "S' Wave", "mV", "0"),
    free("amp_r_wave", "Amplitude R Wave", "mV", "10"),
    free("jj_wave", "JJ Wave", "mV", "5"),
    choice("int_def", "Int Def", FLAG_OPTIONS),
    choice("qrsa", "QRSA", FLAG_OPTIONS),
    free("qrsta", "QRSTA", "mV", "20"),
    free("dii_mean", "DII Mean", "mV", "0"),
    free("diii_mean", "DIII Mean", "mV", "0"),
    free("avr_mean", "AVR Mean", "mV", "0"),
    free("avl_mean", "AVL Mean", "mV", "0"),
    free("avf_mean", "AVF Mean", "mV", "0"),
    free("v1_mean", "V1 Mean", "mV", "0"),
    free("dii_max", "DII Max", "mV", "1"),
    free("diii_max", "DIII Max", "mV", "1"),
    free("avr_max", "AVR Max", "mV", "1"),
    free("avl_max", "AVL Max", "mV", "1"),
    free("avf_max", "AVF Max", "mV", "1"),
    free("v1_max", "V1 Max", "mV", "1"),
];

/// Sample patient (tachycardic, wide QRS, long QT) for the form's "sample data" action.
pub const ARRHYTHMIA_SAMPLE: [(&str, &str); 9] = [
    ("age", "68"),
    ("sex", "1"),
    ("heart_rate", "130"),
    ("qrs_duration", "150"),
    ("pr_interval", "210"),
    ("qt_interval", "490"),
    ("s_wave", "2.5"),
    ("int_def", "1"),
    ("qrsa", "0"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn midpoint() -> ArrhythmiaInput {
        ArrhythmiaInput {
            age: 45.0,
            sex: Sex::Female,
            height: 170.0,
            weight: 70.0,
            heart_rate: 75.0,
            qrs_duration: 100.0,
            pr_interval: 160.0,
            qt_interval: 400.0,
            t_interval: 160.0,
            q_wave: 0.0,
            r_wave: 1.0,
            s_wave: 0.0,
            r_prime_wave: 0.0,
            s_prime_wave: 0.0,
            amp_r_wave: 10.0,
            jj_wave: 5.0,
            int_def: false,
            qrsa: false,
            qrsta: 20.0,
            lead_mean: LeadValues::default(),
            lead_max: LeadValues {
                dii: 1.0,
                diii: 1.0,
                avr: 1.0,
                avl: 1.0,
                avf: 1.0,
                v1: 1.0,
            },
        }
    }

    fn assert_well_formed(result: &ArrhythmiaResult) {
        let sum: f64 = result.probabilities.iter().map(|c| c.probability).sum();
        assert!((sum - 100.0).abs() < 0.01, "sum was {sum}");
        assert!(result.probabilities.iter().all(|c| c.probability >= 0.0));
        assert!(result
            .probabilities
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
        assert_eq!(result.most_likely, result.probabilities[0]);
    }

    #[test]
    fn test_boost_tags_match_class_names() {
        let markers = [
            (Boost::BundleBranchBlock, "Bundle Branch Block"),
            (Boost::Tachycardia, "Tachycardia"),
            (Boost::Bradycardia, "Bradycardia"),
            (Boost::Atrial, "Atrial"),
            (Boost::Ventricular, "Ventricular"),
        ];
        for class in ArrhythmiaClass::ALL.into_iter().skip(1) {
            for (boost, marker) in markers {
                assert_eq!(
                    class.boosts().contains(&boost),
                    class.name().contains(marker),
                    "{class} / {boost:?}"
                );
            }
        }
        assert!(!ArrhythmiaClass::SupraventricularArrhythmia
            .boosts()
            .contains(&Boost::Ventricular));
        assert_eq!(ArrhythmiaClass::VentricularTachycardia.boosts().len(), 2);
    }

    #[test]
    fn test_midpoint_is_normal() {
        let input = midpoint();
        assert!(input.deviation_score().abs() < f64::EPSILON);

        let result = ArrhythmiaResult::classify(&input);
        assert_well_formed(&result);
        assert_eq!(result.most_likely.class, ArrhythmiaClass::Normal);
        assert!((result.most_likely.probability - 85.0).abs() < 1e-9);
        assert_eq!(result.icon, AdvisoryIcon::Normal);
        assert_eq!(result.message, "Your ECG data appears normal.");
    }

    #[test]
    fn test_ties_keep_canonical_order() {
        let result = ArrhythmiaResult::classify(&midpoint());
        let rest: Vec<ArrhythmiaClass> = result.probabilities[1..].iter().map(|c| c.class).collect();
        assert_eq!(rest, ArrhythmiaClass::ALL[1..].to_vec());
    }

    #[test]
    fn test_deviation_rules_stack_and_cap() {
        let mut input = midpoint();
        input.heart_rate = 130.0;
        assert!((input.deviation_score() - 0.2).abs() < 1e-9);

        input.qrs_duration = 150.0;
        assert!((input.deviation_score() - 0.55).abs() < 1e-9);

        input.qt_interval = 490.0;
        input.int_def = true;
        input.qrsa = true;
        assert!((input.deviation_score() - MAX_DEVIATION).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wave_rules() {
        let mut input = midpoint();
        input.q_wave = -0.6;
        assert!((input.deviation_score() - 0.1).abs() < 1e-9);

        let mut input = midpoint();
        input.r_wave = 0.4;
        input.s_wave = -3.5;
        assert!((input.deviation_score() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_qrs_boundary_for_bundle_branch_boost() {
        let mut at = midpoint();
        at.qrs_duration = 120.0;
        let mut over = midpoint();
        over.qrs_duration = 121.0;

        assert!(!Boost::BundleBranchBlock.fires(&at));
        assert!(Boost::BundleBranchBlock.fires(&over));

        let at = ArrhythmiaResult::classify(&at);
        let over = ArrhythmiaResult::classify(&over);
        let lbbb_at = at.probability_of(ArrhythmiaClass::LeftBundleBranchBlock);
        let junctional_at = at.probability_of(ArrhythmiaClass::JunctionalArrhythmia);
        assert!((lbbb_at - junctional_at).abs() < 1e-12);

        let lbbb_over = over.probability_of(ArrhythmiaClass::LeftBundleBranchBlock);
        let junctional_over = over.probability_of(ArrhythmiaClass::JunctionalArrhythmia);
        assert!((lbbb_over - 2.0 * junctional_over).abs() < 1e-9);
    }

    #[test]
    fn test_boosts_compound() {
        let mut input = midpoint();
        input.heart_rate = 110.0;
        input.s_wave = 2.5;

        let result = ArrhythmiaResult::classify(&input);
        assert_well_formed(&result);

        let base = result.probability_of(ArrhythmiaClass::JunctionalArrhythmia);
        let vt = result.probability_of(ArrhythmiaClass::VentricularTachycardia);
        let st = result.probability_of(ArrhythmiaClass::SinusTachycardia);
        let vf = result.probability_of(ArrhythmiaClass::VentricularFibrillation);
        assert!((vt - 3.0 * base).abs() < 1e-9);
        assert!((st - 2.0 * base).abs() < 1e-9);
        assert!((vf - 1.5 * base).abs() < 1e-9);
    }

    #[test]
    fn test_sample_patient_gives_mixed_signals() {
        let form = ARRHYTHMIA_SAMPLE
            .iter()
            .fold(FormValues::with_defaults(&ARRHYTHMIA_FIELDS), |f, (k, v)| {
                f.with(k, *v)
            });
        let input = ArrhythmiaInput::from_form(&form).expect("sample should be valid");
        assert!((input.deviation_score() - MAX_DEVIATION).abs() < f64::EPSILON);

        let result = ArrhythmiaResult::classify(&input);
        assert_well_formed(&result);
        assert_eq!(result.most_likely.class, ArrhythmiaClass::VentricularTachycardia);
        assert_eq!(result.icon, AdvisoryIcon::Info);
        // Normal floor is max(0.01, 0.05)
        let normal = result.probability_of(ArrhythmiaClass::Normal);
        assert!(normal > 0.0 && normal < 5.0);
    }

    #[test]
    fn test_normal_below_half_is_info() {
        let mut input = midpoint();
        input.int_def = true;
        input.qrsa = true;
        input.age = 70.0;
        // deviation 0.30, Normal = 55 %
        let result = ArrhythmiaResult::classify(&input);
        assert_eq!(result.icon, AdvisoryIcon::Normal);

        input.q_wave = 0.8;
        input.heart_rate = 55.0;
        // deviation 0.50, Normal = 35 %
        let result = ArrhythmiaResult::classify(&input);
        assert_eq!(result.most_likely.class, ArrhythmiaClass::Normal);
        assert_eq!(result.icon, AdvisoryIcon::Info);
    }

    #[test]
    fn test_advisory_warning_names_class() {
        let top = ClassProbability {
            class: ArrhythmiaClass::AtrialFibrillation,
            probability: 31.0,
        };
        let (icon, message) = advisory(&top);
        assert_eq!(icon, AdvisoryIcon::Warning);
        assert_eq!(
            message,
            "Your ECG data suggests possible Atrial Fibrillation. Please consult a cardiologist."
        );

        let weak = ClassProbability { probability: 30.0, ..top };
        assert_eq!(advisory(&weak).0, AdvisoryIcon::Info);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let mut input = midpoint();
        input.heart_rate = 45.0;
        input.pr_interval = 230.0;
        let a = ArrhythmiaResult::classify(&input);
        let b = ArrhythmiaResult::classify(&input);
        assert_eq!(a, b);
        for (x, y) in a.probabilities.iter().zip(&b.probabilities) {
            assert_eq!(x.probability.to_bits(), y.probability.to_bits());
        }
    }

    #[test]
    fn test_form_validation_messages() {
        let form = FormValues::with_defaults(&ARRHYTHMIA_FIELDS)
            .with("height", "230")
            .with("heart_rate", "39")
            .with("qrs_duration", "301")
            .with("pr_interval", "99")
            .with("qt_interval", "501")
            .with("weight", "29");
        let err = ArrhythmiaInput::from_form(&form).expect_err("invalid");
        assert_eq!(
            err.messages,
            vec![
                "Sex is required",
                "Height must be between 120-220 cm",
                "Weight must be between 30-150 kg",
                "Heart Rate must be between 40-200 bpm",
                "QRS Duration must be between 40-300 ms",
                "P-R Interval must be between 100-300 ms",
                "Q-T Interval must be between 200-500 ms",
                "Int Def is required",
                "QRSA is required",
            ]
        );
    }

    #[test]
    fn test_result_wire_shape() {
        let result = ArrhythmiaResult::classify(&midpoint());
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["icon"], "normal");
        assert_eq!(json["mostLikely"]["class"], "Normal");
        assert_eq!(json["probabilities"].as_array().map(Vec::len), Some(15));
        assert_eq!(
            json["probabilities"][1]["class"],
            "Left Bundle Branch Block"
        );
    }
}
