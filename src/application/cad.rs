//! CAD risk scorer: validation, weighted risk score, noise and clamping.

use std::sync::Arc;

use crate::domain::cad::NOISE_AMPLITUDE;
use crate::domain::{CadInput, CadResult, FormValues};
use crate::ports::NoiseSource;

/// Scores CAD risk with an injected noise source.
///
/// The probability is intentionally perturbed by uniform noise in
/// `[-5, +5)` points, so repeated calls with the same input may differ.
/// Pin the noise source (see `FixedNoise` / `ChaChaNoise::with_seed`) for
/// reproducible output.
pub struct CadRiskScorer<N>
where
    N: NoiseSource,
{
    noise: Arc<N>,
}

impl<N> CadRiskScorer<N>
where
    N: NoiseSource,
{
    pub fn new(noise: Arc<N>) -> Self {
        Self { noise }
    }

    /// Score an already-validated input.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Noise` if the noise source cannot be sampled.
    pub fn score(&self, input: &CadInput) -> crate::Result<CadResult> {
        let risk_score = input.risk_score();
        let noise = self.noise.sample(NOISE_AMPLITUDE)?;
        tracing::debug!("CAD risk score={:.2}, noise={:+.2}", risk_score, noise);

        let result = CadResult::from_risk_score(risk_score, noise);
        tracing::info!(
            "CAD assessment complete: probability={}%, has_cad={}",
            result.probability,
            result.has_cad
        );
        Ok(result)
    }

    /// Validate raw form values, then score.
    ///
    /// Scoring is never reached when validation reports any error.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Validation` with every message, or
    /// `HeartwiseError::Noise` if sampling fails.
    pub fn assess(&self, form: &FormValues) -> crate::Result<CadResult> {
        let input = CadInput::from_form(form).map_err(|e| {
            tracing::warn!("CAD submission blocked: {} validation error(s)", e.messages.len());
            e
        })?;
        self.score(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeartwiseError;
    use crate::adapters::{ChaChaNoise, FixedNoise};
    use crate::domain::{ChestPainType, RestingEcg, Sex, StSlope, Thalassemia, CAD_FIELDS, CAD_SAMPLE};
    use crate::ports::NoiseError;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    struct BrokenNoise;

    impl NoiseSource for BrokenNoise {
        fn sample(&self, _amplitude: f64) -> Result<f64, NoiseError> {
            Err(NoiseError::Unavailable)
        }
    }

    struct CountingNoise(std::sync::atomic::AtomicUsize);

    impl NoiseSource for CountingNoise {
        fn sample(&self, _amplitude: f64) -> Result<f64, NoiseError> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(0.0)
        }
    }

    fn sample_form() -> FormValues {
        CAD_SAMPLE
            .iter()
            .fold(FormValues::with_defaults(&CAD_FIELDS), |form, (k, v)| {
                form.with(k, *v)
            })
    }

    fn random_input(rng: &mut ChaCha20Rng) -> CadInput {
        let pick = |rng: &mut ChaCha20Rng, n: u8| rng.gen_range(0..n);
        CadInput {
            age: f64::from(rng.gen_range(0..=120_u32)),
            sex: if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female },
            chest_pain: match pick(rng, 4) {
                0 => ChestPainType::TypicalAngina,
                1 => ChestPainType::AtypicalAngina,
                2 => ChestPainType::NonAnginalPain,
                _ => ChestPainType::Asymptomatic,
            },
            resting_bp: f64::from(rng.gen_range(80..=200_u32)),
            cholesterol: f64::from(rng.gen_range(100..=600_u32)),
            fasting_blood_sugar: rng.gen_bool(0.5),
            resting_ecg: match pick(rng, 3) {
                0 => RestingEcg::Normal,
                1 => RestingEcg::StTAbnormality,
                _ => RestingEcg::LeftVentricularHypertrophy,
            },
            max_heart_rate: f64::from(rng.gen_range(60..=220_u32)),
            exercise_angina: rng.gen_bool(0.5),
            st_depression: rng.gen_range(0.0..=7.0),
            st_slope: match pick(rng, 3) {
                0 => StSlope::Upsloping,
                1 => StSlope::Flat,
                _ => StSlope::Downsloping,
            },
            major_vessels: pick(rng, 5),
            thalassemia: match pick(rng, 3) {
                0 => Thalassemia::Normal,
                1 => Thalassemia::FixedDefect,
                _ => Thalassemia::ReversibleDefect,
            },
        }
    }

    #[test]
    fn test_high_risk_scenario_is_positive_regardless_of_noise() {
        for noise in [-5.0, -2.5, 0.0, 4.99] {
            let scorer = CadRiskScorer::new(Arc::new(FixedNoise(noise)));
            let result = scorer.assess(&sample_form()).expect("should assess");
            assert!((result.probability - 95.0).abs() < f64::EPSILON);
            assert!(result.has_cad);
        }
    }

    #[test]
    fn test_output_in_band_and_flag_consistent() {
        let scorer = CadRiskScorer::new(Arc::new(ChaChaNoise::with_seed(2024)));
        let mut rng = ChaCha20Rng::seed_from_u64(99);

        for _ in 0..2_000 {
            let input = random_input(&mut rng);
            let result = scorer.score(&input).expect("should score");
            assert!((5.0..=95.0).contains(&result.probability));
            assert!((result.probability - result.probability.round()).abs() < f64::EPSILON);
            if result.probability > 50.0 {
                assert!(result.has_cad);
            }
            if result.probability < 50.0 {
                assert!(!result.has_cad);
            }
        }
    }

    #[test]
    fn test_repeated_calls_stay_within_noise_band() {
        let scorer = CadRiskScorer::new(Arc::new(ChaChaNoise::with_seed(5)));
        let input = CadInput::from_form(
            &sample_form()
                .with("age", "50")
                .with("cp", "1")
                .with("trestbps", "120")
                .with("chol", "190")
                .with("thalach", "150")
                .with("exang", "0")
                .with("oldpeak", "0.5")
                .with("ca", "0")
                .with("thal", "0"),
        )
        .expect("valid");
        // 0.05 + 0.10 + 0.10 + 0.05 = 0.30
        let base = input.risk_score() * 100.0;

        let probabilities: Vec<f64> = (0..500)
            .map(|_| scorer.score(&input).expect("score").probability)
            .collect();
        let min = probabilities.iter().copied().fold(f64::INFINITY, f64::min);
        let max = probabilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        assert!(min >= (base - 5.0).round());
        assert!(max <= (base + 5.0).round());
        assert!(max - min <= 10.0);
        assert!(max > min, "noise should vary the output");
    }

    #[test]
    fn test_fixed_noise_is_reproducible() {
        let scorer = CadRiskScorer::new(Arc::new(FixedNoise(1.2)));
        let input = CadInput::from_form(&sample_form().with("age", "40").with("ca", "0"))
            .expect("valid");
        let a = scorer.score(&input).expect("score");
        let b = scorer.score(&input).expect("score");
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_blocks_scoring() {
        let noise = Arc::new(CountingNoise(std::sync::atomic::AtomicUsize::new(0)));
        let scorer = CadRiskScorer::new(noise.clone());

        let mut form = sample_form();
        form.set("sex", "");
        form.set("chol", "700");

        match scorer.assess(&form) {
            Err(HeartwiseError::Validation(e)) => {
                assert!(e.contains("Sex is required"));
                assert!(e.contains("Cholesterol must be between 100-600"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(noise.0.load(std::sync::atomic::Ordering::SeqCst), 0);

        scorer.assess(&sample_form()).expect("valid form");
        assert_eq!(noise.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noise_failure_propagates() {
        let scorer = CadRiskScorer::new(Arc::new(BrokenNoise));
        let err = scorer.assess(&sample_form()).expect_err("noise is broken");
        assert!(matches!(err, HeartwiseError::Noise(NoiseError::Unavailable)));
    }
}
