//! Noise adapters: Implementations of `NoiseSource`.
//!
//! - `ChaChaNoise`: ChaCha20 CSPRNG, seeded from OS entropy or a fixed seed
//! - `FixedNoise`: returns a constant, for deterministic assertions
//!
//! # Mutex Behavior
//!
//! `ChaChaNoise` keeps its RNG behind a `Mutex` so it can be shared between
//! concurrent assessments. A poisoned mutex fails closed with
//! `NoiseError::Unavailable`.

use std::sync::Mutex;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::ports::{NoiseError, NoiseSource};

/// Environment variable pinning the generator seed.
pub const NOISE_SEED_ENV: &str = "HEARTWISE_NOISE_SEED";

fn check_amplitude(amplitude: f64) -> Result<(), NoiseError> {
    if amplitude.is_finite() && amplitude > 0.0 {
        Ok(())
    } else {
        Err(NoiseError::InvalidAmplitude(amplitude.to_string()))
    }
}

/// CSPRNG-backed uniform noise.
pub struct ChaChaNoise {
    rng: Mutex<ChaCha20Rng>,
}

impl ChaChaNoise {
    /// Seed from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Seed deterministically. Equal seeds yield equal sequences.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    /// Use `HEARTWISE_NOISE_SEED` when set to a valid `u64`, entropy otherwise.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        match std::env::var(NOISE_SEED_ENV) {
            Ok(v) => match v.trim().parse::<u64>() {
                Ok(seed) => {
                    tracing::info!("CAD noise generator pinned by {}", NOISE_SEED_ENV);
                    Self::with_seed(seed)
                }
                Err(_) => {
                    tracing::warn!("Ignoring invalid {} value, seeding from entropy", NOISE_SEED_ENV);
                    Self::from_entropy()
                }
            },
            Err(_) => Self::from_entropy(),
        }
    }
}

impl Default for ChaChaNoise {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl NoiseSource for ChaChaNoise {
    fn sample(&self, amplitude: f64) -> Result<f64, NoiseError> {
        check_amplitude(amplitude)?;
        let mut rng = self.rng.lock().map_err(|_| NoiseError::Unavailable)?;
        Ok(rng.gen_range(-amplitude..amplitude))
    }
}

/// Constant "noise", clamped into `[-amplitude, amplitude]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn sample(&self, amplitude: f64) -> Result<f64, NoiseError> {
        check_amplitude(amplitude)?;
        Ok(self.0.clamp(-amplitude, amplitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_band() {
        let noise = ChaChaNoise::with_seed(7);
        for _ in 0..10_000 {
            let v = noise.sample(5.0).expect("sample");
            assert!((-5.0..5.0).contains(&v), "out of band: {v}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = ChaChaNoise::with_seed(42);
        let b = ChaChaNoise::with_seed(42);
        for _ in 0..100 {
            let x = a.sample(5.0).expect("sample");
            let y = b.sample(5.0).expect("sample");
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_samples_cover_both_signs() {
        let noise = ChaChaNoise::with_seed(1);
        let samples: Vec<f64> = (0..1000).map(|_| noise.sample(5.0).expect("sample")).collect();
        assert!(samples.iter().any(|v| *v < -2.5));
        assert!(samples.iter().any(|v| *v > 2.5));
    }

    #[test]
    fn test_invalid_amplitude() {
        let noise = ChaChaNoise::with_seed(3);
        assert!(matches!(noise.sample(0.0), Err(NoiseError::InvalidAmplitude(_))));
        assert!(matches!(noise.sample(f64::NAN), Err(NoiseError::InvalidAmplitude(_))));
        assert!(matches!(FixedNoise(1.0).sample(-1.0), Err(NoiseError::InvalidAmplitude(_))));
    }

    #[test]
    fn test_fixed_noise_is_clamped() {
        assert!((FixedNoise(2.0).sample(5.0).expect("sample") - 2.0).abs() < f64::EPSILON);
        assert!((FixedNoise(9.0).sample(5.0).expect("sample") - 5.0).abs() < f64::EPSILON);
        assert!((FixedNoise(-9.0).sample(5.0).expect("sample") + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shared_across_threads() {
        let noise = std::sync::Arc::new(ChaChaNoise::with_seed(11));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let noise = noise.clone();
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| noise.sample(5.0).expect("sample"))
                        .all(|v| (-5.0..5.0).contains(&v))
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().expect("thread"));
        }
    }
}
