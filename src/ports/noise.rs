//! Noise port: Trait for the random perturbation applied to CAD probabilities.
//!
//! Keeping the generator behind a trait lets production use a CSPRNG while
//! tests pin the perturbation to a known value.

/// Errors that can occur while sampling noise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoiseError {
    #[error("Noise RNG unavailable")]
    Unavailable,

    #[error("Invalid noise amplitude: {0}")]
    InvalidAmplitude(String),
}

/// Source of uniform perturbations.
///
/// Implementations must be safe to share across threads; sampling takes
/// `&self`.
pub trait NoiseSource: Send + Sync {
    /// Draw a value uniformly from `[-amplitude, amplitude)`.
    ///
    /// # Errors
    /// Returns `NoiseError::InvalidAmplitude` for non-finite or non-positive
    /// amplitudes and `NoiseError::Unavailable` if the generator cannot be used.
    fn sample(&self, amplitude: f64) -> Result<f64, NoiseError>;
}
