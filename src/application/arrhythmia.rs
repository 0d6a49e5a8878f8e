//! Arrhythmia scorer: validation and class distribution.

use crate::domain::{ArrhythmiaInput, ArrhythmiaResult, FormValues};

/// Deterministic arrhythmia classifier.
///
/// Holds no state; the same input always yields a bit-identical result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrhythmiaScorer;

impl ArrhythmiaScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify an already-validated input.
    #[must_use]
    pub fn score(&self, input: &ArrhythmiaInput) -> ArrhythmiaResult {
        tracing::debug!("Arrhythmia deviation score={:.2}", input.deviation_score());

        let result = ArrhythmiaResult::classify(input);
        tracing::info!(
            "Arrhythmia assessment complete: most_likely={}, probability={:.1}%, icon={:?}",
            result.most_likely.class,
            result.most_likely.probability,
            result.icon
        );
        result
    }

    /// Validate raw form values, then classify.
    ///
    /// # Errors
    /// Returns `HeartwiseError::Validation` with every message when any field
    /// is invalid; classification is not run in that case.
    pub fn assess(&self, form: &FormValues) -> crate::Result<ArrhythmiaResult> {
        let input = ArrhythmiaInput::from_form(form).map_err(|e| {
            tracing::warn!(
                "Arrhythmia submission blocked: {} validation error(s)",
                e.messages.len()
            );
            e
        })?;
        Ok(self.score(&input))
    }
}
