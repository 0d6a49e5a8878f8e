//! Application layer: Assessment use cases.
//!
//! Each scorer validates raw form values first and only scores when the
//! form is clean.

mod arrhythmia;
mod cad;

pub use arrhythmia::ArrhythmiaScorer;
pub use cad::CadRiskScorer;
