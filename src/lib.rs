//! # Heartwise
//!
//! Heart health assessment tools.
//!
//! This crate provides:
//! - A coronary artery disease (CAD) risk predictor
//! - An arrhythmia probability classifier over 15 classes
//! - Terminal UI for entering measurements and reading results
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Inputs, field schemas, validation and scoring rules
//! - `ports`: Trait definitions for external collaborators (noise source)
//! - `adapters`: Concrete implementations (ChaCha20 noise, fixed noise)
//! - `application`: Validate-then-score use cases
//! - `tui`: Terminal user interface
//!
//! These are heuristic scores for education only, not a diagnosis.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::{ArrhythmiaScorer, CadRiskScorer};
pub use domain::{ArrhythmiaResult, CadResult, FormValues, ValidationError};

/// Result type for Heartwise operations
pub type Result<T> = std::result::Result<T, HeartwiseError>;

/// Main error type for Heartwise
#[derive(Debug, thiserror::Error)]
pub enum HeartwiseError {
    #[error("Invalid input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Noise source failed: {0}")]
    Noise(#[from] ports::NoiseError),
}
