//! Domain layer: Core assessment types and scoring rules.
//!
//! Pure Rust with no I/O. Inputs are only constructed from validated form
//! values; results are plain serializable records.

pub mod arrhythmia;
pub mod cad;
mod form;

pub use arrhythmia::{
    advisory, AdvisoryIcon, ArrhythmiaClass, ArrhythmiaInput, ArrhythmiaResult, Boost,
    ClassProbability, LeadValues, ARRHYTHMIA_FIELDS, ARRHYTHMIA_SAMPLE,
};
pub use cad::{
    CadInput, CadResult, ChestPainType, RestingEcg, Sex, StSlope, Thalassemia, CAD_FIELDS,
    CAD_SAMPLE,
};
pub use form::{ChoiceOption, FieldKind, FieldSpec, FormValues, ValidationError};
