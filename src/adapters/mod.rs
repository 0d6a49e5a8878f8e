//! Adapters layer: Concrete implementations of ports.
//!
//! - `noise`: ChaCha20 and fixed-value noise sources for the CAD scorer

pub mod noise;

pub use noise::{ChaChaNoise, FixedNoise};
