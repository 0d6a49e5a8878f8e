//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the scoring logic and its collaborators.

mod noise;

pub use noise::{NoiseError, NoiseSource};
