//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Choosing an assessment
//! - Entering measurements with inline validation
//! - Reading CAD risk and arrhythmia results

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
