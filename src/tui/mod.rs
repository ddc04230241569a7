//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home with classifier status and dataset notes
//! - Predict form (Smart/Expert)
//! - Result with optional probability gauge
//! - Health tips

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
