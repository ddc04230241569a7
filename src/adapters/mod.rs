//! Adapters layer: Concrete implementations of ports.
//!
//! - `forest`: tree-ensemble classifier loaded from the exported artifact
//! - `sanitize`: patient-value filtering for logs

pub mod forest;
pub mod sanitize;

pub use forest::{ForestClassifier, ModelInfo, Voting};
