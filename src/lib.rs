//! # Cardiocheck
//!
//! Heart-disease risk screening front end for a pre-trained binary classifier.
//!
//! This crate provides:
//! - Feature assembly from a lifestyle survey (Smart Mode) or clinical
//!   measurements (Expert Mode) into the fixed 13-slot feature vector
//! - Risk resolution from classifier output into a label and probability band
//! - Terminal UI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (FeatureVector, answers, PredictionResult)
//! - `ports`: Trait definitions for external collaborators (the classifier)
//! - `adapters`: Concrete implementations (tree-ensemble artifact, log sanitizing)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FeatureVector, PatientAnswers, PredictionResult, RiskBand, RiskLabel};

/// Result type for Cardiocheck operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for Cardiocheck
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    /// The classifier artifact could not be loaded. Fatal at startup.
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The classifier failed or returned malformed output for one request.
    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    /// Feature count or value outside its domain; raised before the
    /// classifier is called.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
