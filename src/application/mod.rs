//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assembler;
mod prediction;
mod resolver;
mod session;

pub use assembler::FeatureAssembler;
pub use prediction::PredictionService;
pub use resolver::RiskResolver;
pub use session::PredictionSession;
