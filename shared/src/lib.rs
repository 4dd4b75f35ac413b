//! Shared types and domain logic for the Crop Yield Platform
//!
//! This crate contains the models, validation helpers, economic-analysis
//! formulas, and the yield-prediction engine shared between the backend
//! and other components of the system.

pub mod economics;
pub mod ml;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
