//! Database models for the Crop Yield Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
