//! HTTP handlers for the Crop Yield Platform

pub mod economics;
pub mod health;
pub mod model;
pub mod prediction;

pub use economics::*;
pub use health::*;
pub use model::*;
pub use prediction::*;
