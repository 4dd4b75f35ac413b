//! Domain models for the Crop Yield Platform

mod economics;
mod features;
mod prediction;

pub use economics::*;
pub use features::*;
pub use prediction::*;
