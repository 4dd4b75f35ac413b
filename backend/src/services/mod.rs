//! Business logic services for the Crop Yield Platform

pub mod analytics;
pub mod prediction;
pub mod training;

pub use analytics::AnalyticsService;
pub use prediction::PredictionService;
pub use training::TrainingService;
