//! Crop recommendation and irrigation pump decisions.
//!
//! The pump decision itself is [`logic::decide`]: a pure function of a crop's
//! [`models::CropRequirement`] and the current soil and weather readings.
//! Requirements come from a [`catalog::CropCatalog`] loaded once at startup.

pub mod catalog;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;

pub use catalog::CropCatalog;
pub use error::{AgriSenseError, Result};
pub use logic::{decide, PumpController};
pub use models::{CropRequirement, PumpDecision, SensorReading, WeatherReading};
