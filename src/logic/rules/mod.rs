pub mod engine;
pub mod humidity_range;
pub mod moisture_deficit;
pub mod rain_imminent;
pub mod rainfall_range;
pub mod temperature_range;

pub use engine::{decide, PumpRulesEngine};

use crate::models::{CropRequirement, Decision, SensorReading, WeatherReading};

/// Forecast rainfall (mm over 6h) at or above which rain counts as imminent.
pub const RAIN_IMMINENT_MM: f64 = 5.0;

/// Trait for pump actuation rules
pub trait PumpRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a decision if it fires.
    ///
    /// A rule that fires settles the decision; rules after it are not consulted.
    fn evaluate(
        &self,
        requirement: &CropRequirement,
        sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision>;
}
