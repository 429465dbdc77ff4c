use super::PumpRule;
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};

/// Temperature anomaly rule - runs the pump when air temperature leaves the
/// crop's ideal band, in either direction.
pub struct TemperatureRangeRule;

impl PumpRule for TemperatureRangeRule {
    fn id(&self) -> &'static str {
        "temperature_range"
    }

    fn name(&self) -> &'static str {
        "Temperature Out of Range"
    }

    fn evaluate(
        &self,
        requirement: &CropRequirement,
        _sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        if requirement.temperature.contains(weather.temperature) {
            return None;
        }

        Some(Decision::new(
            PumpDecision::On,
            DecisionReason::TemperatureOutOfRange,
        ))
    }
}
