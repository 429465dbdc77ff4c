use super::PumpRule;
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};

/// Humidity anomaly rule - runs the pump when relative humidity is outside
/// the crop's ideal band.
pub struct HumidityRangeRule;

impl PumpRule for HumidityRangeRule {
    fn id(&self) -> &'static str {
        "humidity_range"
    }

    fn name(&self) -> &'static str {
        "Humidity Out of Range"
    }

    fn evaluate(
        &self,
        requirement: &CropRequirement,
        _sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        if requirement.humidity.contains(weather.humidity) {
            return None;
        }

        Some(Decision::new(
            PumpDecision::On,
            DecisionReason::HumidityOutOfRange,
        ))
    }
}
