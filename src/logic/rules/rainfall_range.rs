use super::PumpRule;
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};

/// Rainfall anomaly rule - runs the pump when forecast rainfall is outside the
/// crop's ideal band.
///
/// This fires ON for rainfall *above* the band as well, even when that rainfall
/// would also count as imminent rain. Being checked earlier, it wins over
/// `RainImminentRule` in that case.
pub struct RainfallRangeRule;

impl PumpRule for RainfallRangeRule {
    fn id(&self) -> &'static str {
        "rainfall_range"
    }

    fn name(&self) -> &'static str {
        "Rainfall Out of Range"
    }

    fn evaluate(
        &self,
        requirement: &CropRequirement,
        _sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        if requirement.rainfall.contains(weather.rainfall) {
            return None;
        }

        Some(Decision::new(
            PumpDecision::On,
            DecisionReason::RainfallOutOfRange,
        ))
    }
}
