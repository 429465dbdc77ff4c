use super::{PumpRule, RAIN_IMMINENT_MM};
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};

/// Rain delay rule - keeps the pump off when at least 5mm is forecast for the
/// next 6 hours.
pub struct RainImminentRule;

impl PumpRule for RainImminentRule {
    fn id(&self) -> &'static str {
        "rain_imminent"
    }

    fn name(&self) -> &'static str {
        "Rain Imminent"
    }

    fn evaluate(
        &self,
        _requirement: &CropRequirement,
        _sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        if weather.rainfall >= RAIN_IMMINENT_MM {
            Some(Decision::new(PumpDecision::Off, DecisionReason::RainImminent))
        } else {
            None
        }
    }
}
