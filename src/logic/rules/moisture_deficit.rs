use super::{PumpRule, RAIN_IMMINENT_MM};
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};

/// Moisture deficit rule - irrigate dry soil when no meaningful rain is coming
///
/// Conditions:
/// - Soil moisture strictly below the crop's minimum
/// - Forecast rainfall under 5mm for the next 6 hours
///
/// Checked before every other rule, so it overrides any range anomaly.
pub struct MoistureDeficitRule;

impl PumpRule for MoistureDeficitRule {
    fn id(&self) -> &'static str {
        "moisture_deficit"
    }

    fn name(&self) -> &'static str {
        "Soil Moisture Deficit"
    }

    fn evaluate(
        &self,
        requirement: &CropRequirement,
        sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        let dry = requirement
            .soil_moisture
            .is_below(f64::from(sensor.soil_moisture));
        let no_rain = weather.rainfall < RAIN_IMMINENT_MM;

        if dry && no_rain {
            Some(Decision::new(PumpDecision::On, DecisionReason::MoistureDeficit))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(rainfall: f64) -> WeatherReading {
        WeatherReading::new(25.0, 50.0, rainfall)
    }

    #[test]
    fn fires_when_dry_and_no_rain() {
        let req = CropRequirement::default();
        let decision = MoistureDeficitRule.evaluate(&req, &SensorReading::new(15), &weather(2.0));
        assert_eq!(
            decision,
            Some(Decision::new(PumpDecision::On, DecisionReason::MoistureDeficit))
        );
    }

    #[test]
    fn moisture_at_minimum_is_not_a_deficit() {
        let req = CropRequirement::default();
        let sensor = SensorReading::new(req.soil_moisture.min as u8);
        assert!(MoistureDeficitRule
            .evaluate(&req, &sensor, &weather(0.0))
            .is_none());
    }

    #[test]
    fn rain_of_five_mm_suppresses_rule() {
        let req = CropRequirement::default();
        assert!(MoistureDeficitRule
            .evaluate(&req, &SensorReading::new(5), &weather(5.0))
            .is_none());
        assert!(MoistureDeficitRule
            .evaluate(&req, &SensorReading::new(5), &weather(4.99))
            .is_some());
    }
}
