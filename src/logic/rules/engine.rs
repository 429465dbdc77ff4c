use super::{
    humidity_range::HumidityRangeRule, moisture_deficit::MoistureDeficitRule,
    rain_imminent::RainImminentRule, rainfall_range::RainfallRangeRule,
    temperature_range::TemperatureRangeRule, PumpRule,
};
use crate::models::{
    CropRequirement, Decision, DecisionReason, PumpDecision, SensorReading, WeatherReading,
};
use std::sync::LazyLock;

/// Ordered pump rules. The first rule that fires decides; when none fires the
/// pump stays off.
pub struct PumpRulesEngine {
    rules: Vec<Box<dyn PumpRule>>,
}

impl PumpRulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn PumpRule>> = vec![
            Box::new(MoistureDeficitRule),
            Box::new(TemperatureRangeRule),
            Box::new(HumidityRangeRule),
            Box::new(RainfallRangeRule),
            Box::new(RainImminentRule),
        ];

        Self { rules }
    }

    pub fn evaluate(
        &self,
        requirement: &CropRequirement,
        sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Decision {
        let fired = self.rules.iter().find_map(|rule| {
            rule.evaluate(requirement, sensor, weather)
                .map(|decision| (rule.id(), decision))
        });

        match fired {
            Some((rule_id, decision)) => {
                tracing::debug!(rule = rule_id, status = %decision.status, "Pump rule fired");
                decision
            }
            None => Decision::new(PumpDecision::Off, DecisionReason::Nominal),
        }
    }

    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        requirement: &CropRequirement,
        sensor: &SensorReading,
        weather: &WeatherReading,
    ) -> Option<Decision> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .and_then(|rule| rule.evaluate(requirement, sensor, weather))
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

static SHARED_ENGINE: LazyLock<PumpRulesEngine> = LazyLock::new(PumpRulesEngine::new);

impl PumpRulesEngine {
    /// Process-wide engine with the standard rule order, built on first use.
    pub fn shared() -> &'static PumpRulesEngine {
        &SHARED_ENGINE
    }
}

impl Default for PumpRulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide whether the pump should run for the given crop requirements and readings.
///
/// Total and deterministic: no I/O, no failure path.
pub fn decide(
    requirement: &CropRequirement,
    sensor: &SensorReading,
    weather: &WeatherReading,
) -> PumpDecision {
    PumpRulesEngine::shared()
        .evaluate(requirement, sensor, weather)
        .status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdealRange;
    use proptest::prelude::*;

    fn eval(moisture: u8, temperature: f64, humidity: f64, rainfall: f64) -> Decision {
        PumpRulesEngine::new().evaluate(
            &CropRequirement::default(),
            &SensorReading::new(moisture),
            &WeatherReading::new(temperature, humidity, rainfall),
        )
    }

    #[test]
    fn rules_run_in_priority_order() {
        let ids: Vec<_> = PumpRulesEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "moisture_deficit",
                "temperature_range",
                "humidity_range",
                "rainfall_range",
                "rain_imminent",
            ]
        );
    }

    #[test]
    fn dry_soil_without_rain_turns_pump_on() {
        let decision = eval(15, 25.0, 50.0, 2.0);
        assert_eq!(decision.status, PumpDecision::On);
        assert_eq!(decision.reason, DecisionReason::MoistureDeficit);
    }

    #[test]
    fn hot_weather_turns_pump_on() {
        let decision = eval(50, 45.0, 50.0, 0.0);
        assert_eq!(decision.status, PumpDecision::On);
        assert_eq!(decision.reason, DecisionReason::TemperatureOutOfRange);
    }

    #[test]
    fn humidity_anomaly_turns_pump_on() {
        let decision = eval(50, 25.0, 90.0, 0.0);
        assert_eq!(decision.status, PumpDecision::On);
        assert_eq!(decision.reason, DecisionReason::HumidityOutOfRange);
    }

    #[test]
    fn rain_expected_keeps_pump_off() {
        let decision = eval(50, 25.0, 50.0, 10.0);
        assert_eq!(decision.status, PumpDecision::Off);
        assert_eq!(decision.reason, DecisionReason::RainImminent);
    }

    #[test]
    fn nominal_conditions_keep_pump_off() {
        let decision = eval(50, 25.0, 50.0, 1.0);
        assert_eq!(decision.status, PumpDecision::Off);
        assert_eq!(decision.reason, DecisionReason::Nominal);
    }

    #[test]
    fn moisture_at_minimum_does_not_trigger_deficit() {
        let decision = eval(20, 25.0, 50.0, 0.0);
        assert_eq!(decision.status, PumpDecision::Off);
        assert_eq!(decision.reason, DecisionReason::Nominal);
    }

    #[test]
    fn five_mm_rain_is_imminent_not_deficit() {
        let decision = eval(10, 25.0, 50.0, 5.0);
        assert_eq!(decision.status, PumpDecision::Off);
        assert_eq!(decision.reason, DecisionReason::RainImminent);
    }

    #[test]
    fn deficit_overrides_range_anomalies() {
        let decision = eval(5, 45.0, 95.0, 0.0);
        assert_eq!(decision.reason, DecisionReason::MoistureDeficit);
    }

    #[test]
    fn temperature_checked_before_humidity() {
        let decision = eval(50, 2.0, 10.0, 0.0);
        assert_eq!(decision.reason, DecisionReason::TemperatureOutOfRange);
    }

    #[test]
    fn heavy_rain_above_crop_max_still_turns_pump_on() {
        let requirement = CropRequirement {
            rainfall: IdealRange::new(0.0, 4.0),
            ..CropRequirement::default()
        };
        let decision = PumpRulesEngine::new().evaluate(
            &requirement,
            &SensorReading::new(50),
            &WeatherReading::new(25.0, 50.0, 20.0),
        );
        assert_eq!(decision.status, PumpDecision::On);
        assert_eq!(decision.reason, DecisionReason::RainfallOutOfRange);
    }

    #[test]
    fn rain_below_crop_min_turns_pump_on() {
        let requirement = CropRequirement {
            rainfall: IdealRange::new(2.0, 50.0),
            ..CropRequirement::default()
        };
        let decision = PumpRulesEngine::new().evaluate(
            &requirement,
            &SensorReading::new(50),
            &WeatherReading::new(25.0, 50.0, 0.5),
        );
        assert_eq!(decision.reason, DecisionReason::RainfallOutOfRange);
    }

    #[test]
    fn evaluate_single_rule() {
        let engine = PumpRulesEngine::new();
        let req = CropRequirement::default();
        let sensor = SensorReading::new(50);
        let hot = WeatherReading::new(41.0, 50.0, 0.0);

        assert!(engine
            .evaluate_rule("temperature_range", &req, &sensor, &hot)
            .is_some());
        assert!(engine
            .evaluate_rule("humidity_range", &req, &sensor, &hot)
            .is_none());
        assert!(engine
            .evaluate_rule("no_such_rule", &req, &sensor, &hot)
            .is_none());
    }

    #[test]
    fn shared_engine_is_built_once() {
        let first = PumpRulesEngine::shared();
        let second = PumpRulesEngine::shared();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.list_rules(), PumpRulesEngine::new().list_rules());
    }

    #[test]
    fn decide_returns_status_only() {
        let req = CropRequirement::default();
        assert_eq!(
            decide(
                &req,
                &SensorReading::new(15),
                &WeatherReading::new(25.0, 50.0, 2.0)
            ),
            PumpDecision::On
        );
        assert_eq!(
            decide(
                &req,
                &SensorReading::new(50),
                &WeatherReading::new(25.0, 50.0, 1.0)
            ),
            PumpDecision::Off
        );
    }

    proptest! {
        #[test]
        fn decide_is_deterministic(
            moisture in 0u8..=100,
            temperature in -20.0f64..60.0,
            humidity in 0.0f64..100.0,
            rainfall in 0.0f64..600.0,
        ) {
            let req = CropRequirement::default();
            let sensor = SensorReading::new(moisture);
            let weather = WeatherReading::new(temperature, humidity, rainfall);

            prop_assert_eq!(
                decide(&req, &sensor, &weather),
                decide(&req, &sensor, &weather)
            );
        }

        #[test]
        fn off_only_when_no_on_rule_applies(
            moisture in 0u8..=100,
            temperature in -20.0f64..60.0,
            humidity in 0.0f64..100.0,
            rainfall in 0.0f64..600.0,
        ) {
            let req = CropRequirement::default();
            let sensor = SensorReading::new(moisture);
            let weather = WeatherReading::new(temperature, humidity, rainfall);
            let decision = PumpRulesEngine::new().evaluate(&req, &sensor, &weather);

            let deficit = f64::from(moisture) < req.soil_moisture.min && rainfall < 5.0;
            let anomaly = !req.temperature.contains(temperature)
                || !req.humidity.contains(humidity)
                || !req.rainfall.contains(rainfall);

            prop_assert_eq!(decision.status == PumpDecision::On, deficit || anomaly);
            if deficit {
                prop_assert_eq!(decision.reason, DecisionReason::MoistureDeficit);
            }
        }
    }
}
