use super::rules::PumpRulesEngine;
use crate::catalog::CropCatalog;
use crate::models::{
    CropRequirement, Decision, PumpStatusRecord, SensorReading, SensorReport, WeatherReading,
    WeatherReport,
};
use std::sync::Arc;
use tracing::info;

/// Resolves a crop's requirements from the shared catalog and runs the pump rules.
///
/// Holds no mutable state; clones share the same catalog.
#[derive(Clone)]
pub struct PumpController {
    catalog: Arc<CropCatalog>,
    engine: Arc<PumpRulesEngine>,
}

impl PumpController {
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self {
            catalog,
            engine: Arc::new(PumpRulesEngine::new()),
        }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn requirement(&self, crop: &str) -> CropRequirement {
        self.catalog.lookup(crop)
    }

    pub fn decide(&self, crop: &str, sensor: &SensorReading, weather: &WeatherReading) -> Decision {
        let requirement = self.requirement(crop);
        let decision = self.engine.evaluate(&requirement, sensor, weather);

        info!(
            crop,
            known_crop = self.catalog.contains(crop),
            temperature = weather.temperature,
            humidity = weather.humidity,
            rainfall = weather.rainfall,
            soil_moisture = sensor.soil_moisture,
            pump = %decision.status,
            reason = %decision.reason,
            "Pump decision"
        );

        decision
    }

    /// Normalize raw readings, decide, and package the result for downstream use.
    pub fn evaluate(
        &self,
        crop: &str,
        sensor: &SensorReport,
        weather: &WeatherReport,
    ) -> PumpStatusRecord {
        let sensor_reading = sensor.normalize();
        let weather_reading = weather.normalize();
        let decision = self.decide(crop, &sensor_reading, &weather_reading);

        PumpStatusRecord::new(
            crop,
            decision,
            sensor.origin,
            sensor_reading,
            weather_reading,
        )
    }
}
