use super::controller::PumpController;
use crate::catalog::CropCatalog;
use crate::config::Config;
use crate::datasources::{OpenWeatherMapClient, SensorSource};
use crate::error::{AgriSenseError, Result};
use crate::models::{PumpStatusRecord, SensorOrigin, SensorReport, WeatherReport};
use std::sync::Arc;

/// Gathers live readings from the configured sources and hands them to the
/// pump controller.
pub struct IrrigationService {
    controller: PumpController,
    weather_client: Option<OpenWeatherMapClient>,
    sensor: SensorSource,
}

impl IrrigationService {
    pub fn new(config: &Config, catalog: Arc<CropCatalog>) -> Self {
        let weather_client = config.active_openweathermap().map(|c| {
            tracing::info!("OpenWeatherMap client configured for weather data");
            OpenWeatherMapClient::new(c.clone())
        });

        if weather_client.is_none() {
            tracing::warn!("OpenWeatherMap not configured - live pump decisions unavailable");
        }

        Self {
            controller: PumpController::new(catalog),
            weather_client,
            sensor: SensorSource::from_config(&config.sensor),
        }
    }

    pub fn controller(&self) -> &PumpController {
        &self.controller
    }

    pub fn sensor_origin(&self) -> SensorOrigin {
        self.sensor.origin()
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport> {
        let client = self.weather_client.as_ref().ok_or_else(|| {
            AgriSenseError::Config("OpenWeatherMap API key not configured".into())
        })?;

        client.fetch_current(city).await.inspect_err(|e| {
            tracing::warn!(city, "Failed to fetch weather: {}", e);
        })
    }

    pub async fn read_sensor(&self) -> Result<SensorReport> {
        self.sensor.read().await.inspect_err(|e| {
            tracing::warn!(source = %self.sensor.origin(), "Failed to read soil moisture: {}", e);
        })
    }

    /// Fetch weather for `city`, read the soil sensor, and decide the pump state for `crop`.
    pub async fn pump_status(&self, crop: &str, city: &str) -> Result<PumpStatusRecord> {
        let (weather, sensor) = tokio::join!(self.fetch_weather(city), self.read_sensor());
        let weather = weather?;
        let sensor = sensor?;

        Ok(self.controller.evaluate(crop, &sensor, &weather))
    }

    pub async fn check_connections(&self, probe_city: &str) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.weather_client {
            status.openweathermap = client.test_connection(probe_city).await.unwrap_or(false);
        }

        status.sensor = self.sensor.test_connection().await.unwrap_or(false);

        status
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: bool,
    pub sensor: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.openweathermap && self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Config {
        Config::from_yaml(
            r#"
catalog:
  path: config/crop_requirements.json
sensor:
  simulated:
    min_percent: 55
    max_percent: 55
"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn weather_without_api_key_is_config_error() {
        let service = IrrigationService::new(&offline_config(), Arc::new(CropCatalog::default()));
        let err = service.fetch_weather("Pune").await.unwrap_err();
        assert!(matches!(err, AgriSenseError::Config(_)));

        let err = service.pump_status("rice", "Pune").await.unwrap_err();
        assert!(matches!(err, AgriSenseError::Config(_)));
    }

    #[tokio::test]
    async fn reads_configured_simulator() {
        let service = IrrigationService::new(&offline_config(), Arc::new(CropCatalog::default()));
        let report = service.read_sensor().await.unwrap();
        assert_eq!(report.soil_moisture, Some(55.0));
    }

    #[tokio::test]
    async fn connection_status_without_weather() {
        let service = IrrigationService::new(&offline_config(), Arc::new(CropCatalog::default()));
        let status = service.check_connections("London").await;
        assert!(!status.openweathermap);
        assert!(status.sensor);
        assert!(!status.all_connected());
    }
}
