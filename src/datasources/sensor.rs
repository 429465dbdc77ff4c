use super::homeassistant::HomeAssistantClient;
use crate::config::{SensorConfig, SimulatedSensorConfig};
use crate::error::Result;
use crate::models::{SensorOrigin, SensorReport};
use rand::Rng;

/// Simulated soil moisture probe, uniform over a configured percentage range
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSensor {
    min_percent: u8,
    max_percent: u8,
}

impl SimulatedSensor {
    pub fn new(config: SimulatedSensorConfig) -> Self {
        let max_percent = config.max_percent.min(100);
        Self {
            min_percent: config.min_percent.min(max_percent),
            max_percent,
        }
    }

    pub fn read(&self) -> SensorReport {
        let moisture = rand::thread_rng().gen_range(self.min_percent..=self.max_percent);
        tracing::info!(soil_moisture = moisture, "Simulated soil moisture reading");
        SensorReport::new(SensorOrigin::Simulated, Some(f64::from(moisture)))
    }
}

/// Where soil moisture readings come from
pub enum SensorSource {
    Simulated(SimulatedSensor),
    HomeAssistant(HomeAssistantClient),
}

impl SensorSource {
    /// Home Assistant when a token is configured, otherwise the simulator.
    pub fn from_config(config: &SensorConfig) -> Self {
        match config.active_homeassistant() {
            Some(ha) => {
                tracing::info!(entity = %ha.soil_moisture_entity, "Using Home Assistant soil moisture sensor");
                SensorSource::HomeAssistant(HomeAssistantClient::new(ha.clone()))
            }
            None => {
                tracing::info!("Home Assistant not configured - simulating soil moisture");
                SensorSource::Simulated(SimulatedSensor::new(config.simulated))
            }
        }
    }

    pub fn origin(&self) -> SensorOrigin {
        match self {
            SensorSource::Simulated(_) => SensorOrigin::Simulated,
            SensorSource::HomeAssistant(_) => SensorOrigin::HomeAssistant,
        }
    }

    pub async fn read(&self) -> Result<SensorReport> {
        match self {
            SensorSource::Simulated(sensor) => Ok(sensor.read()),
            SensorSource::HomeAssistant(client) => client.fetch_soil_moisture().await,
        }
    }

    pub async fn test_connection(&self) -> Result<bool> {
        match self {
            SensorSource::Simulated(_) => Ok(true),
            SensorSource::HomeAssistant(client) => client.test_connection().await,
        }
    }
}
