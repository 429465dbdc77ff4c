use crate::config::HomeAssistantConfig;
use crate::error::{AgriSenseError, Result};
use crate::models::{SensorOrigin, SensorReport};
use reqwest::StatusCode;
use serde::Deserialize;

/// Reads a soil moisture percentage from a Home Assistant sensor entity
pub struct HomeAssistantClient {
    client: reqwest::Client,
    config: HomeAssistantConfig,
}

#[derive(Debug, Deserialize)]
struct EntityState {
    state: String,
    #[allow(dead_code)]
    entity_id: String,
}

impl HomeAssistantClient {
    pub fn new(config: HomeAssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn fetch_soil_moisture(&self) -> Result<SensorReport> {
        let moisture = self
            .get_entity_state(&self.config.soil_moisture_entity)
            .await?;

        if moisture.is_none() {
            tracing::warn!(
                entity = %self.config.soil_moisture_entity,
                "Soil moisture entity has no numeric state"
            );
        }

        Ok(SensorReport::new(SensorOrigin::HomeAssistant, moisture))
    }

    async fn get_entity_state(&self, entity_id: &str) -> Result<Option<f64>> {
        let url = format!(
            "{}/api/states/{}",
            self.config.url.trim_end_matches('/'),
            entity_id
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AgriSenseError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        check_status(response.status(), entity_id)?;

        let entity: EntityState = response.json().await?;
        Ok(parse_state(&entity.state))
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/", self.config.url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .send()
            .await
            .map_err(|e| AgriSenseError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn check_status(status: StatusCode, entity_id: &str) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(AgriSenseError::NotFound(format!(
            "Home Assistant entity '{}'",
            entity_id
        )));
    }

    if !status.is_success() {
        return Err(AgriSenseError::DataSourceUnavailable(format!(
            "Home Assistant returned {}",
            status
        )));
    }

    Ok(())
}

// Home Assistant reports "unavailable"/"unknown" for offline sensors
fn parse_state(state: &str) -> Option<f64> {
    state.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
