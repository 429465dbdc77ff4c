use crate::config::OpenWeatherMapConfig;
use crate::error::{AgriSenseError, Result};
use crate::models::WeatherReport;
use reqwest::Url;
use serde::Deserialize;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current-weather response. Every field is optional so that a
// sparse response degrades to defaults instead of failing to parse.
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "6h", default)]
    six_hour: Option<f64>,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions and 6-hour rainfall for a city, in metric units
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherReport> {
        let url = self.weather_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                AgriSenseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgriSenseError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;

        let report = parse_current(&body)?;
        tracing::debug!(city, ?report, "Weather fetched");
        Ok(report)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, city: &str) -> Result<bool> {
        let url = self.weather_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                AgriSenseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn weather_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/weather", self.config.base_url.trim_end_matches('/')),
            &[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| AgriSenseError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }
}

fn parse_current(body: &str) -> Result<WeatherReport> {
    let response: OwmCurrentResponse = serde_json::from_str(body).map_err(|e| {
        AgriSenseError::DataSourceUnavailable(format!(
            "Failed to parse OpenWeatherMap response: {}",
            e
        ))
    })?;

    Ok(convert_response(response))
}

fn convert_response(response: OwmCurrentResponse) -> WeatherReport {
    let (temperature, humidity) = response
        .main
        .map(|m| (m.temp, m.humidity))
        .unwrap_or((None, None));

    // No rain block means no rain forecast
    let rainfall = Some(response.rain.and_then(|r| r.six_hour).unwrap_or(0.0));

    WeatherReport {
        temperature,
        humidity,
        rainfall,
    }
}
