use crate::error::{AgriSenseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub sensor: SensorConfig,
    pub classifier: Option<ClassifierConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_owm_base_url")]
    pub base_url: String,
}

fn default_enabled() -> bool {
    true
}

fn default_owm_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SensorConfig {
    #[serde(default)]
    pub simulated: SimulatedSensorConfig,
    pub homeassistant: Option<HomeAssistantConfig>,
}

impl SensorConfig {
    /// Home Assistant sensor settings, if a token is configured.
    pub fn active_homeassistant(&self) -> Option<&HomeAssistantConfig> {
        self.homeassistant.as_ref().filter(|c| is_set(&c.token))
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SimulatedSensorConfig {
    pub min_percent: u8,
    pub max_percent: u8,
}

impl Default for SimulatedSensorConfig {
    fn default() -> Self {
        Self {
            min_percent: 10,
            max_percent: 100,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct HomeAssistantConfig {
    pub url: String,
    pub token: String,
    pub soil_moisture_entity: String,
}

impl std::fmt::Debug for HomeAssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("soil_moisture_entity", &self.soil_moisture_entity)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
}

impl Config {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AgriSenseError::Config(format!(
                "Config file not found at {:?}. Copy config/config.yaml.example to get started.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgriSenseError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = ?config_path, "Configuration loaded");
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` placeholders from the environment.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AgriSenseError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let sim = self.sensor.simulated;
        if sim.min_percent > sim.max_percent || sim.max_percent > 100 {
            return Err(AgriSenseError::Config(format!(
                "sensor.simulated range {}..={} must satisfy min <= max <= 100",
                sim.min_percent, sim.max_percent
            )));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = dirs::config_dir()
            .ok_or_else(|| AgriSenseError::Config("Cannot determine config directory".into()))?
            .join("agrisense")
            .join("config.yaml");
        Ok(default_path)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Weather client settings, if configured and switched on.
    pub fn active_openweathermap(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap
            .as_ref()
            .filter(|c| c.enabled && is_set(&c.api_key))
    }
}

// Empty, or an unresolved `${VAR}` placeholder
fn is_set(secret: &str) -> bool {
    !secret.is_empty() && !secret.starts_with("${")
}
