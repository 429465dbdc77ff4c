use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 50.0;
pub const DEFAULT_RAINFALL_MM: f64 = 0.0;
pub const DEFAULT_SOIL_MOISTURE_PERCENT: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorOrigin {
    Simulated,
    HomeAssistant,
    Manual,
}

impl SensorOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorOrigin::Simulated => "Simulated",
            SensorOrigin::HomeAssistant => "Home Assistant",
            SensorOrigin::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for SensorOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw soil sensor output, before defaults are applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReport {
    pub origin: SensorOrigin,
    pub soil_moisture: Option<f64>,
}

impl SensorReport {
    pub fn new(origin: SensorOrigin, soil_moisture: Option<f64>) -> Self {
        Self {
            origin,
            soil_moisture,
        }
    }

    /// Fill in the default moisture and clamp into 0-100%.
    pub fn normalize(&self) -> SensorReading {
        let soil_moisture = self
            .soil_moisture
            .filter(|m| m.is_finite())
            .map(|m| m.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(DEFAULT_SOIL_MOISTURE_PERCENT);

        SensorReading { soil_moisture }
    }
}

/// Soil moisture as consumed by the pump decision, always within 0-100%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(deserialize_with = "clamped_percent")]
    pub soil_moisture: u8,
}

fn clamped_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(|percent| percent.min(100))
}

impl SensorReading {
    pub fn new(soil_moisture: u8) -> Self {
        Self {
            soil_moisture: soil_moisture.min(100),
        }
    }
}

/// Raw weather service output. Any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
}

impl WeatherReport {
    pub fn normalize(&self) -> WeatherReading {
        fn or_default(value: Option<f64>, default: f64) -> f64 {
            value.filter(|v| v.is_finite()).unwrap_or(default)
        }

        WeatherReading {
            temperature: or_default(self.temperature, DEFAULT_TEMPERATURE_C),
            humidity: or_default(self.humidity, DEFAULT_HUMIDITY_PERCENT),
            rainfall: or_default(self.rainfall, DEFAULT_RAINFALL_MM),
        }
    }
}

/// Fully populated weather conditions used by the pump decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Forecast rainfall over the next 6 hours in mm
    pub rainfall: f64,
}

impl WeatherReading {
    pub fn new(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
        }
    }
}

impl Default for WeatherReading {
    fn default() -> Self {
        WeatherReport::default().normalize()
    }
}
