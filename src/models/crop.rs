use serde::{Deserialize, Serialize};

/// Closed numeric interval `[min, max]`. Values equal to either edge are in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_below(&self, value: f64) -> bool {
        value < self.min
    }

    pub fn is_above(&self, value: f64) -> bool {
        value > self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        !self.is_below(value) && !self.is_above(value)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<[f64; 2]> for IdealRange {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<IdealRange> for [f64; 2] {
    fn from(range: IdealRange) -> Self {
        [range.min, range.max]
    }
}

impl std::fmt::Display for IdealRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Default ideal ranges applied to crops the catalog doesn't know about.
pub const DEFAULT_TEMPERATURE_RANGE: IdealRange = IdealRange::new(10.0, 40.0);
pub const DEFAULT_HUMIDITY_RANGE: IdealRange = IdealRange::new(30.0, 80.0);
pub const DEFAULT_RAINFALL_RANGE: IdealRange = IdealRange::new(0.0, 500.0);
pub const DEFAULT_SOIL_MOISTURE_RANGE: IdealRange = IdealRange::new(20.0, 80.0);

/// Ideal growing conditions for a single crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequirement {
    /// Air temperature in °C
    pub temperature: IdealRange,
    /// Relative humidity in %
    pub humidity: IdealRange,
    /// 6-hour rainfall forecast in mm
    pub rainfall: IdealRange,
    /// Soil moisture in %
    pub soil_moisture: IdealRange,
}

impl CropRequirement {
    /// Name/range pairs, in the order they appear in the requirements file.
    pub fn ranges(&self) -> [(&'static str, IdealRange); 4] {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("rainfall", self.rainfall),
            ("soil_moisture", self.soil_moisture),
        ]
    }
}

impl Default for CropRequirement {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_RANGE,
            humidity: DEFAULT_HUMIDITY_RANGE,
            rainfall: DEFAULT_RAINFALL_RANGE,
            soil_moisture: DEFAULT_SOIL_MOISTURE_RANGE,
        }
    }
}
