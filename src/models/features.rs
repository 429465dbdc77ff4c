use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 7;

/// Column order the crop classifier was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

pub const UNKNOWN_CROP: &str = "Unknown Crop";

/// Soil and climate measurements used to recommend a crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropFeatures {
    /// Nitrogen content ratio
    #[serde(rename = "N")]
    pub nitrogen: f64,
    /// Phosphorus content ratio
    #[serde(rename = "P")]
    pub phosphorus: f64,
    /// Potassium content ratio
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl CropFeatures {
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.to_vector()) {
            if !value.is_finite() {
                return Err(crate::error::AgriSenseError::InvalidData(format!(
                    "feature '{}' is not a finite number",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub class_id: u32,
    pub recommended_crop: String,
}

impl CropRecommendation {
    pub fn is_known(&self) -> bool {
        self.recommended_crop != UNKNOWN_CROP
    }
}
