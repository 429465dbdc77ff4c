use crate::error::{AgriSenseError, Result};
use crate::models::{CropFeatures, CropRecommendation, FEATURE_COUNT, UNKNOWN_CROP};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Maps a feature vector (`[N, P, K, temperature, humidity, ph, rainfall]`)
/// to a class id.
pub trait CropClassifier: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<u32>;
}

/// Per-feature standardization: `(x - mean) / scale`
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn transform(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in features.iter().enumerate() {
            // Constant columns were fit with zero variance
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            scaled[i] = (value - self.mean[i]) / scale;
        }
        scaled
    }
}

/// Reverse mapping from class id to crop name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(HashMap<u32, String>);

impl LabelMap {
    pub fn resolve(&self, class_id: u32) -> &str {
        self.0
            .get(&class_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CROP)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, String)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClassCentroid {
    id: u32,
    centroid: [f64; FEATURE_COUNT],
}

/// Nearest-centroid classifier over standardized features
#[derive(Debug, Clone, Deserialize)]
pub struct CentroidModel {
    scaler: StandardScaler,
    classes: Vec<ClassCentroid>,
    #[serde(default)]
    labels: LabelMap,
}

impl CentroidModel {
    pub fn load(source: &str) -> Result<Self> {
        let model: CentroidModel = serde_json::from_str(source)
            .map_err(|e| AgriSenseError::Config(format!("Malformed crop model: {}", e)))?;

        if model.classes.is_empty() {
            return Err(AgriSenseError::InvalidData(
                "Crop model defines no classes".into(),
            ));
        }

        Ok(model)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AgriSenseError::Config(format!("Failed to read crop model from {:?}: {}", path, e))
        })?;

        let model = Self::load(&source)?;
        tracing::info!(
            classes = model.classes.len(),
            labels = model.labels.len(),
            "Crop model loaded"
        );
        Ok(model)
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }
}

impl CropClassifier for CentroidModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<u32> {
        let scaled = self.scaler.transform(features);
        tracing::debug!(?scaled, "Scaled features");

        self.classes
            .iter()
            .map(|class| {
                let distance: f64 = class
                    .centroid
                    .iter()
                    .zip(scaled.iter())
                    .map(|(c, x)| (c - x).powi(2))
                    .sum();
                (class.id, distance)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
            .ok_or_else(|| AgriSenseError::InvalidData("Crop model defines no classes".into()))
    }
}

/// Run the classifier and resolve the predicted class to a crop name.
pub fn recommend_crop(
    classifier: &dyn CropClassifier,
    labels: &LabelMap,
    features: &CropFeatures,
) -> Result<CropRecommendation> {
    features.validate()?;

    let class_id = classifier.predict(&features.to_vector())?;
    let crop = labels.resolve(class_id);

    if crop == UNKNOWN_CROP {
        tracing::error!(class_id, "Predicted class has no crop label");
    } else {
        tracing::info!(class_id, crop, "Crop recommended");
    }

    Ok(CropRecommendation {
        class_id,
        recommended_crop: crop.to_string(),
    })
}
