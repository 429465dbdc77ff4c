use crate::error::{AgriSenseError, Result};
use crate::models::{
    CropRequirement, IdealRange, DEFAULT_HUMIDITY_RANGE, DEFAULT_RAINFALL_RANGE,
    DEFAULT_SOIL_MOISTURE_RANGE, DEFAULT_TEMPERATURE_RANGE,
};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Immutable crop name → ideal ranges table.
///
/// Built once at startup and shared read-only (usually behind an `Arc`).
/// Crop names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    entries: BTreeMap<String, CropRequirement>,
}

// Shape of one entry in crop_requirements.json. Ranges left out of an entry
// fall back to the system-wide default for that field; an explicit `null` is
// malformed.
#[derive(Debug, Deserialize)]
struct RawRequirement {
    #[serde(default, deserialize_with = "present_range")]
    temperature: Option<IdealRange>,
    #[serde(default, deserialize_with = "present_range")]
    humidity: Option<IdealRange>,
    #[serde(default, deserialize_with = "present_range")]
    rainfall: Option<IdealRange>,
    #[serde(default, deserialize_with = "present_range")]
    soil_moisture: Option<IdealRange>,
}

fn present_range<'de, D>(deserializer: D) -> std::result::Result<Option<IdealRange>, D::Error>
where
    D: Deserializer<'de>,
{
    IdealRange::deserialize(deserializer).map(Some)
}

impl RawRequirement {
    fn resolve(self, crop: &str) -> Result<CropRequirement> {
        let requirement = CropRequirement {
            temperature: fill(crop, "temperature", self.temperature, DEFAULT_TEMPERATURE_RANGE),
            humidity: fill(crop, "humidity", self.humidity, DEFAULT_HUMIDITY_RANGE),
            rainfall: fill(crop, "rainfall", self.rainfall, DEFAULT_RAINFALL_RANGE),
            soil_moisture: fill(
                crop,
                "soil_moisture",
                self.soil_moisture,
                DEFAULT_SOIL_MOISTURE_RANGE,
            ),
        };

        for (field, range) in requirement.ranges() {
            if !range.is_valid() {
                return Err(AgriSenseError::Config(format!(
                    "crop '{}': {} range {} must satisfy min <= max",
                    crop, field, range
                )));
            }
        }

        Ok(requirement)
    }
}

fn fill(crop: &str, field: &str, range: Option<IdealRange>, default: IdealRange) -> IdealRange {
    range.unwrap_or_else(|| {
        debug!(crop, field, %default, "Range missing from catalog entry, using default");
        default
    })
}

impl CropCatalog {
    /// Parse a JSON object of crop name → ranges.
    pub fn load(source: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawRequirement> = serde_json::from_str(source)
            .map_err(|e| AgriSenseError::Config(format!("Malformed crop requirements: {}", e)))?;

        let entries = raw
            .into_iter()
            .map(|(crop, entry)| {
                let requirement = entry.resolve(&crop)?;
                Ok((crop, requirement))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { entries })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AgriSenseError::Config(format!(
                "Failed to read crop requirements from {:?}: {}",
                path, e
            ))
        })?;

        let catalog = Self::load(&source)?;
        tracing::info!(crops = catalog.len(), path = ?path, "Crop requirements loaded");
        Ok(catalog)
    }

    /// Requirements for `crop`, or the system-wide defaults when it isn't listed.
    pub fn lookup(&self, crop: &str) -> CropRequirement {
        match self.entries.get(crop) {
            Some(requirement) => *requirement,
            None => {
                debug!(crop, "Crop not in catalog, using default requirements");
                CropRequirement::default()
            }
        }
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.entries.contains_key(crop)
    }

    /// Crop names in sorted order
    pub fn crops(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CropRequirement)> {
        self.entries.iter().map(|(name, req)| (name.as_str(), req))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rice": {
            "temperature": [20, 35],
            "humidity": [60, 90],
            "rainfall": [0, 300],
            "soil_moisture": [40, 90]
        },
        "maize": {
            "temperature": [18, 27],
            "rainfall": [0, 100],
            "soil_moisture": [25, 60]
        }
    }"#;

    #[test]
    fn load_and_lookup_known_crop() {
        let catalog = CropCatalog::load(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let rice = catalog.lookup("rice");
        assert_eq!(rice.temperature, IdealRange::new(20.0, 35.0));
        assert_eq!(rice.humidity, IdealRange::new(60.0, 90.0));
        assert_eq!(rice.rainfall, IdealRange::new(0.0, 300.0));
        assert_eq!(rice.soil_moisture, IdealRange::new(40.0, 90.0));
    }

    #[test]
    fn unknown_crop_gets_defaults() {
        let catalog = CropCatalog::load(SAMPLE).unwrap();
        assert_eq!(catalog.lookup("wheat"), CropRequirement::default());
        assert_eq!(CropCatalog::default().lookup("rice"), CropRequirement::default());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = CropCatalog::load(SAMPLE).unwrap();
        assert!(catalog.contains("rice"));
        assert!(!catalog.contains("Rice"));
        assert_eq!(catalog.lookup("Rice"), CropRequirement::default());
    }

    #[test]
    fn missing_range_falls_back_per_field() {
        let catalog = CropCatalog::load(SAMPLE).unwrap();
        let maize = catalog.lookup("maize");
        assert_eq!(maize.humidity, DEFAULT_HUMIDITY_RANGE);
        assert_eq!(maize.temperature, IdealRange::new(18.0, 27.0));
        assert_eq!(maize.soil_moisture, IdealRange::new(25.0, 60.0));
    }

    #[test]
    fn empty_entry_is_all_defaults() {
        let catalog = CropCatalog::load(r#"{"millet": {}}"#).unwrap();
        assert!(catalog.contains("millet"));
        assert_eq!(catalog.lookup("millet"), CropRequirement::default());
    }

    #[test]
    fn crops_are_sorted() {
        let catalog = CropCatalog::load(SAMPLE).unwrap();
        assert_eq!(catalog.crops(), vec!["maize", "rice"]);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = CropCatalog::load(r#"{"rice": {"humidity": [90, 60]}}"#).unwrap_err();
        assert!(matches!(err, AgriSenseError::Config(_)));
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn rejects_malformed_sources() {
        let cases = [
            "",
            "not json",
            "[1, 2, 3]",
            r#"{"rice": {"temperature": [20]}}"#,
            r#"{"rice": {"temperature": [20, 30, 40]}}"#,
            r#"{"rice": {"temperature": ["warm", 30]}}"#,
            r#"{"rice": [20, 30]}"#,
            r#"{"rice": {"humidity": null}}"#,
            r#"{"rice": {"temperature": [null, 30]}}"#,
        ];

        for source in cases {
            let result = CropCatalog::load(source);
            assert!(
                matches!(result, Err(AgriSenseError::Config(_))),
                "expected config error for {:?}",
                source
            );
        }
    }

    #[test]
    fn load_file_missing_is_config_error() {
        let err = CropCatalog::load_file(Path::new("/nonexistent/crop_requirements.json"))
            .unwrap_err();
        assert!(matches!(err, AgriSenseError::Config(_)));
    }

    #[test]
    fn bundled_requirements_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/crop_requirements.json");
        let catalog = CropCatalog::load_file(&path).unwrap();
        assert!(!catalog.is_empty());
        for (_, requirement) in catalog.iter() {
            for (_, range) in requirement.ranges() {
                assert!(range.is_valid());
            }
        }
    }
}
