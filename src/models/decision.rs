use super::reading::{SensorOrigin, SensorReading, WeatherReading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PumpDecision {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl PumpDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            PumpDecision::On => "ON",
            PumpDecision::Off => "OFF",
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, PumpDecision::On)
    }
}

impl std::fmt::Display for PumpDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which pump rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    MoistureDeficit,
    TemperatureOutOfRange,
    HumidityOutOfRange,
    RainfallOutOfRange,
    RainImminent,
    Nominal,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::MoistureDeficit => "Moisture Deficit",
            DecisionReason::TemperatureOutOfRange => "Temperature Out of Range",
            DecisionReason::HumidityOutOfRange => "Humidity Out of Range",
            DecisionReason::RainfallOutOfRange => "Rainfall Out of Range",
            DecisionReason::RainImminent => "Rain Imminent",
            DecisionReason::Nominal => "Nominal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DecisionReason::MoistureDeficit => "Soil moisture too low and no rain expected",
            DecisionReason::TemperatureOutOfRange => "Temperature outside the crop's ideal range",
            DecisionReason::HumidityOutOfRange => "Humidity outside the crop's ideal range",
            DecisionReason::RainfallOutOfRange => "Rainfall outside the crop's ideal range",
            DecisionReason::RainImminent => "Rain expected within 6 hours",
            DecisionReason::Nominal => "All conditions within the crop's ideal ranges",
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pump decision together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub status: PumpDecision,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn new(status: PumpDecision, reason: DecisionReason) -> Self {
        Self { status, reason }
    }
}

/// Everything that went into one pump decision, as handed to downstream consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpStatusRecord {
    pub selected_crop: String,
    pub pump_status: PumpDecision,
    pub reason: DecisionReason,
    pub sensor_source: SensorOrigin,
    pub sensor_data: SensorReading,
    pub weather_data: WeatherReading,
    pub evaluated_at: DateTime<Utc>,
}

impl PumpStatusRecord {
    pub fn new(
        selected_crop: impl Into<String>,
        decision: Decision,
        sensor_source: SensorOrigin,
        sensor_data: SensorReading,
        weather_data: WeatherReading,
    ) -> Self {
        Self {
            selected_crop: selected_crop.into(),
            pump_status: decision.status,
            reason: decision.reason,
            sensor_source,
            sensor_data,
            weather_data,
            evaluated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_decision_serializes_as_upper_case() {
        assert_eq!(serde_json::to_string(&PumpDecision::On).unwrap(), "\"ON\"");
        assert_eq!(serde_json::to_string(&PumpDecision::Off).unwrap(), "\"OFF\"");
        assert_eq!(
            serde_json::from_str::<PumpDecision>("\"OFF\"").unwrap(),
            PumpDecision::Off
        );
    }

    #[test]
    fn pump_decision_display() {
        assert_eq!(PumpDecision::On.to_string(), "ON");
        assert_eq!(PumpDecision::Off.to_string(), "OFF");
        assert!(PumpDecision::On.is_on());
        assert!(!PumpDecision::Off.is_on());
    }

    #[test]
    fn decision_reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DecisionReason::MoistureDeficit).unwrap(),
            "\"moisture_deficit\""
        );
        assert_eq!(
            serde_json::to_string(&DecisionReason::RainImminent).unwrap(),
            "\"rain_imminent\""
        );
    }

    #[test]
    fn pump_status_record_json_shape() {
        let record = PumpStatusRecord::new(
            "rice",
            Decision::new(PumpDecision::On, DecisionReason::MoistureDeficit),
            SensorOrigin::Simulated,
            SensorReading::new(12),
            WeatherReading::new(28.0, 70.0, 0.0),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["selected_crop"], "rice");
        assert_eq!(json["pump_status"], "ON");
        assert_eq!(json["reason"], "moisture_deficit");
        assert_eq!(json["sensor_data"]["soil_moisture"], 12);
        assert_eq!(json["weather_data"]["rainfall"], 0.0);
    }
}
