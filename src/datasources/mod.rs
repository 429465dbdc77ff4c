pub mod homeassistant;
pub mod openweathermap;
pub mod sensor;

pub use homeassistant::HomeAssistantClient;
pub use openweathermap::OpenWeatherMapClient;
pub use sensor::{SensorSource, SimulatedSensor};
