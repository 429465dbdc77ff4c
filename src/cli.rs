use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrisense",
    version,
    about = "Crop recommendation and irrigation pump decisions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch live weather and soil moisture, then decide the pump state
    Pump {
        /// Crop being grown (case-sensitive catalog key)
        #[arg(long)]
        crop: String,
        /// City to fetch weather for
        #[arg(long)]
        city: String,
    },
    /// Decide the pump state from readings given on the command line
    Decide(DecideArgs),
    /// Show current weather for a city
    Weather {
        #[arg(long)]
        city: String,
    },
    /// Take one soil moisture reading
    Sensor,
    /// Recommend a crop from soil nutrients and climate
    Recommend(RecommendArgs),
    /// List crops in the requirements catalog
    Crops,
    /// Validate config and test connections
    Check {
        /// City used to probe the weather service
        #[arg(long, default_value = "London")]
        city: String,
    },
}

/// Readings left out fall back to the documented defaults.
#[derive(Args)]
pub struct DecideArgs {
    #[arg(long)]
    pub crop: String,
    /// Soil moisture in %
    #[arg(long)]
    pub soil_moisture: Option<f64>,
    /// Air temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,
    /// Relative humidity in %
    #[arg(long)]
    pub humidity: Option<f64>,
    /// Forecast rainfall over the next 6 hours in mm
    #[arg(long)]
    pub rainfall: Option<f64>,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Nitrogen
    #[arg(long = "n")]
    pub nitrogen: f64,
    /// Phosphorus
    #[arg(long = "p")]
    pub phosphorus: f64,
    /// Potassium
    #[arg(long = "k")]
    pub potassium: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    #[arg(long)]
    pub humidity: f64,
    #[arg(long)]
    pub ph: f64,
    #[arg(long)]
    pub rainfall: f64,
}
