mod cli;

use agrisense::catalog::CropCatalog;
use agrisense::config::Config;
use agrisense::error::{AgriSenseError, Result};
use agrisense::logic::{recommend_crop, CentroidModel, IrrigationService};
use agrisense::models::{CropFeatures, SensorOrigin, SensorReport, WeatherReport};
use clap::Parser;
use cli::{Cli, Commands, DecideArgs, RecommendArgs};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes priority over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Please copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };

    // The catalog is loaded once and shared read-only from here on
    let catalog = match CropCatalog::load_file(&config.catalog.path) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let service = IrrigationService::new(&config, catalog);

    if let Err(e) = run(cli.command, &config, &service).await {
        print_json(&ErrorBody {
            error: e.to_string(),
        })?;
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

async fn run(command: Commands, config: &Config, service: &IrrigationService) -> Result<()> {
    match command {
        Commands::Pump { crop, city } => {
            let record = service.pump_status(&crop, &city).await?;
            print_json(&record)
        }
        Commands::Decide(args) => run_decide(args, service),
        Commands::Weather { city } => {
            let report = service.fetch_weather(&city).await?;
            print_json(&report.normalize())
        }
        Commands::Sensor => {
            let report = service.read_sensor().await?;
            print_json(&report.normalize())
        }
        Commands::Recommend(args) => run_recommend(args, config),
        Commands::Crops => {
            print_crops(service.controller().catalog());
            Ok(())
        }
        Commands::Check { city } => run_check(config, service, &city).await,
    }
}

fn run_decide(args: DecideArgs, service: &IrrigationService) -> Result<()> {
    let sensor = SensorReport::new(SensorOrigin::Manual, args.soil_moisture);
    let weather = WeatherReport {
        temperature: args.temperature,
        humidity: args.humidity,
        rainfall: args.rainfall,
    };

    let record = service.controller().evaluate(&args.crop, &sensor, &weather);
    print_json(&record)
}

fn run_recommend(args: RecommendArgs, config: &Config) -> Result<()> {
    let classifier_config = config
        .classifier
        .as_ref()
        .ok_or_else(|| AgriSenseError::Config("classifier.model_path not configured".into()))?;

    let model = CentroidModel::load_file(&classifier_config.model_path)?;

    let features = CropFeatures {
        nitrogen: args.nitrogen,
        phosphorus: args.phosphorus,
        potassium: args.potassium,
        temperature: args.temperature,
        humidity: args.humidity,
        ph: args.ph,
        rainfall: args.rainfall,
    };

    let recommendation = recommend_crop(&model, model.labels(), &features)?;
    print_json(&recommendation)
}

async fn run_check(config: &Config, service: &IrrigationService, city: &str) -> Result<()> {
    let catalog = service.controller().catalog();
    println!("Config:          OK");
    println!(
        "Crop catalog:    OK ({} crops from {})",
        catalog.len(),
        config.catalog.path.display()
    );

    match config.classifier.as_ref() {
        Some(c) => match CentroidModel::load_file(&c.model_path) {
            Ok(model) => println!("Crop model:      OK ({} labels)", model.labels().len()),
            Err(e) => println!("Crop model:      FAILED ({})", e),
        },
        None => println!("Crop model:      not configured"),
    }

    let status = service.check_connections(city).await;
    let weather = if config.active_openweathermap().is_none() {
        "not configured"
    } else if status.openweathermap {
        "OK"
    } else {
        "OFFLINE"
    };
    println!("OpenWeatherMap:  {}", weather);
    println!(
        "Soil sensor:     {} ({})",
        if status.sensor { "OK" } else { "OFFLINE" },
        service.sensor_origin()
    );

    Ok(())
}

fn print_crops(catalog: &CropCatalog) {
    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>14}",
        "crop", "temperature", "humidity", "rainfall", "soil_moisture"
    );
    for (name, req) in catalog.iter() {
        println!(
            "{:<16} {:>14} {:>14} {:>14} {:>14}",
            name,
            req.temperature.to_string(),
            req.humidity.to_string(),
            req.rainfall.to_string(),
            req.soil_moisture.to_string()
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
