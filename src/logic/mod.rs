pub mod classifier;
pub mod controller;
pub mod irrigation;
pub mod rules;

pub use classifier::{recommend_crop, CentroidModel, CropClassifier, LabelMap};
pub use controller::PumpController;
pub use irrigation::IrrigationService;
pub use rules::{decide, PumpRulesEngine};
