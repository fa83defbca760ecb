//! Disaster Monitor - simulated sensor classification with SQLite alerting
//! 
//! Trains a random forest on a small hand-coded sample set, classifies a
//! stream of simulated readings and appends an alert row for every
//! predicted disaster.
//! 
//! # Architecture
//! 
//! - **model**: `Classifier` trait, CART trees, random forest, dataset split
//! - **store**: append-only SQLite alert table
//! - **monitor**: reading generator, clock, seeding, the monitor loop
//! - **telemetry** / **display**: reporter side channel and console output

pub mod errors;
pub mod types;
pub mod model;
pub mod store;
pub mod monitor;
pub mod telemetry;
pub mod display;
pub mod execution;
pub mod cli;

// Re-export commonly used types
pub use errors::{MonitorError, Result};
pub use types::{AlertRecord, NewAlert, Prediction, Reading, SensorRange};
pub use model::{Classifier, Dataset, ForestConfig, RandomForest, TrainingReport};
pub use store::AlertStore;
pub use monitor::{Monitor, MonitorConfig, ReadingGenerator, RunSummary};
pub use telemetry::{MonitorEvent, Reporter, TelemetryCollector};
pub use display::DisplayManager;
