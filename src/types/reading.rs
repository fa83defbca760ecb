//! Simulated sensor readings

use serde::{Deserialize, Serialize};

/// Feature column names, in classifier row order
pub const FEATURE_COLUMNS: [&str; 3] = ["temperature", "humidity", "wind_speed"];

/// Number of numeric features a reading contributes to the classifier
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Inclusive integer bounds a simulated sensor samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRange {
    pub min: i32,
    pub max: i32,
}

impl SensorRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value <= self.max as f64
    }
}

/// One simulated sensor observation. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    pub location: String,
}

impl Reading {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64, location: impl Into<String>) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            location: location.into(),
        }
    }

    /// Feature vector in training column order: temperature, humidity, wind speed
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.temperature, self.humidity, self.wind_speed]
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{}°C, {}% humidity, {} km/h wind, {}",
            self.temperature, self.humidity, self.wind_speed, self.location
        )
    }
}
