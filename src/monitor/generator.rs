//! Simulated sensor feed

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::cli::config::{MonitorSettings, SensorsConfig};
use crate::errors::{MonitorError, Result};
use crate::types::{Reading, SensorRange};

/// Seeded generator of uniformly random readings
#[derive(Debug, Clone)]
pub struct ReadingGenerator {
    rng: StdRng,
    temperature: SensorRange,
    humidity: SensorRange,
    wind_speed: SensorRange,
    locations: Vec<String>,
}

impl ReadingGenerator {
    pub fn new(
        seed: u64,
        temperature: SensorRange,
        humidity: SensorRange,
        wind_speed: SensorRange,
        locations: Vec<String>,
    ) -> Result<Self> {
        if locations.is_empty() {
            return Err(MonitorError::ConfigError("no locations to sample from".to_string()));
        }
        for range in [&temperature, &humidity, &wind_speed] {
            if !range.is_valid() {
                return Err(MonitorError::ConfigError(format!(
                    "empty sensor range {}..={}",
                    range.min, range.max
                )));
            }
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            temperature,
            humidity,
            wind_speed,
            locations,
        })
    }

    pub fn from_config(seed: u64, sensors: &SensorsConfig, monitor: &MonitorSettings) -> Result<Self> {
        Self::new(
            seed,
            sensors.temperature,
            sensors.humidity,
            sensors.wind_speed,
            monitor.locations.clone(),
        )
    }

    /// Draw temperature, humidity, wind speed, then location
    pub fn next_reading(&mut self) -> Reading {
        let temperature = self.sample(self.temperature);
        let humidity = self.sample(self.humidity);
        let wind_speed = self.sample(self.wind_speed);
        let location = self
            .locations
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        Reading::new(temperature, humidity, wind_speed, location)
    }

    fn sample(&mut self, range: SensorRange) -> f64 {
        self.rng.gen_range(range.min..=range.max) as f64
    }
}

impl Iterator for ReadingGenerator {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        Some(self.next_reading())
    }
}
