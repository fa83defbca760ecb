//! Telemetry for the monitor loop
//!
//! The loop reports through the [`Reporter`] trait. The console display is
//! one reporter; [`TelemetryCollector`] records events and keeps run stats.

use std::time::{Duration, Instant};

use crate::model::TrainingReport;
use crate::types::{AlertRecord, Prediction, Reading};

/// Events emitted while monitoring
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    ModelTrained {
        report: TrainingReport,
        seed: u64,
    },
    ReadingClassified {
        iteration: usize,
        reading: Reading,
        prediction: Prediction,
    },
    AlertLogged {
        record: AlertRecord,
    },
    RunFinished {
        iterations: usize,
        disasters: usize,
    },
}

/// Side channel for monitor events
pub trait Reporter {
    fn report(&mut self, event: &MonitorEvent);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: &MonitorEvent) {
        (**self).report(event);
    }
}

impl<A: Reporter, B: Reporter> Reporter for (A, B) {
    fn report(&mut self, event: &MonitorEvent) {
        self.0.report(event);
        self.1.report(event);
    }
}

/// Reporter that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &MonitorEvent) {}
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    pub readings: usize,
    pub disasters: usize,
    pub alerts_logged: usize,
}

/// Telemetry collector
#[derive(Debug, Clone)]
pub struct TelemetryCollector {
    events: Vec<MonitorEvent>,
    stats: TelemetryStats,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            stats: TelemetryStats::default(),
            start_time: Instant::now(),
        }
    }

    /// Get current statistics
    pub fn stats(&self) -> &TelemetryStats {
        &self.stats
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> &[MonitorEvent] {
        &self.events
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Predictions in iteration order
    pub fn predictions(&self) -> Vec<Prediction> {
        self.events
            .iter()
            .filter_map(|event| match event {
                MonitorEvent::ReadingClassified { prediction, .. } => Some(*prediction),
                _ => None,
            })
            .collect()
    }

    /// Share of readings classified as disasters
    pub fn disaster_rate(&self) -> f64 {
        if self.stats.readings == 0 {
            0.0
        } else {
            self.stats.disasters as f64 / self.stats.readings as f64
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TelemetryCollector {
    fn report(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::ReadingClassified { prediction, .. } => {
                self.stats.readings += 1;
                if prediction.is_disaster() {
                    self.stats.disasters += 1;
                }
            }
            MonitorEvent::AlertLogged { .. } => {
                self.stats.alerts_logged += 1;
            }
            MonitorEvent::ModelTrained { .. } | MonitorEvent::RunFinished { .. } => {}
        }
        self.events.push(event.clone());
    }
}
