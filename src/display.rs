//! Console output for the monitor
//!
//! Colour-coded reading, prediction and alert lines, plus the spinner used
//! while the model trains. Output is gated by [`Verbosity`].

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::cli::Verbosity;
use crate::telemetry::{MonitorEvent, Reporter};
use crate::model::TrainingReport;
use crate::types::{AlertRecord, Prediction, Reading};

/// Console reporter
pub struct DisplayManager {
    verbosity: Verbosity,
    show_progress_bars: bool,
}

impl DisplayManager {
    pub fn new(verbosity: Verbosity, show_progress_bars: bool, color_output: bool) -> Self {
        if !color_output {
            colored::control::set_override(false);
        }
        Self {
            verbosity,
            show_progress_bars,
        }
    }

    /// Spinner for model training; hidden when quiet or disabled
    pub fn start_training(&self, n_trees: usize) -> ProgressBar {
        if !(self.show_progress_bars && self.verbosity.show_progress()) {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(n_trees as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} Training model... [{bar:40.cyan/blue}] {pos}/{len} trees")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Show a section heading
    pub fn show_stage(&self, message: &str) {
        if self.verbosity.show_readings() {
            println!("{}", message.bold().cyan());
        }
    }

    /// Print every stored alert row
    pub fn show_alerts(&self, alerts: &[AlertRecord]) {
        println!("{}", self.format_alerts(alerts));
    }

    /// Final line of a run
    pub fn show_complete(&self) {
        println!("{} {}", "✅".green(), "Monitoring complete.".green());
    }

    /// Accuracy line, followed by the seed needed to replay the run
    pub fn format_training(&self, report: &TrainingReport, seed: u64) -> String {
        let mut out = match report.accuracy {
            Some(accuracy) => format!("{} Model trained with accuracy: {:.2}", "✅".green(), accuracy),
            None => format!(
                "{} Model trained (no held-out rows, accuracy unavailable)",
                "✅".green()
            ),
        };
        out.push('\n');
        out.push_str(&format!("   seed: {} (replay with --seed {})", seed, seed).dimmed().to_string());
        if self.verbosity.show_details() {
            out.push('\n');
            out.push_str(
                &format!(
                    "   train rows: {}, test rows: {}",
                    report.train_rows, report.test_rows
                )
                .dimmed()
                .to_string(),
            );
        }
        out
    }

    /// `Data Received` and `Prediction` lines for one reading
    pub fn format_reading(&self, iteration: usize, reading: &Reading, prediction: Prediction) -> String {
        let prefix = if self.verbosity.show_details() {
            format!("[{}] ", iteration)
        } else {
            String::new()
        };
        let label = match prediction {
            Prediction::Disaster => format!("⚠️ {}", prediction).red().bold(),
            Prediction::NoDisaster => format!("✅ {}", prediction).green(),
        };
        format!(
            "\n{}Data Received: {}\nPrediction: {}",
            prefix.dimmed(),
            reading.summary(),
            label
        )
    }

    /// Heading plus one line per stored alert
    pub fn format_alerts(&self, alerts: &[AlertRecord]) -> String {
        let mut lines = vec![format!("\n{}", "📋 Saved disaster alerts:".bold())];
        if alerts.is_empty() && self.verbosity.show_details() {
            lines.push("  (none)".dimmed().to_string());
        }
        lines.extend(alerts.iter().map(|alert| alert.to_string()));
        lines.join("\n")
    }
}

impl Reporter for DisplayManager {
    fn report(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::ModelTrained { report, seed } => {
                if self.verbosity.show_readings() {
                    println!("{}", self.format_training(report, *seed));
                }
            }
            MonitorEvent::ReadingClassified {
                iteration,
                reading,
                prediction,
            } => {
                if self.verbosity.show_readings() {
                    println!("{}", self.format_reading(*iteration, reading, *prediction));
                }
            }
            MonitorEvent::AlertLogged { record } => {
                if self.verbosity.show_readings() {
                    println!(
                        "{} Alert logged to database for {} at {}",
                        "🚨".red(),
                        record.location.bold(),
                        record.timestamp
                    );
                }
            }
            MonitorEvent::RunFinished {
                iterations,
                disasters,
            } => {
                if self.verbosity.show_details() {
                    println!(
                        "\n{}",
                        format!("{} readings, {} disasters", iterations, disasters).dimmed()
                    );
                }
            }
        }
    }
}
