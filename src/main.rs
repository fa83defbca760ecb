//! Disaster Monitor - Main CLI Entry Point

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use disaster_monitor::{
    cli::{Args, Commands, Config, Verbosity},
    display::DisplayManager,
    execution,
    monitor::{seeding, SystemClock},
    store::AlertStore,
    telemetry::{MonitorEvent, Reporter, TelemetryCollector},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr `tracing` subscriber; `RUST_LOG` overrides the verbosity default
fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Train the model, run the monitor loop, dump the stored alerts
async fn run_monitor(config: &Config, display: &mut DisplayManager) -> Result<()> {
    let seed = seeding::resolve(config.monitor.seed);
    let db_path = config.store_path();

    display.show_stage("⚙️ Training AI disaster prediction model...");
    let pb = display.start_training(config.model.n_trees);
    let (forest, report) = execution::train_model(config, seed, |done| pb.set_position(done as u64))
        .context("Failed to train model")?;
    pb.finish_and_clear();

    let mut telemetry = TelemetryCollector::new();
    let trained = MonitorEvent::ModelTrained { report, seed };
    display.report(&trained);
    telemetry.report(&trained);

    display.show_stage("🧱 Setting up SQLite database...");
    let store = AlertStore::open(&db_path)
        .with_context(|| format!("Failed to open alert store at {}", db_path.display()))?;

    display.show_stage("🌐 Starting real-time disaster monitoring...");
    let summary = {
        let mut reporters = (&mut *display, &mut telemetry);
        execution::execute_monitoring(config, &forest, &store, SystemClock, seed, &mut reporters)
            .await
            .context("Monitoring aborted")?
    };

    tracing::info!(
        iterations = summary.iterations(),
        disasters = summary.disasters(),
        alerts_logged = telemetry.stats().alerts_logged,
        disaster_rate = telemetry.disaster_rate(),
        elapsed_ms = telemetry.elapsed().as_millis() as u64,
        "monitor loop finished"
    );

    let alerts = store.all().context("Failed to read saved alerts")?;
    display.show_alerts(&alerts);
    store.close().context("Failed to close alert store")?;

    display.show_complete();
    Ok(())
}

/// Print stored alerts without running the monitor
fn show_alerts(config: &Config, display: &DisplayManager, json: bool) -> Result<()> {
    let db_path = config.store_path();
    if !db_path.exists() {
        return Err(anyhow!("No alert database at {}", db_path.display()));
    }

    let store = AlertStore::open(&db_path)
        .with_context(|| format!("Failed to open alert store at {}", db_path.display()))?;
    let alerts = store.all().context("Failed to read saved alerts")?;
    store.close().context("Failed to close alert store")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
    } else {
        display.show_alerts(&alerts);
    }
    Ok(())
}

fn show_config(config: &Config, verbosity: Verbosity) -> Result<()> {
    println!("{}", "Disaster Monitor Configuration".bold().cyan());
    if let Some(path) = Config::default_path() {
        println!("{}", format!("# default location: {}", path.display()).dimmed());
    }
    println!("{}", format!("# verbosity: {}", verbosity.as_str()).dimmed());
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    args.validate().map_err(|e| anyhow!(e))?;

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate()?;

    let verbosity = args.verbosity(&config);
    init_tracing(verbosity);

    let mut display = DisplayManager::new(
        verbosity,
        config.telemetry.show_progress_bars,
        config.telemetry.color_output,
    );

    match args.command() {
        Commands::Run => run_monitor(&config, &mut display).await?,
        Commands::Alerts { json } => show_alerts(&config, &display, json)?,
        Commands::Config => show_config(&config, verbosity)?,
    }

    Ok(())
}
