mod error;
mod io;
mod logging;
mod model;
mod simulation;
mod strategy;

use chrono::{Duration, NaiveDate};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

use crate::io::reporting;
use crate::io::synthetic::SyntheticWeather;
use crate::io::timeseries;
use crate::model::sample::align;
use crate::model::turbine::PowerCurve;
use crate::simulation::config::{SimulationConfig, StrategyKind};
use crate::simulation::scenarios::compare_strategies;

#[derive(Parser, Debug)]
#[command(name = "turbine-maintenance")]
#[command(about = "Compare cooling-system maintenance strategies for an offshore wind turbine", long_about = None)]
struct Args {
    /// JSON file with cooling, vessel and strategy parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wind speed CSV (`Timestamp (UTC);Speed (m/s)`)
    #[arg(long, requires = "prices")]
    wind: Option<PathBuf>,

    /// Day-ahead price CSV (`Timestamp (UTC);Price (Eur/MWh)`)
    #[arg(long, requires = "wind")]
    prices: Option<PathBuf>,

    /// Power curve CSV (`wind speed;power`), defaults to a reference 8 MW machine
    #[arg(long)]
    power_curve: Option<PathBuf>,

    /// Days of synthetic weather when no data files are given
    #[arg(long, default_value_t = 730)]
    days: usize,

    /// Seed for the synthetic weather
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Strategies to compare
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = StrategyKind::all())]
    strategies: Vec<StrategyKind>,

    /// Directory for per-tick logs and the summary table
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_tracing(args.json_logs);

    println!("=== Offshore Wind Cooling Maintenance Simulation ===");

    // 1. SETUP CONFIGURATION
    let config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    config.validate()?;
    info!(?config, "configuration loaded");

    let power_curve = match &args.power_curve {
        Some(path) => timeseries::read_power_curve_csv(path, config.interpolation)?,
        None => PowerCurve::reference_8mw().with_interpolation(config.interpolation),
    };
    info!(
        points = power_curve.points().len(),
        interpolation = ?config.interpolation,
        "power curve ready"
    );

    // 2. LOAD OR GENERATE THE WEATHER
    let (wind, price) = match (&args.wind, &args.prices) {
        (Some(wind_path), Some(price_path)) => {
            let hour = Duration::hours(1);
            let wind = timeseries::regularize(timeseries::read_wind_csv(wind_path)?, hour)?;
            let price = timeseries::regularize(timeseries::read_price_csv(price_path)?, hour)?;
            (wind, price)
        }
        _ => {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or("invalid synthetic start date")?;
            SyntheticWeather::new(args.seed, start).generate(args.days * 24)?
        }
    };
    let samples = align(&wind, &price)?;
    println!("Input: {} hourly samples", samples.len());

    // 3. RUN EVERY STRATEGY OVER THE SAME INPUT
    let results = compare_strategies(&config, &power_curve, &samples, &args.strategies)?;

    // 4. EXPORT RESULTS
    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)?;
        for result in &results {
            let file = dir.join(format!("{}.csv", reporting::slug(&result.strategy)));
            reporting::write_simulation_log(&file, &result.records)?;
        }
        reporting::write_summary(dir.join("summary.csv"), &results)?;
        println!("Results written to {}", dir.display());
    }

    // 5. PRINT COST ANALYSIS
    println!("\n=== Revenue Analysis ===");
    for result in &results {
        println!(
            "{:<22} visits: {:>3}  downtime: {:>6} h  revenue: {:>14.2} Eur  vessels: {:>12.2} Eur  net: {:>14.2} Eur",
            result.strategy,
            result.visits,
            result.downtime_ticks(),
            result.total_revenue,
            result.total_vessel_cost,
            result.net_revenue()
        );
    }
    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.net_revenue().total_cmp(&b.net_revenue()))
    {
        println!("\nBest strategy: {}", best.strategy);
    }

    println!("\nSimulation Complete.");
    Ok(())
}
