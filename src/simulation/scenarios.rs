// src/simulation/scenarios.rs

use rayon::prelude::*;

use crate::error::Result;
use crate::model::sample::TimeSeriesSample;
use crate::model::turbine::PowerCurve;
use crate::simulation::config::{SimulationConfig, StrategyKind};
use crate::simulation::engine::{MaintenanceSimulation, SimulationResult};

/// Runs one strategy over the input.
pub fn simulate(
    config: &SimulationConfig,
    power_curve: &PowerCurve,
    samples: &[TimeSeriesSample],
    kind: StrategyKind,
) -> Result<SimulationResult> {
    let strategy = config.build_strategy(kind)?;
    let sim = MaintenanceSimulation::new(
        config.cooling,
        config.vessel,
        power_curve,
        samples,
        strategy,
    )?;
    Ok(sim.run())
}

/// Evaluates several strategies over the same input, one engine per thread.
///
/// Results come back in the order of `kinds`. Any configuration error
/// aborts the whole comparison.
pub fn compare_strategies(
    config: &SimulationConfig,
    power_curve: &PowerCurve,
    samples: &[TimeSeriesSample],
    kinds: &[StrategyKind],
) -> Result<Vec<SimulationResult>> {
    config.validate()?;
    kinds
        .par_iter()
        .map(|&kind| simulate(config, power_curve, samples, kind))
        .collect()
}
