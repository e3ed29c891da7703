// src/simulation/config.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{DataError, Result, SimulationError};
use crate::model::cooling::CoolingSpec;
use crate::model::turbine::Interpolation;
use crate::model::vessel::VesselSpec;
use crate::strategy::implementations::{
    ConditionMonitoring, NoStrategy, PeriodicMaintenance, RunToFailure, ScheduledMaintenance,
};
use crate::strategy::traits::MaintenanceStrategy;

/// The strategies that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    None,
    RunToFailure,
    Scheduled,
    ConditionMonitoring,
    Periodic,
}

impl StrategyKind {
    pub fn all() -> [StrategyKind; 5] {
        [
            StrategyKind::None,
            StrategyKind::RunToFailure,
            StrategyKind::Scheduled,
            StrategyKind::ConditionMonitoring,
            StrategyKind::Periodic,
        ]
    }
}

/// Parameters of the strategies that take any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySettings {
    pub scheduled_day: u32,
    pub scheduled_month: u32,
    /// Condition monitoring triggers at `minimum_pressure + condition_margin`.
    pub condition_margin: f64,
    pub periodic_interval: usize,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            scheduled_day: 1,
            scheduled_month: 6,
            condition_margin: 0.1,
            periodic_interval: 24 * 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub cooling: CoolingSpec,
    pub vessel: VesselSpec,
    pub strategies: StrategySettings,
    pub interpolation: Interpolation,
}

impl SimulationConfig {
    /// Reads a JSON config. Missing sections fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.cooling.validate()?;
        self.vessel.validate()?;
        if !self.strategies.condition_margin.is_finite() || self.strategies.condition_margin < 0.0
        {
            return Err(SimulationError::InvalidConfiguration(format!(
                "condition margin must be non-negative, got {}",
                self.strategies.condition_margin
            )));
        }
        Ok(())
    }

    /// Builds a fresh strategy instance, so each run gets its own private state.
    pub fn build_strategy(&self, kind: StrategyKind) -> Result<Box<dyn MaintenanceStrategy>> {
        let settings = &self.strategies;
        let strategy: Box<dyn MaintenanceStrategy> = match kind {
            StrategyKind::None => Box::new(NoStrategy::new()),
            StrategyKind::RunToFailure => Box::new(RunToFailure::new(&self.cooling)),
            StrategyKind::Scheduled => Box::new(ScheduledMaintenance::new(
                settings.scheduled_day,
                settings.scheduled_month,
            )?),
            StrategyKind::ConditionMonitoring => {
                let strategy =
                    ConditionMonitoring::with_margin(&self.cooling, settings.condition_margin);
                debug!(threshold = strategy.threshold(), "condition monitoring threshold");
                Box::new(strategy)
            }
            StrategyKind::Periodic => {
                Box::new(PeriodicMaintenance::new(settings.periodic_interval)?)
            }
        };
        Ok(strategy)
    }
}
