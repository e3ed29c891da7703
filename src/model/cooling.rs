// src/model/cooling.rs

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Static parameters of the turbine cooling circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolingSpec {
    /// Pressure after a completed visit (bar).
    pub initial_pressure: f64,
    /// Pressure at or below which the turbine must stop (bar).
    pub minimum_pressure: f64,
    /// Pressure lost per tick (bar).
    pub decline_rate: f64,
}

impl CoolingSpec {
    pub fn new(initial_pressure: f64, minimum_pressure: f64, decline_rate: f64) -> Result<Self> {
        let spec = Self {
            initial_pressure,
            minimum_pressure,
            decline_rate,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.initial_pressure, self.minimum_pressure, self.decline_rate];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "cooling parameters must be finite: {:?}",
                self
            )));
        }
        if self.minimum_pressure >= self.initial_pressure {
            return Err(SimulationError::InvalidConfiguration(format!(
                "minimum pressure {} must be below initial pressure {}",
                self.minimum_pressure, self.initial_pressure
            )));
        }
        if self.decline_rate <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "decline rate must be positive, got {}",
                self.decline_rate
            )));
        }
        Ok(())
    }
}

impl Default for CoolingSpec {
    fn default() -> Self {
        Self {
            initial_pressure: 2.0,
            minimum_pressure: 0.5,
            decline_rate: 0.0001,
        }
    }
}

/// Tracks coolant pressure between maintenance visits.
///
/// Pressure falls linearly by `decline_rate` each tick and is clamped at the
/// floor. Only a completed visit brings it back to `initial_pressure`.
#[derive(Debug, Clone)]
pub struct PressureModel {
    spec: CoolingSpec,
    pressure: f64,
}

impl PressureModel {
    pub fn new(spec: CoolingSpec) -> Self {
        Self {
            pressure: spec.initial_pressure,
            spec,
        }
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// True once the pressure has reached the floor.
    pub fn is_depleted(&self) -> bool {
        self.pressure <= self.spec.minimum_pressure
    }

    /// One tick of decay.
    pub fn advance(&mut self) {
        self.pressure = (self.pressure - self.spec.decline_rate).max(self.spec.minimum_pressure);
    }

    /// Refill after a completed visit.
    pub fn reset(&mut self) {
        self.pressure = self.spec.initial_pressure;
    }
}
