// src/strategy/implementations.rs

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Result, SimulationError};
use crate::model::cooling::CoolingSpec;
use crate::strategy::traits::MaintenanceStrategy;

// =========================================================================
// 1. No Strategy
// =========================================================================

/// Never sends a vessel. The baseline: the turbine runs until the coolant
/// is gone and then stays stopped.
#[derive(Debug, Clone, Default)]
pub struct NoStrategy;

impl NoStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MaintenanceStrategy for NoStrategy {
    fn name(&self) -> &str {
        "No Strategy"
    }

    fn decide(&mut self, _pressure: f64, _time: NaiveDateTime, _wind: f64, _price: f64) -> bool {
        false
    }
}

// =========================================================================
// 2. Run To Failure
// =========================================================================

/// Waits for the turbine to stop, then asks for a vessel on every tick
/// until one can sail.
#[derive(Debug, Clone)]
pub struct RunToFailure {
    minimum_pressure: f64,
}

impl RunToFailure {
    pub fn new(cooling: &CoolingSpec) -> Self {
        Self {
            minimum_pressure: cooling.minimum_pressure,
        }
    }
}

impl MaintenanceStrategy for RunToFailure {
    fn name(&self) -> &str {
        "Run To Failure"
    }

    fn decide(&mut self, pressure: f64, _time: NaiveDateTime, _wind: f64, _price: f64) -> bool {
        pressure <= self.minimum_pressure
    }
}

// =========================================================================
// 3. Scheduled Maintenance
// =========================================================================

/// Calendar maintenance: one visit a year on a fixed day of a fixed month.
///
/// Every tick of that day counts as a trigger, so a morning with too much
/// wind can still be followed by a visit in the afternoon.
#[derive(Debug, Clone)]
pub struct ScheduledMaintenance {
    day: u32,
    month: u32,
}

impl ScheduledMaintenance {
    pub fn new(day: u32, month: u32) -> Result<Self> {
        // 2000 is a leap year, so 29 February is accepted
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "no such calendar day: {}/{}",
                day, month
            )));
        }
        Ok(Self { day, month })
    }
}

impl MaintenanceStrategy for ScheduledMaintenance {
    fn name(&self) -> &str {
        "Scheduled Maintenance"
    }

    fn decide(&mut self, _pressure: f64, time: NaiveDateTime, _wind: f64, _price: f64) -> bool {
        time.month() == self.month && time.day() == self.day
    }
}

// =========================================================================
// 4. Condition Monitoring
// =========================================================================

/// Sends a vessel once pressure drops to a threshold above the shutdown
/// floor, so the repair can happen before production is lost.
#[derive(Debug, Clone)]
pub struct ConditionMonitoring {
    pressure_threshold: f64,
}

impl ConditionMonitoring {
    pub fn new(pressure_threshold: f64) -> Self {
        Self { pressure_threshold }
    }

    /// Threshold expressed as a margin over the cooling floor.
    pub fn with_margin(cooling: &CoolingSpec, margin: f64) -> Self {
        Self::new(cooling.minimum_pressure + margin)
    }

    pub fn threshold(&self) -> f64 {
        self.pressure_threshold
    }
}

impl MaintenanceStrategy for ConditionMonitoring {
    fn name(&self) -> &str {
        "Condition Monitoring"
    }

    fn decide(&mut self, pressure: f64, _time: NaiveDateTime, _wind: f64, _price: f64) -> bool {
        pressure <= self.pressure_threshold
    }
}

// =========================================================================
// 5. Periodic Maintenance
// =========================================================================

/// Asks for a vessel once a fixed number of ticks has passed since the
/// circuit was last refilled.
///
/// The strategy is never told whether a visit happened. It infers a refill
/// from the pressure going up between two calls.
#[derive(Debug, Clone)]
pub struct PeriodicMaintenance {
    interval_ticks: usize,
    elapsed: usize,
    last_pressure: Option<f64>,
}

impl PeriodicMaintenance {
    pub fn new(interval_ticks: usize) -> Result<Self> {
        if interval_ticks == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "maintenance interval must be at least one tick".to_string(),
            ));
        }
        Ok(Self {
            interval_ticks,
            elapsed: 0,
            last_pressure: None,
        })
    }
}

impl MaintenanceStrategy for PeriodicMaintenance {
    fn name(&self) -> &str {
        "Periodic Maintenance"
    }

    fn decide(&mut self, pressure: f64, _time: NaiveDateTime, _wind: f64, _price: f64) -> bool {
        let refilled = self.last_pressure.is_some_and(|last| pressure > last);
        self.last_pressure = Some(pressure);
        if refilled {
            self.elapsed = 0;
        }

        // Keep asking once due, the vessel may be weather-bound.
        let due = self.elapsed >= self.interval_ticks;
        self.elapsed += 1;
        due
    }
}
