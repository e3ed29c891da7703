// src/model/turbine.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::model::cooling::{CoolingSpec, PressureModel};

/// How the power curve is read between tabulated wind speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight line between the two surrounding bins.
    #[default]
    Linear,
    /// Power of the closest tabulated wind speed.
    Nearest,
}

/// Wind speed (m/s) to power (MW) table.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurve {
    points: Vec<(f64, f64)>,
    interpolation: Interpolation,
}

impl PowerCurve {
    /// Builds a curve from `(wind_speed, power)` pairs sorted by wind speed.
    pub fn new(points: Vec<(f64, f64)>, interpolation: Interpolation) -> Result<Self> {
        if points.is_empty() {
            return Err(SimulationError::InvalidPowerCurve(
                "table has no points".to_string(),
            ));
        }
        if let Some((ws, p)) = points
            .iter()
            .find(|(ws, p)| !ws.is_finite() || !p.is_finite())
        {
            return Err(SimulationError::InvalidPowerCurve(format!(
                "non-finite entry ({}, {})",
                ws, p
            )));
        }
        if let Some(pair) = points.windows(2).find(|pair| pair[1].0 <= pair[0].0) {
            return Err(SimulationError::InvalidPowerCurve(format!(
                "wind speeds must be strictly ascending, found {} after {}",
                pair[1].0, pair[0].0
            )));
        }
        Ok(Self {
            points,
            interpolation,
        })
    }

    /// A generic 8 MW offshore machine: cut-in 3 m/s, rated 12 m/s, cut-out 25 m/s.
    pub fn reference_8mw() -> Self {
        let points = vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.3),
            (5.0, 0.7),
            (6.0, 1.3),
            (7.0, 2.1),
            (8.0, 3.1),
            (9.0, 4.3),
            (10.0, 5.6),
            (11.0, 6.9),
            (12.0, 8.0),
            (25.0, 8.0),
            (25.5, 0.0),
            (40.0, 0.0),
        ];
        Self {
            points,
            interpolation: Interpolation::Linear,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Power output in MW. Wind outside the table clips to the boundary value;
    /// NaN reads as below the table.
    pub fn power(&self, wind_speed: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if wind_speed.is_nan() || wind_speed <= first.0 {
            return first.1;
        }
        if wind_speed >= last.0 {
            return last.1;
        }

        // first.0 < wind_speed < last.0, so 1 <= idx < len
        let idx = self.points.partition_point(|&(ws, _)| ws <= wind_speed);
        let (lo_ws, lo_p) = self.points[idx - 1];
        let (hi_ws, hi_p) = self.points[idx];

        match self.interpolation {
            Interpolation::Linear => {
                let frac = (wind_speed - lo_ws) / (hi_ws - lo_ws);
                lo_p + frac * (hi_p - lo_p)
            }
            // Ties go to the lower bin.
            Interpolation::Nearest => {
                if hi_ws - wind_speed < wind_speed - lo_ws {
                    hi_p
                } else {
                    lo_p
                }
            }
        }
    }
}

/// What the turbine is doing during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperatingState {
    Running,
    /// Coolant pressure at the floor, turbine shut down.
    Stopped,
    /// A vessel visit is in progress.
    InMaintenance,
}

/// A visit that has been dispatched but not yet completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenVisit {
    pub dispatched_at: usize,
    /// First tick after the maintenance window.
    pub completes_at: usize,
}

/// The single mutable entity of a run.
#[derive(Debug, Clone)]
pub struct TurbineState {
    pub cooling: PressureModel,
    pub is_running: bool,
    pub last_visit: Option<NaiveDateTime>,
    pub open_visit: Option<OpenVisit>,
}

impl TurbineState {
    pub fn new(spec: CoolingSpec) -> Self {
        Self {
            cooling: PressureModel::new(spec),
            is_running: true,
            last_visit: None,
            open_visit: None,
        }
    }

    pub fn pressure(&self) -> f64 {
        self.cooling.pressure()
    }

    /// Closes the open visit if its window ended before `tick`.
    ///
    /// Returns the visit when it completed on this tick and the circuit
    /// was refilled.
    pub fn complete_visit_if_due(
        &mut self,
        tick: usize,
        timestamp: NaiveDateTime,
    ) -> Option<OpenVisit> {
        let visit = self.open_visit.filter(|v| v.completes_at == tick)?;
        self.open_visit = None;
        self.cooling.reset();
        self.last_visit = Some(timestamp);
        Some(visit)
    }

    pub fn in_maintenance(&self) -> bool {
        self.open_visit.is_some()
    }

    /// Opens a visit covering ticks `[tick, tick + duration)`.
    pub fn begin_visit(&mut self, tick: usize, duration: usize) {
        self.open_visit = Some(OpenVisit {
            dispatched_at: tick,
            completes_at: tick.saturating_add(duration),
        });
    }

    /// Classifies the current tick and updates `is_running`.
    pub fn operating_state(&mut self) -> OperatingState {
        let state = if self.in_maintenance() {
            OperatingState::InMaintenance
        } else if self.cooling.is_depleted() {
            OperatingState::Stopped
        } else {
            OperatingState::Running
        };
        self.is_running = state == OperatingState::Running;
        state
    }
}
