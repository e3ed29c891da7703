// src/simulation/engine.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::model::cooling::CoolingSpec;
use crate::model::sample::{validate_samples, TimeSeriesSample};
use crate::model::turbine::{OperatingState, PowerCurve, TurbineState};
use crate::model::vessel::{can_sail, VesselSpec};
use crate::strategy::traits::MaintenanceStrategy;

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: usize,
    pub timestamp: NaiveDateTime,
    pub wind_speed: f64,
    pub price: f64,
    /// MW, zero unless the turbine was running
    pub power: f64,
    /// Pressure the tick was evaluated with, before decay
    pub pressure: f64,
    pub state: OperatingState,
    pub running: bool,
    /// A vessel visit covers this tick
    pub visit: bool,
    /// A visit finished and the circuit was refilled on this tick
    pub visit_completed: bool,
    pub revenue: f64,
}

/// Outcome of one strategy over one input replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub strategy: String,
    pub total_revenue: f64,
    pub total_vessel_cost: f64,
    pub visits: usize,
    /// Requests refused because the wind was above the vessel limit
    pub cancelled_dispatches: usize,
    /// When the most recent visit completed, if any did
    pub last_visit: Option<NaiveDateTime>,
    pub records: Vec<TickRecord>,
}

impl SimulationResult {
    /// Production revenue minus vessel charters.
    pub fn net_revenue(&self) -> f64 {
        self.total_revenue - self.total_vessel_cost
    }

    pub fn ticks_in(&self, state: OperatingState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }

    /// Ticks without production, for whatever reason.
    pub fn downtime_ticks(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.state != OperatingState::Running)
            .count()
    }
}

/// Replays one input series under one maintenance strategy.
///
/// The input and the power curve are only borrowed, so several simulations
/// can share them.
pub struct MaintenanceSimulation<'a> {
    vessel: VesselSpec,
    power_curve: &'a PowerCurve,
    samples: &'a [TimeSeriesSample],

    // The "Brain"
    strategy: Box<dyn MaintenanceStrategy>,

    // State
    turbine: TurbineState,
    current_tick: usize,

    // Accumulators
    total_revenue: f64,
    total_vessel_cost: f64,
    visits: usize,
    cancelled_dispatches: usize,
    history: Vec<TickRecord>,
}

impl<'a> MaintenanceSimulation<'a> {
    pub fn new(
        cooling: CoolingSpec,
        vessel: VesselSpec,
        power_curve: &'a PowerCurve,
        samples: &'a [TimeSeriesSample],
        strategy: Box<dyn MaintenanceStrategy>,
    ) -> Result<Self> {
        cooling.validate()?;
        vessel.validate()?;
        validate_samples(samples)?;

        Ok(Self {
            vessel,
            power_curve,
            samples,
            strategy,
            turbine: TurbineState::new(cooling),
            current_tick: 0,
            total_revenue: 0.0,
            total_vessel_cost: 0.0,
            visits: 0,
            cancelled_dispatches: 0,
            history: Vec::with_capacity(samples.len()),
        })
    }

    /// Consumes every sample and hands back the accumulated result.
    pub fn run(mut self) -> SimulationResult {
        while self.current_tick < self.samples.len() {
            self.step();
        }

        let result = SimulationResult {
            strategy: self.strategy.name().to_string(),
            total_revenue: self.total_revenue,
            total_vessel_cost: self.total_vessel_cost,
            visits: self.visits,
            cancelled_dispatches: self.cancelled_dispatches,
            last_visit: self.turbine.last_visit,
            records: self.history,
        };

        info!(
            strategy = %result.strategy,
            ticks = result.records.len(),
            visits = result.visits,
            cancelled = result.cancelled_dispatches,
            downtime = result.downtime_ticks(),
            revenue = result.total_revenue,
            vessel_cost = result.total_vessel_cost,
            "simulation finished"
        );
        result
    }

    fn step(&mut self) {
        let tick = self.current_tick;
        let sample = self.samples[tick];

        // =================================================================
        // PHASE 1: A visit whose window has just ended refills the circuit
        // =================================================================
        let completed = self.turbine.complete_visit_if_due(tick, sample.timestamp);
        if let Some(visit) = completed {
            debug!(
                tick,
                dispatched_at = visit.dispatched_at,
                timestamp = %sample.timestamp,
                "visit completed, pressure reset"
            );
        }
        let visit_completed = completed.is_some();
        let pressure = self.turbine.pressure();

        // =================================================================
        // PHASE 2: Ask the strategy, then the weather
        // =================================================================
        let wants_visit = self.strategy.decide(
            pressure,
            sample.timestamp,
            sample.wind_speed,
            sample.price,
        );

        // At most one visit at a time, requests during a visit are dropped
        if wants_visit && !self.turbine.in_maintenance() {
            if can_sail(sample.wind_speed, &self.vessel) {
                self.turbine.begin_visit(tick, self.vessel.maintenance_duration);
                self.total_vessel_cost += self.vessel.visit_cost;
                self.visits += 1;
                debug!(
                    tick,
                    timestamp = %sample.timestamp,
                    pressure,
                    wind_speed = sample.wind_speed,
                    price = sample.price,
                    "vessel dispatched"
                );
            } else {
                self.cancelled_dispatches += 1;
                trace!(
                    tick,
                    wind_speed = sample.wind_speed,
                    limit = self.vessel.max_wind_speed,
                    "vessel cannot sail"
                );
            }
        }

        // =================================================================
        // PHASE 3: Production
        // =================================================================
        let state = self.turbine.operating_state();
        let (power, revenue) = match state {
            OperatingState::Running => {
                let power = self.power_curve.power(sample.wind_speed);
                (power, power * sample.price)
            }
            OperatingState::Stopped | OperatingState::InMaintenance => (0.0, 0.0),
        };
        self.total_revenue += revenue;

        // =================================================================
        // PHASE 4: Decay, record & advance
        // =================================================================
        // Also on a completion tick, so full pressure is seen on that tick only
        self.turbine.cooling.advance();

        self.history.push(TickRecord {
            tick,
            timestamp: sample.timestamp,
            wind_speed: sample.wind_speed,
            price: sample.price,
            power,
            pressure,
            state,
            running: self.turbine.is_running,
            visit: state == OperatingState::InMaintenance,
            visit_completed,
            revenue,
        });
        self.current_tick += 1;
    }
}
