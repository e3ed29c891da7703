// src/strategy/traits.rs

use chrono::NaiveDateTime;
use std::fmt::Debug;

/// Decides when to ask for a maintenance vessel.
///
/// The engine calls `decide` exactly once per tick, with the turbine state
/// as it stands before that tick's pressure update. Implementations may keep
/// private counters across calls, hence `&mut self`.
///
/// We require `Send` + `Sync` so separate scenarios can run on separate threads.
pub trait MaintenanceStrategy: Debug + Send + Sync {
    /// Human readable label used in reports.
    fn name(&self) -> &str;

    /// Returns true if a vessel visit should be requested this tick.
    ///
    /// # Arguments
    /// * `current_pressure` - Coolant pressure before this tick's decay (bar).
    /// * `current_time` - Timestamp of the tick.
    /// * `current_wind_speed` - Wind speed at the turbine (m/s).
    /// * `current_price` - Day-ahead electricity price (Eur/MWh).
    fn decide(
        &mut self,
        current_pressure: f64,
        current_time: NaiveDateTime,
        current_wind_speed: f64,
        current_price: f64,
    ) -> bool;
}
