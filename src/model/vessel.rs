// src/model/vessel.rs

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// The maintenance vessel chartered for cooling-system visits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselSpec {
    /// Highest wind speed the vessel may sail in (m/s).
    pub max_wind_speed: f64,
    /// Ticks the turbine is out of production per visit.
    pub maintenance_duration: usize,
    /// Charter cost per round trip (Eur).
    pub visit_cost: f64,
}

impl VesselSpec {
    pub fn new(max_wind_speed: f64, maintenance_duration: usize, visit_cost: f64) -> Result<Self> {
        let spec = Self {
            max_wind_speed,
            maintenance_duration,
            visit_cost,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.maintenance_duration == 0 {
            return Err(SimulationError::InvalidConfiguration(
                "maintenance duration must be at least one tick".to_string(),
            ));
        }
        if !self.visit_cost.is_finite() || self.visit_cost < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "visit cost must be a non-negative amount, got {}",
                self.visit_cost
            )));
        }
        if self.max_wind_speed.is_nan() {
            return Err(SimulationError::InvalidConfiguration(
                "vessel wind limit is NaN".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for VesselSpec {
    fn default() -> Self {
        Self {
            max_wind_speed: 5.0,
            maintenance_duration: 24, // one day of hourly ticks
            visit_cost: 50_000.0,
        }
    }
}

/// Weather gate for a requested visit.
///
/// A refusal is final for that tick: nothing is queued, the strategy is
/// simply asked again on the next tick.
pub fn can_sail(current_wind_speed: f64, vessel: &VesselSpec) -> bool {
    current_wind_speed <= vessel.max_wind_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sails_up_to_and_including_limit() {
        let vessel = VesselSpec::new(20.0, 2, 1000.0).unwrap();
        assert!(can_sail(0.0, &vessel));
        assert!(can_sail(20.0, &vessel));
        assert!(!can_sail(20.01, &vessel));
    }

    #[test]
    fn rejects_zero_duration_and_negative_cost() {
        assert!(VesselSpec::new(20.0, 0, 1000.0).is_err());
        assert!(VesselSpec::new(20.0, 2, -1.0).is_err());
        assert!(VesselSpec::new(20.0, 2, 0.0).is_ok());
    }
}
