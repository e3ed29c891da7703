// src/io/reporting.rs

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::DataError;
use crate::model::turbine::OperatingState;
use crate::simulation::engine::{SimulationResult, TickRecord};

/// One line of the strategy comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub visits: usize,
    pub cancelled_dispatches: usize,
    pub running_ticks: usize,
    pub stopped_ticks: usize,
    pub maintenance_ticks: usize,
    pub total_revenue: f64,
    pub total_vessel_cost: f64,
    pub net_revenue: f64,
    pub last_visit: Option<NaiveDateTime>,
}

impl From<&SimulationResult> for StrategySummary {
    fn from(result: &SimulationResult) -> Self {
        Self {
            strategy: result.strategy.clone(),
            visits: result.visits,
            cancelled_dispatches: result.cancelled_dispatches,
            running_ticks: result.ticks_in(OperatingState::Running),
            stopped_ticks: result.ticks_in(OperatingState::Stopped),
            maintenance_ticks: result.ticks_in(OperatingState::InMaintenance),
            total_revenue: result.total_revenue,
            total_vessel_cost: result.total_vessel_cost,
            net_revenue: result.net_revenue(),
            last_visit: result.last_visit,
        }
    }
}

fn write_rows<T: Serialize>(file_path: &Path, rows: &[T]) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_path(file_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = rows.len(), path = %file_path.display(), "exported");
    Ok(())
}

/// Writes the per-tick history of one run to a CSV file.
pub fn write_simulation_log(
    file_path: impl AsRef<Path>,
    data: &[TickRecord],
) -> Result<(), DataError> {
    write_rows(file_path.as_ref(), data)
}

/// Writes one summary line per strategy.
pub fn write_summary(
    file_path: impl AsRef<Path>,
    results: &[SimulationResult],
) -> Result<(), DataError> {
    let rows: Vec<StrategySummary> = results.iter().map(StrategySummary::from).collect();
    write_rows(file_path.as_ref(), &rows)
}

/// File-name friendly form of a strategy label.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(tick: usize, state: OperatingState) -> TickRecord {
        TickRecord {
            tick,
            timestamp: NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(tick as u32, 0, 0)
                .unwrap(),
            wind_speed: 9.0,
            price: 45.0,
            power: if state == OperatingState::Running { 4.3 } else { 0.0 },
            pressure: 1.5,
            state,
            running: state == OperatingState::Running,
            visit: state == OperatingState::InMaintenance,
            visit_completed: false,
            revenue: if state == OperatingState::Running { 193.5 } else { 0.0 },
        }
    }

    fn result() -> SimulationResult {
        SimulationResult {
            strategy: "Run To Failure".to_string(),
            total_revenue: 193.5,
            total_vessel_cost: 100.0,
            visits: 1,
            cancelled_dispatches: 0,
            last_visit: None,
            records: vec![
                record(0, OperatingState::Running),
                record(1, OperatingState::Stopped),
                record(2, OperatingState::InMaintenance),
            ],
        }
    }

    #[test]
    fn summary_counts_states() {
        let summary = StrategySummary::from(&result());
        assert_eq!(summary.running_ticks, 1);
        assert_eq!(summary.stopped_ticks, 1);
        assert_eq!(summary.maintenance_ticks, 1);
        assert_eq!(summary.net_revenue, 93.5);
    }

    #[test]
    fn log_has_header_and_one_row_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        write_simulation_log(&path, &result().records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("tick,timestamp,wind_speed,price,power,pressure,state,running"));
        assert!(lines[1].contains("Running,true"));
        assert!(lines[2].contains("Stopped"));
        assert!(lines[3].contains("InMaintenance"));
    }

    #[test]
    fn summary_file_round_trips_strategy_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary(&path, &[result()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("Run To Failure,1,0,1,1,1,"));
        assert!(text.lines().next().unwrap().ends_with(",net_revenue,last_visit"));
    }

    #[test]
    fn slug_lowercases_and_joins() {
        assert_eq!(slug("Condition Monitoring"), "condition_monitoring");
        assert_eq!(slug("No Strategy"), "no_strategy");
    }
}
