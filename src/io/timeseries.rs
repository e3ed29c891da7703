// src/io/timeseries.rs

use chrono::{Duration, NaiveDateTime};
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{DataError, SimulationError};
use crate::io::synthetic::Series;
use crate::model::turbine::{Interpolation, PowerCurve};

pub const TIMESTAMP_COLUMN: &str = "Timestamp (UTC)";
pub const WIND_COLUMN: &str = "Speed (m/s)";
pub const PRICE_COLUMN: &str = "Price (Eur/MWh)";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Wind speed (m/s) assumed for blank rows before the first measurement.
pub const WIND_PLACEHOLDER: f64 = 15.0;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, DataError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        DataError::Timestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Reads a `timestamp;value` series, picking the value column by header.
///
/// Empty value cells before the first measurement take `leading_fill`, or are
/// skipped when it is `None`. Later empty cells are skipped; `regularize`
/// forward-fills them.
pub fn read_series<R: Read>(
    reader: R,
    value_column: &str,
    leading_fill: Option<f64>,
) -> Result<Series, DataError> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let ts_idx = position(TIMESTAMP_COLUMN)?;
    let value_idx = position(value_column)?;

    let mut series = Vec::new();
    let mut skipped = 0usize;
    let mut filled = 0usize;
    let mut seen_value = false;
    for record in rdr.records() {
        let record = record?;
        let ts = parse_timestamp(record.get(ts_idx).unwrap_or_default())?;
        match record.get(value_idx).filter(|v| !v.is_empty()) {
            Some(raw) => {
                let value = raw.parse::<f64>().map_err(|e| {
                    SimulationError::InvalidSample {
                        timestamp: ts,
                        reason: format!("{} '{}': {}", value_column, raw, e),
                    }
                })?;
                series.push((ts, value));
                seen_value = true;
            }
            None => match leading_fill.filter(|_| !seen_value) {
                Some(value) => {
                    series.push((ts, value));
                    filled += 1;
                }
                None => skipped += 1,
            },
        }
    }
    debug!(
        column = value_column,
        rows = series.len(),
        skipped,
        filled,
        "series loaded"
    );
    Ok(series)
}

pub fn read_wind_csv(path: impl AsRef<Path>) -> Result<Series, DataError> {
    read_series(std::fs::File::open(path)?, WIND_COLUMN, Some(WIND_PLACEHOLDER))
}

pub fn read_price_csv(path: impl AsRef<Path>) -> Result<Series, DataError> {
    read_series(std::fs::File::open(path)?, PRICE_COLUMN, None)
}

/// Reads a two-column `wind_speed;power` table (header row required).
pub fn read_power_curve<R: Read>(
    reader: R,
    interpolation: Interpolation,
) -> Result<PowerCurve, DataError> {
    let mut rdr = csv_reader(reader);
    let mut points = Vec::new();
    for row in rdr.deserialize() {
        let (wind_speed, power): (f64, f64) = row?;
        points.push((wind_speed, power));
    }
    Ok(PowerCurve::new(points, interpolation)?)
}

pub fn read_power_curve_csv(
    path: impl AsRef<Path>,
    interpolation: Interpolation,
) -> Result<PowerCurve, DataError> {
    read_power_curve(std::fs::File::open(path)?, interpolation)
}

/// Puts a raw series on a fixed time grid.
///
/// Sorts by timestamp, keeps the first of any duplicate timestamps and
/// forward-fills every grid point from the last observation at or before it.
/// The grid starts at the earliest timestamp.
pub fn regularize(mut series: Series, step: Duration) -> Result<Series, SimulationError> {
    if step <= Duration::zero() {
        return Err(SimulationError::InvalidConfiguration(format!(
            "resampling step must be positive, got {}",
            step
        )));
    }
    // Stable sort keeps the original order among duplicates
    series.sort_by_key(|&(ts, _)| ts);
    let before = series.len();
    series.dedup_by_key(|&mut (ts, _)| ts);
    if series.len() < before {
        debug!(dropped = before - series.len(), "duplicate timestamps dropped");
    }

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return Ok(series),
    };

    let mut grid = Vec::new();
    let mut idx = 0;
    let mut t = first;
    while t <= last {
        while idx + 1 < series.len() && series[idx + 1].0 <= t {
            idx += 1;
        }
        grid.push((t, series[idx].1));
        t += step;
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 7, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn parses_wind_csv() {
        let data = "Timestamp (UTC);Speed (m/s)\n04/07/2019 00:00;7.5\n04/07/2019 00:30;\n04/07/2019 01:00;8.25\n";
        let series = read_series(data.as_bytes(), WIND_COLUMN, None).unwrap();
        assert_eq!(series, vec![(at(0, 0), 7.5), (at(1, 0), 8.25)]);
    }

    #[test]
    fn leading_wind_gap_gets_placeholder() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Timestamp (UTC);Speed (m/s)").unwrap();
        writeln!(file, "04/07/2019 00:00;").unwrap();
        writeln!(file, "04/07/2019 01:00;").unwrap();
        writeln!(file, "04/07/2019 02:00;6.0").unwrap();
        writeln!(file, "04/07/2019 03:00;").unwrap();
        writeln!(file, "04/07/2019 04:00;7.0").unwrap();
        let wind = regularize(read_wind_csv(file.path()).unwrap(), Duration::hours(1)).unwrap();
        assert_eq!(
            wind,
            vec![
                (at(0, 0), WIND_PLACEHOLDER),
                (at(1, 0), WIND_PLACEHOLDER),
                (at(2, 0), 6.0),
                (at(3, 0), 6.0),
                (at(4, 0), 7.0),
            ]
        );
    }

    #[test]
    fn leading_price_gap_is_skipped() {
        let data = "Timestamp (UTC);Price (Eur/MWh)\n04/07/2019 00:00;\n04/07/2019 01:00;41.5\n";
        let series = read_series(data.as_bytes(), PRICE_COLUMN, None).unwrap();
        assert_eq!(series, vec![(at(1, 0), 41.5)]);
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "Timestamp (UTC);Price (Eur/MWh)\n04/07/2019 00:00;40\n";
        let err = read_series(data.as_bytes(), WIND_COLUMN, None).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == WIND_COLUMN));
    }

    #[test]
    fn bad_timestamp_is_reported() {
        let data = "Timestamp (UTC);Price (Eur/MWh)\n2019-07-04T00:00;40\n";
        let err = read_series(data.as_bytes(), PRICE_COLUMN, None).unwrap_err();
        assert!(matches!(err, DataError::Timestamp { .. }));
    }

    #[test]
    fn reads_power_curve_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Wind speed (m/s);Power (MW)").unwrap();
        writeln!(file, "0;0").unwrap();
        writeln!(file, "4;1.5").unwrap();
        writeln!(file, "12;8").unwrap();
        let curve = read_power_curve_csv(file.path(), Interpolation::Linear).unwrap();
        assert_eq!(curve.points().len(), 3);
        assert_eq!(curve.power(8.0), 4.75);
    }

    #[test]
    fn unsorted_power_curve_is_rejected() {
        let data = "ws;p\n5;1\n3;0\n";
        let err = read_power_curve(data.as_bytes(), Interpolation::Linear).unwrap_err();
        assert!(matches!(
            err,
            DataError::Simulation(SimulationError::InvalidPowerCurve(_))
        ));
    }

    #[test]
    fn regularize_sorts_dedups_and_fills() {
        let raw = vec![
            (at(2, 0), 3.0),
            (at(0, 0), 1.0),
            (at(0, 0), 99.0),
            (at(0, 30), 1.5),
            (at(4, 0), 5.0),
        ];
        let grid = regularize(raw, Duration::hours(1)).unwrap();
        assert_eq!(
            grid,
            vec![
                (at(0, 0), 1.0),
                (at(1, 0), 1.5),
                (at(2, 0), 3.0),
                (at(3, 0), 3.0),
                (at(4, 0), 5.0),
            ]
        );
    }

    #[test]
    fn regularize_rejects_zero_step_and_passes_empty() {
        assert!(regularize(vec![(at(0, 0), 1.0)], Duration::zero()).is_err());
        assert!(regularize(Vec::new(), Duration::hours(1)).unwrap().is_empty());
    }
}
