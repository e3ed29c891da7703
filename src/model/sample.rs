// src/model/sample.rs

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Result, SimulationError};

/// One tick of input: what the wind and the market were doing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesSample {
    pub timestamp: NaiveDateTime,
    /// m/s
    pub wind_speed: f64,
    /// Eur/MWh
    pub price: f64,
}

/// Zips a wind series and a price series into samples.
///
/// The two series must cover exactly the same timestamps in the same order;
/// no partial alignment is attempted.
pub fn align(
    wind: &[(NaiveDateTime, f64)],
    price: &[(NaiveDateTime, f64)],
) -> Result<Vec<TimeSeriesSample>> {
    if wind.len() != price.len() {
        return Err(SimulationError::LengthMismatch {
            wind: wind.len(),
            price: price.len(),
        });
    }

    let mut samples = Vec::with_capacity(wind.len());
    for (index, (&(wind_ts, wind_speed), &(price_ts, price))) in
        wind.iter().zip(price.iter()).enumerate()
    {
        if wind_ts != price_ts {
            return Err(SimulationError::MisalignedInput {
                index,
                wind: wind_ts,
                price: price_ts,
            });
        }
        samples.push(TimeSeriesSample {
            timestamp: wind_ts,
            wind_speed,
            price,
        });
    }
    validate_samples(&samples)?;
    Ok(samples)
}

/// Checks a replay input before any tick runs.
///
/// Wind must be finite and non-negative, prices finite, and timestamps
/// strictly increasing.
pub fn validate_samples(samples: &[TimeSeriesSample]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        if !sample.wind_speed.is_finite() || sample.wind_speed < 0.0 {
            return Err(SimulationError::InvalidSample {
                timestamp: sample.timestamp,
                reason: format!("wind speed {}", sample.wind_speed),
            });
        }
        // Negative prices are real on day-ahead markets, only reject garbage.
        if !sample.price.is_finite() {
            return Err(SimulationError::InvalidSample {
                timestamp: sample.timestamp,
                reason: format!("price {}", sample.price),
            });
        }
        if index > 0 && sample.timestamp <= samples[index - 1].timestamp {
            return Err(SimulationError::InvalidSample {
                timestamp: sample.timestamp,
                reason: format!(
                    "timestamp at index {} does not follow {}",
                    index,
                    samples[index - 1].timestamp
                ),
            });
        }
    }
    Ok(())
}
