// src/error.rs

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised before a simulation run starts.
///
/// Once the tick loop begins nothing can fail, so every variant here is
/// detected at construction or alignment time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Misaligned input at sample {index}: wind timestamp {wind} != price timestamp {price}")]
    MisalignedInput {
        index: usize,
        wind: NaiveDateTime,
        price: NaiveDateTime,
    },

    #[error("Misaligned input: {wind} wind samples but {price} price samples")]
    LengthMismatch { wind: usize, price: usize },

    #[error("Invalid sample at {timestamp}: {reason}")]
    InvalidSample {
        timestamp: NaiveDateTime,
        reason: String,
    },

    #[error("Invalid power curve: {0}")]
    InvalidPowerCurve(String),
}

/// Errors from loading input data or writing reports.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot parse timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

pub type Result<T, E = SimulationError> = std::result::Result<T, E>;
