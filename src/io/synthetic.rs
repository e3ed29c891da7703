// src/io/synthetic.rs

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Weibull};

use crate::error::{Result, SimulationError};

pub type Series = Vec<(NaiveDateTime, f64)>;

/// Hourly timestamps starting at `start`.
fn hourly_timestamps(start: NaiveDateTime, ticks: usize) -> Vec<NaiveDateTime> {
    (0..ticks)
        .map(|i| start + Duration::hours(i as i64))
        .collect()
}

/// Reproducible stand-in for measured wind and day-ahead price data.
///
/// Wind speeds are Weibull draws smoothed hour to hour so calm and stormy
/// spells last a while. Prices follow a daily cycle with normal noise.
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
    pub seed: u64,
    pub start: NaiveDateTime,
    /// Weibull scale (m/s)
    pub wind_scale: f64,
    /// Weibull shape, 2.0 is the usual Rayleigh-like offshore fit
    pub wind_shape: f64,
    /// Weight of the previous hour, 0.0 gives independent draws
    pub persistence: f64,
    pub price_mean: f64,
    pub price_daily_amplitude: f64,
    pub price_std_dev: f64,
}

impl SyntheticWeather {
    pub fn new(seed: u64, start: NaiveDateTime) -> Self {
        Self {
            seed,
            start,
            wind_scale: 9.0,
            wind_shape: 2.0,
            persistence: 0.7,
            price_mean: 50.0,
            price_daily_amplitude: 15.0,
            price_std_dev: 8.0,
        }
    }

    /// Generates aligned wind (m/s) and price (Eur/MWh) series.
    pub fn generate(&self, ticks: usize) -> Result<(Series, Series)> {
        let weibull = Weibull::new(self.wind_scale, self.wind_shape)
            .map_err(|e| SimulationError::InvalidConfiguration(format!("wind model: {}", e)))?;
        let noise = Normal::new(0.0, self.price_std_dev)
            .map_err(|e| SimulationError::InvalidConfiguration(format!("price model: {}", e)))?;
        if !(0.0..1.0).contains(&self.persistence) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "persistence must be in [0, 1), got {}",
                self.persistence
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut wind = Vec::with_capacity(ticks);
        let mut price = Vec::with_capacity(ticks);
        let mut last_wind = weibull.sample(&mut rng);

        for ts in hourly_timestamps(self.start, ticks) {
            let draw: f64 = weibull.sample(&mut rng);
            last_wind = self.persistence * last_wind + (1.0 - self.persistence) * draw;
            wind.push((ts, last_wind));

            // Peak around 18:00, trough around 06:00
            let hour = ts.hour() as f64 + ts.minute() as f64 / 60.0;
            let phase = 2.0 * std::f64::consts::PI * (hour - 12.0) / 24.0;
            let p = self.price_mean
                + self.price_daily_amplitude * phase.sin()
                + noise.sample(&mut rng);
            price.push((ts, p));
        }

        Ok((wind, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn same_seed_same_series() {
        let a = SyntheticWeather::new(11, start()).generate(500).unwrap();
        let b = SyntheticWeather::new(11, start()).generate(500).unwrap();
        assert_eq!(a, b);
        let c = SyntheticWeather::new(12, start()).generate(500).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn series_are_hourly_and_aligned() {
        let (wind, price) = SyntheticWeather::new(3, start()).generate(48).unwrap();
        assert_eq!(wind.len(), 48);
        for (w, p) in wind.iter().zip(price.iter()) {
            assert_eq!(w.0, p.0);
            assert!(w.1 >= 0.0 && w.1.is_finite());
        }
        assert_eq!(wind[1].0 - wind[0].0, Duration::hours(1));
    }

    #[test]
    fn wind_mean_is_plausible() {
        let (wind, _) = SyntheticWeather::new(5, start()).generate(24 * 365).unwrap();
        let mean = wind.iter().map(|(_, w)| w).sum::<f64>() / wind.len() as f64;
        // Weibull(9, 2) has mean ~7.98 m/s
        assert!(mean > 6.5 && mean < 9.5, "mean wind {}", mean);
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let mut weather = SyntheticWeather::new(1, start());
        weather.wind_scale = -1.0;
        assert!(weather.generate(10).is_err());

        let mut weather = SyntheticWeather::new(1, start());
        weather.persistence = 1.0;
        assert!(weather.generate(10).is_err());
    }

    #[test]
    fn timestamps_step_one_hour() {
        let stamps = hourly_timestamps(start(), 5);
        assert_eq!(stamps.len(), 5);
        assert_eq!(stamps[4], start() + Duration::hours(4));
    }
}
