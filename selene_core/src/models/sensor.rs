// selene_core/src/models/sensor.rs

use crate::error::{HmmError, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the color sensor.
///
/// With probability `1 - error_rate` the sensor reports the true label of the
/// cell; otherwise it reports one of the other `num_symbols - 1` labels,
/// chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorParams {
    #[serde(default = "default_error_rate")]
    pub error_rate: f64,
    #[serde(default = "default_num_symbols")]
    pub num_symbols: usize,
}

fn default_error_rate() -> f64 {
    0.12
}

fn default_num_symbols() -> usize {
    4
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            error_rate: default_error_rate(),
            num_symbols: default_num_symbols(),
        }
    }
}

impl SensorParams {
    pub fn new(error_rate: f64, num_symbols: usize) -> Result<Self> {
        let params = Self {
            error_rate,
            num_symbols,
        };
        params.validate()?;
        Ok(params)
    }

    /// `error_rate` must lie in `[0, 1)` and the alphabet needs at least two symbols.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.error_rate) {
            return Err(HmmError::config(format!(
                "sensor error rate must be in [0, 1), got {}",
                self.error_rate
            )));
        }
        if self.num_symbols < 2 {
            return Err(HmmError::config(format!(
                "sensor alphabet needs at least 2 symbols, got {}",
                self.num_symbols
            )));
        }
        Ok(())
    }

    /// Probability of reporting the cell's true label.
    pub fn hit_probability(&self) -> f64 {
        1.0 - self.error_rate
    }

    /// Probability of reporting one specific wrong label.
    pub fn miss_probability(&self) -> f64 {
        self.error_rate / (self.num_symbols - 1) as f64
    }
}
