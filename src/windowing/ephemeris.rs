use serde::Serialize;
use std::fmt::Display;

use crate::error::{Result, SeparatorError};

/// Linear transit ephemeris. Fields are private so the invariant
/// (`period > 0`, `duration > 0`, `occurrences >= 1`) always holds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Ephemeris {
    period: f64,
    reference_epoch: f64,
    duration: f64,
    occurrences: usize,
}

impl Ephemeris {
    pub fn new(
        period: f64,
        reference_epoch: f64,
        duration: f64,
        occurrences: usize,
    ) -> Result<Ephemeris> {
        if !(period.is_finite() && period > 0.0) {
            return Err(SeparatorError::InvalidEphemeris(format!(
                "period must be positive, got {period}"
            )));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SeparatorError::InvalidEphemeris(format!(
                "duration must be positive, got {duration}"
            )));
        }
        if !reference_epoch.is_finite() {
            return Err(SeparatorError::InvalidEphemeris(format!(
                "reference epoch must be finite, got {reference_epoch}"
            )));
        }
        if occurrences == 0 {
            return Err(SeparatorError::InvalidEphemeris(
                "at least one occurrence is required".to_string(),
            ));
        }
        Ok(Ephemeris {
            period,
            reference_epoch,
            duration,
            occurrences,
        })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn reference_epoch(&self) -> f64 {
        self.reference_epoch
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Center of occurrence `index` in the light-curve time base.
    ///
    /// Index 0 is one full period after the reference epoch, not the
    /// reference epoch itself.
    pub fn predicted_center(&self, index: usize, time_offset: f64) -> f64 {
        self.reference_epoch + time_offset + self.period * (index as f64 + 1.0)
    }
}

impl Display for Ephemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "P = {} d, t0 = {}, t14 = {} d, N = {}",
            self.period, self.reference_epoch, self.duration, self.occurrences
        )
    }
}
