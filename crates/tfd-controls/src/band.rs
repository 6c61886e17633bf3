//! Fade band: the pure temperature→duty mapping.
//!
//! The band is the interval `[temp_low, temp_high]`. At or below the low
//! bound the output idles at `pwm_low`; at or above the high bound it sits at
//! `pwm_high`; strictly inside, the duty ramps linearly with the interpolated
//! fraction truncated toward zero (not rounded) onto the discrete range.

use serde::{Deserialize, Serialize};

/// Which side of the fade band a temperature falls on.
///
/// There is no stored state: the region is recomputed from the sampled
/// temperature on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeRegion {
    /// At or below the band: output idles.
    Idle,
    /// Strictly inside the band: output ramps.
    Fading,
    /// At or above the band: output at maximum.
    Full,
}

/// Temperature band and the duty range it maps onto.
///
/// Invariants `temp_high >= temp_low` and `pwm_high >= pwm_low` are enforced
/// by clamping the high bound up at construction, never by rejecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeBand {
    /// Lower temperature bound (°C).
    pub temp_low: f64,
    /// Upper temperature bound (°C), >= `temp_low`.
    pub temp_high: f64,
    /// Duty dispatched while idle.
    pub pwm_low: f64,
    /// Duty dispatched while fully on, >= `pwm_low`.
    pub pwm_high: f64,
}

impl FadeBand {
    /// Build a band from configured bounds.
    ///
    /// Duty bounds are 8-bit in configuration; arithmetic is done in f64.
    pub fn new(temp_low: f64, temp_high: f64, pwm_low: u8, pwm_high: u8) -> Self {
        Self {
            temp_low,
            temp_high: temp_high.max(temp_low),
            pwm_low: f64::from(pwm_low),
            pwm_high: f64::from(pwm_high.max(pwm_low)),
        }
    }

    /// Classify a temperature against the band.
    ///
    /// The idle check comes first, so a degenerate band
    /// (`temp_high == temp_low`) resolves to `Idle` or `Full`, never
    /// `Fading`.
    pub fn region(&self, temp: f64) -> FadeRegion {
        if temp <= self.temp_low {
            FadeRegion::Idle
        } else if temp >= self.temp_high {
            FadeRegion::Full
        } else {
            FadeRegion::Fading
        }
    }

    /// Duty value for a temperature.
    pub fn duty(&self, temp: f64) -> f64 {
        match self.region(temp) {
            FadeRegion::Idle => self.pwm_low,
            FadeRegion::Full => self.pwm_high,
            FadeRegion::Fading => {
                // Only reachable when temp_high > temp_low strictly, so the
                // division cannot hit a zero-width band.
                let frac = (temp - self.temp_low) / (self.temp_high - self.temp_low);
                self.pwm_low + (frac * (self.pwm_high - self.pwm_low)).floor()
            }
        }
    }
}
