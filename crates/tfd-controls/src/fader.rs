//! Fader controller: per-instance state machine and output dispatch.

use serde::{Deserialize, Serialize};
use tfd_core::{SensorId, SwitchId};
use tfd_devices::DeviceRegistry;

use crate::band::{FadeBand, FadeRegion};
use crate::error::{ControlError, ControlResult};

/// Poll intervals, in ticks, for each region of the band.
///
/// Cadence adapts to urgency: tens of seconds while fully idle or fully on,
/// typically one tick while mid-transition so the ramp is tracked closely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollIntervals {
    /// Ticks between polls while idle below the band.
    pub heatup: u32,
    /// Ticks between polls while fully on above the band.
    pub cooldown: u32,
    /// Ticks between polls while inside the band.
    pub fading: u32,
}

/// One fader instance.
///
/// Owns its handles and mutable state exclusively; the host invokes
/// [`tick`](FaderController::tick) once per unit period, synchronously, for
/// the process lifetime. No method blocks and no panic escapes `tick` in
/// normal operation.
#[derive(Debug)]
pub struct FaderController {
    name: String,
    sources: Vec<SensorId>,
    band: FadeBand,
    switch: SwitchId,
    poll: PollIntervals,
    countdown: i32,
    // NaN sentinel: never equal to any real duty, so the first decision
    // always dispatches.
    last_value: f64,
    is_on: bool,
}

impl FaderController {
    /// Create a controller over a resolved, non-empty sensor subset.
    pub fn new(
        name: impl Into<String>,
        sources: Vec<SensorId>,
        band: FadeBand,
        switch: SwitchId,
        poll: PollIntervals,
    ) -> ControlResult<Self> {
        if sources.is_empty() {
            return Err(ControlError::InvalidArg {
                what: "fader needs at least one temperature source",
            });
        }
        if poll.heatup == 0 || poll.cooldown == 0 || poll.fading == 0 {
            return Err(ControlError::InvalidArg {
                what: "poll intervals must be at least one tick",
            });
        }
        Ok(Self {
            name: name.into(),
            sources,
            band,
            switch,
            poll,
            countdown: poll.heatup as i32,
            last_value: f64::NAN,
            is_on: false,
        })
    }

    /// Entry name this fader was configured under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The temperature→duty mapping in use.
    pub fn band(&self) -> &FadeBand {
        &self.band
    }

    /// Handles of the bound temperature sources.
    pub fn sources(&self) -> &[SensorId] {
        &self.sources
    }

    /// Handle of the driven switch.
    pub fn switch(&self) -> SwitchId {
        self.switch
    }

    /// Ticks remaining until the next poll.
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    /// Last duty value dispatched, `None` before the first dispatch.
    pub fn last_value(&self) -> Option<f64> {
        if self.last_value.is_nan() {
            None
        } else {
            Some(self.last_value)
        }
    }

    /// Last on/off state dispatched.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Handle one periodic tick.
    ///
    /// Most ticks only decrement the countdown. When it expires, the group
    /// temperature is sampled, the target duty dispatched, and the countdown
    /// reset to the poll interval of the region just observed.
    pub fn tick(&mut self, devices: &mut DeviceRegistry) {
        if self.countdown > 1 {
            self.countdown -= 1;
            return;
        }

        let temp = self.highest_temperature(devices);
        match self.band.region(temp) {
            FadeRegion::Idle => {
                self.dispatch(self.band.pwm_low, devices);
                self.countdown = self.poll.heatup as i32;
            }
            FadeRegion::Full => {
                self.dispatch(self.band.pwm_high, devices);
                self.countdown = self.poll.cooldown as i32;
            }
            FadeRegion::Fading => {
                self.dispatch(self.band.duty(temp), devices);
                self.countdown = self.poll.fading as i32;
            }
        }
    }

    /// Highest temperature across the bound sources.
    ///
    /// An unreadable source contributes nothing; with every source
    /// unreadable the result is 0.0, which drives the output to idle.
    fn highest_temperature(&self, devices: &DeviceRegistry) -> f64 {
        let mut high = 0.0_f64;
        for &id in &self.sources {
            if let Ok(temp) = devices.read_temperature(id)
                && temp > high
            {
                high = temp;
            }
        }
        high
    }

    /// Dispatch a duty value to the switch, suppressing redundant writes.
    ///
    /// State and value writes are each best-effort: a failure is logged and
    /// not retried, and local state has already been updated optimistically,
    /// so in-memory may diverge from the hardware until the next differing
    /// dispatch.
    fn dispatch(&mut self, value: f64, devices: &mut DeviceRegistry) {
        if value == self.last_value {
            return;
        }

        let on = value > self.band.pwm_low;
        if on != self.is_on {
            self.is_on = on;
            if let Err(e) = devices.set_switch_state(self.switch, on) {
                tracing::warn!("Failed updating fader '{}' switch state: {}", self.name, e);
            }
        }

        self.last_value = value;
        if let Err(e) = devices.set_switch_value(self.switch, value) {
            tracing::warn!("Failed updating fader '{}' duty value: {}", self.name, e);
        }
    }
}
