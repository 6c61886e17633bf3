//! Fan-out of the periodic tick to registered faders.
//!
//! The original firmware registered each instance with a global second-tick
//! event bus. Here the seam is inverted: the bank exposes a plain
//! [`tick`](FaderBank::tick) entry point and the surrounding process owns the
//! timer, so the control logic carries no scheduler dependency at all.

use tfd_devices::DeviceRegistry;

use crate::fader::FaderController;

/// All fader controllers registered for periodic ticks.
#[derive(Default)]
pub struct FaderBank {
    faders: Vec<FaderController>,
}

impl FaderBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bank from already-built controllers.
    pub fn from_faders(faders: Vec<FaderController>) -> Self {
        Self { faders }
    }

    /// Register a controller for tick delivery.
    pub fn register(&mut self, fader: FaderController) {
        self.faders.push(fader);
    }

    /// Deliver one tick to every controller, in registration order.
    ///
    /// Synchronous and non-reentrant: each controller runs to completion
    /// before the next one starts.
    pub fn tick(&mut self, devices: &mut DeviceRegistry) {
        for fader in &mut self.faders {
            fader.tick(devices);
        }
    }

    /// Registered controllers.
    pub fn faders(&self) -> &[FaderController] {
        &self.faders
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.faders.len()
    }

    /// True when no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.faders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::FadeBand;
    use crate::fader::PollIntervals;
    use tfd_devices::{SimSensor, SimSwitch};

    #[test]
    fn empty_bank_tick_is_a_noop() {
        let mut bank = FaderBank::new();
        let mut devices = DeviceRegistry::new();
        bank.tick(&mut devices);
        assert!(bank.is_empty());
    }

    #[test]
    fn bank_ticks_every_fader() {
        let mut devices = DeviceRegistry::new();
        let hot = SimSensor::new('T', 200.0);
        let t_id = devices.register_sensor(Box::new(hot));
        let cold = SimSensor::new('B', 20.0);
        let b_id = devices.register_sensor(Box::new(cold));

        let fan = SimSwitch::new();
        let fan_probe = fan.probe();
        let fan_id = devices.register_switch("fan", Box::new(fan)).unwrap();
        let bed_fan = SimSwitch::new();
        let bed_probe = bed_fan.probe();
        let bed_id = devices.register_switch("bed_fan", Box::new(bed_fan)).unwrap();

        let poll = PollIntervals {
            heatup: 1,
            cooldown: 1,
            fading: 1,
        };
        let band = FadeBand::new(50.0, 150.0, 0, 255);

        let mut bank = FaderBank::new();
        bank.register(FaderController::new("hotend", vec![t_id], band, fan_id, poll).unwrap());
        bank.register(FaderController::new("bed", vec![b_id], band, bed_id, poll).unwrap());
        assert_eq!(bank.len(), 2);

        bank.tick(&mut devices);

        // Each fader acted on its own sensor/switch pair only
        assert_eq!(fan_probe.last_value(), Some(255.0));
        assert_eq!(bed_probe.last_value(), Some(0.0));
    }
}
