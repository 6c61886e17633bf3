//! Simulation device models.
//!
//! Used by the CLI runner and by tests. Each model comes with a cloneable
//! probe that shares state with the registered device, so a test (or the
//! simulated environment) can drive readings and observe writes after the
//! device itself has been boxed into the registry.
//!
//! Probes use `Rc<Cell<..>>`: the control loop is single-threaded by design,
//! so no synchronization is needed.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{DeviceError, DeviceResult};
use crate::sensor::TemperatureSource;
use crate::switch::SwitchOutput;

/// Simulated temperature source with an externally settable reading.
pub struct SimSensor {
    designator: char,
    temperature: Rc<Cell<f64>>,
    online: Rc<Cell<bool>>,
}

impl SimSensor {
    /// Create a sensor with the given designator tag and initial reading.
    pub fn new(designator: char, initial: f64) -> Self {
        Self {
            designator,
            temperature: Rc::new(Cell::new(initial)),
            online: Rc::new(Cell::new(true)),
        }
    }

    /// Get a probe sharing this sensor's state.
    pub fn probe(&self) -> SimSensorProbe {
        SimSensorProbe {
            temperature: Rc::clone(&self.temperature),
            online: Rc::clone(&self.online),
        }
    }
}

impl TemperatureSource for SimSensor {
    fn designator(&self) -> char {
        self.designator
    }

    fn current_temperature(&self) -> DeviceResult<f64> {
        if !self.online.get() {
            return Err(DeviceError::NotAvailable {
                what: format!("sim sensor '{}' offline", self.designator),
            });
        }
        Ok(self.temperature.get())
    }
}

/// External control over a [`SimSensor`].
#[derive(Clone)]
pub struct SimSensorProbe {
    temperature: Rc<Cell<f64>>,
    online: Rc<Cell<bool>>,
}

impl SimSensorProbe {
    /// Set the reading the sensor will report.
    pub fn set_temperature(&self, degrees_c: f64) {
        self.temperature.set(degrees_c);
    }

    /// Mark the sensor readable or unreadable.
    pub fn set_online(&self, online: bool) {
        self.online.set(online);
    }
}

/// Simulated switch recording the writes it receives.
#[derive(Default)]
pub struct SimSwitch {
    state: Rc<Cell<Option<bool>>>,
    value: Rc<Cell<Option<f64>>>,
    state_writes: Rc<Cell<u32>>,
    value_writes: Rc<Cell<u32>>,
    reject: Rc<Cell<bool>>,
}

impl SimSwitch {
    /// Create a switch that has seen no writes yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a probe sharing this switch's state.
    pub fn probe(&self) -> SimSwitchProbe {
        SimSwitchProbe {
            state: Rc::clone(&self.state),
            value: Rc::clone(&self.value),
            state_writes: Rc::clone(&self.state_writes),
            value_writes: Rc::clone(&self.value_writes),
            reject: Rc::clone(&self.reject),
        }
    }
}

impl SwitchOutput for SimSwitch {
    fn set_state(&mut self, on: bool) -> DeviceResult<()> {
        if self.reject.get() {
            return Err(DeviceError::WriteRejected {
                what: "sim switch rejecting state writes".to_string(),
            });
        }
        self.state.set(Some(on));
        self.state_writes.set(self.state_writes.get() + 1);
        Ok(())
    }

    fn set_value(&mut self, duty: f64) -> DeviceResult<()> {
        if self.reject.get() {
            return Err(DeviceError::WriteRejected {
                what: "sim switch rejecting value writes".to_string(),
            });
        }
        self.value.set(Some(duty));
        self.value_writes.set(self.value_writes.get() + 1);
        Ok(())
    }
}

/// Observation and failure injection for a [`SimSwitch`].
#[derive(Clone)]
pub struct SimSwitchProbe {
    state: Rc<Cell<Option<bool>>>,
    value: Rc<Cell<Option<f64>>>,
    state_writes: Rc<Cell<u32>>,
    value_writes: Rc<Cell<u32>>,
    reject: Rc<Cell<bool>>,
}

impl SimSwitchProbe {
    /// Last on/off state written, if any.
    pub fn last_state(&self) -> Option<bool> {
        self.state.get()
    }

    /// Last duty value written, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.value.get()
    }

    /// Number of state writes received.
    pub fn state_writes(&self) -> u32 {
        self.state_writes.get()
    }

    /// Number of value writes received.
    pub fn value_writes(&self) -> u32 {
        self.value_writes.get()
    }

    /// Make the switch reject (or accept) all further writes.
    pub fn set_reject(&self, reject: bool) {
        self.reject.set(reject);
    }
}
