//! Device abstraction layer for thermofade.
//!
//! The control loop never talks to hardware directly. It holds compact
//! handles (`SensorId`, `SwitchId`) into a [`DeviceRegistry`] arena that owns
//! the actual device implementations behind two small traits:
//!
//! - [`TemperatureSource`]: reports a designator tag and a current reading
//! - [`SwitchOutput`]: accepts independent on/off and duty-value writes
//!
//! Handles are resolved once at startup (late-bound by designator tag or by
//! configured switch name) and stay valid for the process lifetime; the
//! registry never removes devices.

pub mod error;
pub mod registry;
pub mod sensor;
pub mod sim;
pub mod switch;

pub use error::{DeviceError, DeviceResult};
pub use registry::DeviceRegistry;
pub use sensor::TemperatureSource;
pub use sim::{SimSensor, SimSensorProbe, SimSwitch, SimSwitchProbe};
pub use switch::SwitchOutput;
