//! Switch/PWM output trait.

use crate::error::DeviceResult;

/// A binary+analog output (fan, light, or any PWM-driven load).
///
/// The on/off state and the duty value are written separately and each write
/// is independently fallible. Implementations must not retry internally; the
/// control loop's policy is best-effort, write-and-move-on.
pub trait SwitchOutput {
    /// Write the on/off state.
    fn set_state(&mut self, on: bool) -> DeviceResult<()>;

    /// Write the numeric duty value.
    fn set_value(&mut self, duty: f64) -> DeviceResult<()>;
}
